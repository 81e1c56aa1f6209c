use std::io;
use std::process::ExitCode;
use clap::Parser;
use lms_local::cli::Cli;
use lms_local::cli::controller::run;
use lms_local::core::controller::AppState;
use lms_local::core::domain::Configuration;
use lms_local::utils::logging::setup_tracing;

fn main() -> ExitCode {
    let config = Configuration::from_env();
    setup_tracing(&config);

    // clap exits with usage and a non-zero status on bad arguments
    let cli = Cli::parse();
    let mut state = AppState::new(config);
    let code = run(cli, &mut state, &mut io::stdout().lock());
    ExitCode::from(code as u8)
}
