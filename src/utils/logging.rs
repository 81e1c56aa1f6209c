use std::io;
use std::str::FromStr;
use tracing::Level;
use crate::core::domain::Configuration;

// Logs go to stderr so that stdout only carries command output.
pub fn setup_tracing(config: &Configuration) {
    let level = Level::from_str(config.log_level.as_str()).unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_writer(io::stderr);
    let res = if config.log_json {
        builder.without_time().json().try_init()
    } else {
        builder.try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
