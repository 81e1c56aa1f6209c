use std::io::Write;
use chrono::Duration;
use tracing::{debug, info};
use crate::books::domain::model::BookEntity;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::cli::{Cli, Commands};
use crate::core::controller::AppState;
use crate::core::library::LibraryResult;
use crate::core::repository::EntityKind;
use crate::loans::domain::LoanService;
use crate::loans::factory::create_loan_service;
use crate::members::domain::MemberService;
use crate::members::domain::model::MemberEntity;
use crate::members::factory::create_member_service;
use crate::reservations::domain::ReservationService;
use crate::reservations::factory::create_reservation_service;
use crate::users::domain::UserService;
use crate::users::factory::create_user_service;
use crate::utils::date::today;

// Outcome of one command: the confirmation to print and the tables to write back.
pub struct Outcome {
    pub message: String,
    pub touched: Vec<EntityKind>,
}

impl Outcome {
    fn new(message: String, touched: &[EntityKind]) -> Self {
        Self {
            message,
            touched: touched.to_vec(),
        }
    }
}

/// Executes a command against the loaded state without persisting anything.
pub fn execute(command: Commands, state: &mut AppState) -> LibraryResult<Outcome> {
    let config = state.config.clone();
    let store = &mut state.store;
    match command {
        Commands::AddBook { isbn, title, author, year, genre, description, cover_url, location } => {
            let mut book = BookEntity::new(isbn.as_str(), title.as_str(), author.as_str());
            book.publication_year = year;
            book.genre = genre;
            book.description = description;
            book.cover_url = cover_url;
            book.location = location;
            let book = create_catalog_service(&config, store).add_book(book, None)?;
            Ok(Outcome::new(format!("Added book {}", book.isbn), &[EntityKind::Book]))
        }
        Commands::ListBooks => {
            let lines: Vec<String> = create_catalog_service(&config, store).list_books().iter()
                .map(|b| format!("{}: {} - {}", b.isbn, b.title, b.author))
                .collect();
            Ok(Outcome::new(lines.join("\n"), &[]))
        }
        Commands::RegisterMember { member_id, name, email, phone } => {
            let mut member = MemberEntity::new(member_id.as_str(), name.as_str(), today())
                .with_contact(email, phone)?;
            member.membership_expiry = member.registered_on + Duration::days(config.membership_days);
            member.max_books = config.max_books;
            let member = create_member_service(&config, store).register_member(member)?;
            Ok(Outcome::new(format!("Registered member {}", member.member_id), &[EntityKind::Member]))
        }
        Commands::LoanBook { member_id, isbn } => {
            let loan = create_loan_service(&config, store).loan_book(member_id.as_str(), isbn.as_str())?;
            Ok(Outcome::new(format!("Loan created: {}", loan.loan_id),
                            &[EntityKind::Loan, EntityKind::Member, EntityKind::Book]))
        }
        Commands::ReturnBook { loan_id } => {
            create_loan_service(&config, store).return_book(loan_id.as_str())?;
            Ok(Outcome::new(format!("Returned loan {}", loan_id),
                            &[EntityKind::Loan, EntityKind::Member, EntityKind::Book]))
        }
        Commands::RenewLoan { loan_id, extra_days } => {
            let extra_days = extra_days.unwrap_or(config.renewal_days);
            let loan = create_loan_service(&config, store).renew_loan(loan_id.as_str(), Some(extra_days))?;
            Ok(Outcome::new(format!("Renewed loan {}, new due date {}", loan.loan_id, loan.due_date),
                            &[EntityKind::Loan]))
        }
        Commands::CancelLoan { loan_id } => {
            create_loan_service(&config, store).cancel_loan(loan_id.as_str())?;
            Ok(Outcome::new(format!("Cancelled loan {}", loan_id),
                            &[EntityKind::Loan, EntityKind::Member, EntityKind::Book]))
        }
        Commands::ReserveBook { member_id, isbn } => {
            let reservation = create_reservation_service(&config, store)
                .reserve_book(member_id.as_str(), isbn.as_str())?;
            Ok(Outcome::new(format!("Reserved book: {}", reservation.reservation_id),
                            &[EntityKind::Reservation, EntityKind::Book]))
        }
        Commands::CancelReservation { reservation_id } => {
            create_reservation_service(&config, store).cancel_reservation(reservation_id.as_str())?;
            Ok(Outcome::new(format!("Canceled reservation {}", reservation_id),
                            &[EntityKind::Reservation, EntityKind::Book]))
        }
        Commands::ExpireReservations => {
            let expired = create_reservation_service(&config, store).expire_reservations()?;
            Ok(Outcome::new(format!("Expired {} reservations", expired.len()), &[EntityKind::Reservation]))
        }
        Commands::CreateUser { name, role } => {
            let user = create_user_service(&config, store).create_user(name.as_str(), role)?;
            Ok(Outcome::new(format!("Created user: {}", user.user_id), &[EntityKind::User]))
        }
        Commands::ChangeRole { admin_id, target_id, role } => {
            let user = create_user_service(&config, store)
                .change_role(admin_id.as_str(), target_id.as_str(), role)?;
            Ok(Outcome::new(format!("Changed role for {} to {}", user.user_id, user.role), &[EntityKind::User]))
        }
        Commands::DeactivateUser { admin_id, target_id } => {
            let user = create_user_service(&config, store)
                .deactivate_user(admin_id.as_str(), target_id.as_str())?;
            Ok(Outcome::new(format!("Deactivated user: {}", user.user_id), &[EntityKind::User]))
        }
        Commands::ActivateUser { admin_id, target_id } => {
            let user = create_user_service(&config, store)
                .activate_user(admin_id.as_str(), target_id.as_str())?;
            Ok(Outcome::new(format!("Activated user: {}", user.user_id), &[EntityKind::User]))
        }
        Commands::LoginUser { user_id } => {
            let user = create_user_service(&config, store).login_user(user_id.as_str())?;
            let at = user.last_login.map(|t| t.to_rfc3339()).unwrap_or_default();
            Ok(Outcome::new(format!("User {} logged in at {}", user.user_id, at), &[EntityKind::User]))
        }
    }
}

/// Runs one CLI invocation: loads the data files, executes the command,
/// writes back the tables it changed and prints the outcome to `out`.
/// Returns the process exit code.
pub fn run<W: Write>(cli: Cli, state: &mut AppState, out: &mut W) -> i32 {
    debug!(command = ?cli.command, "executing command");
    let res = state.load()
        .and_then(|_| execute(cli.command, state))
        .and_then(|outcome| state.save(outcome.touched.as_slice()).map(|_| outcome));
    let (line, code) = match res {
        Ok(outcome) => (outcome.message, 0),
        Err(err) => {
            info!(error = %err, "command failed");
            (format!("Error: {}", err), 1)
        }
    };
    if !line.is_empty() && writeln!(out, "{}", line).is_err() {
        return 1;
    }
    code
}
