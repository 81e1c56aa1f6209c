use clap::{Parser, Subcommand};
use crate::core::library::Role;

pub mod controller;

#[derive(Debug, Parser)]
#[command(name = "lms", about = "Library management system", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a book to the catalog.
    AddBook {
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cover_url: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// List every book in the catalog.
    ListBooks,

    /// Register a new member.
    RegisterMember {
        #[arg(long)]
        member_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Loan a book to a member.
    LoanBook {
        #[arg(long)]
        member_id: String,
        #[arg(long)]
        isbn: String,
    },

    /// Return a loaned book.
    ReturnBook {
        #[arg(long)]
        loan_id: String,
    },

    /// Extend the due date of a loan.
    RenewLoan {
        #[arg(long)]
        loan_id: String,
        /// Days to add; defaults to the configured renewal period.
        #[arg(long)]
        extra_days: Option<i64>,
    },

    /// Cancel a loan and put the book back on the shelf.
    CancelLoan {
        #[arg(long)]
        loan_id: String,
    },

    /// Reserve a book for a member.
    ReserveBook {
        #[arg(long)]
        member_id: String,
        #[arg(long)]
        isbn: String,
    },

    /// Cancel an active reservation.
    CancelReservation {
        #[arg(long)]
        reservation_id: String,
    },

    /// Deactivate every reservation past its expiration date.
    ExpireReservations,

    /// Create a user account.
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// Change the role of a user (admin only).
    ChangeRole {
        #[arg(long)]
        admin_id: String,
        #[arg(long)]
        target_id: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// Deactivate a user account (admin only).
    DeactivateUser {
        #[arg(long)]
        admin_id: String,
        #[arg(long)]
        target_id: String,
    },

    /// Activate a user account (admin only).
    ActivateUser {
        #[arg(long)]
        admin_id: String,
        #[arg(long)]
        target_id: String,
    },

    /// Record a login for a user.
    LoginUser {
        #[arg(long)]
        user_id: String,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| {
        let names: Vec<String> = Role::all().iter().map(|r| r.to_string()).collect();
        format!("invalid role {}, expected one of {}", s, names.join(", "))
    })
}
