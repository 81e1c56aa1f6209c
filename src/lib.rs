pub mod books;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod loans;
pub mod members;
pub mod reservations;
pub mod users;
pub mod utils;
