use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::today;

fn default_active() -> bool {
    true
}

// ReservationEntity abstracts a book held for a member until expiration_date.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReservationEntity {
    pub reservation_id: String,
    pub member_id: String,
    pub isbn: String,
    pub reserved_on: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ReservationEntity {
    pub fn new(reservation_id: &str, member_id: &str, isbn: &str,
               reserved_on: NaiveDate, duration_days: i64) -> Self {
        Self {
            reservation_id: reservation_id.to_string(),
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            reserved_on,
            expiration_date: reserved_on + Duration::days(duration_days),
            active: true,
        }
    }

    pub fn is_expired(&self) -> bool {
        today() > self.expiration_date
    }

    pub fn cancel(&mut self) -> LibraryResult<()> {
        if !self.active {
            return Err(LibraryError::validation(
                format!("Reservation {} is already inactive", self.reservation_id).as_str()));
        }
        if self.is_expired() {
            return Err(LibraryError::reservation_expired(
                format!("Reservation {} expired on {}", self.reservation_id, self.expiration_date).as_str()));
        }
        self.active = false;
        Ok(())
    }

    // no-op unless still active and past expiration_date
    pub fn expire(&mut self) {
        if self.active && self.is_expired() {
            self.active = false;
        }
    }
}

impl Identifiable for ReservationEntity {
    fn id(&self) -> String {
        self.reservation_id.to_string()
    }
}

impl Display for ReservationEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let state = if self.active { "active" } else { "inactive" };
        write!(f, "Reservation {} for {} - {}", self.reservation_id, self.isbn, state)
    }
}
