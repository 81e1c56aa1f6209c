use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::{add_days, today};

// LoanEntity abstracts a book that is borrowed by a member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub loan_id: String,
    pub member_id: String,
    pub isbn: String,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub returned_on: Option<NaiveDate>,
    #[serde(default)]
    pub renew_count: u32,
}

impl LoanEntity {
    pub fn new(loan_id: &str, member_id: &str, isbn: &str,
               loan_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            loan_date,
            due_date,
            returned_on: None,
            renew_count: 0,
        }
    }

    pub fn mark_returned(&mut self, return_date: NaiveDate) -> LibraryResult<()> {
        if let Some(returned_on) = self.returned_on {
            return Err(LibraryError::validation(
                format!("Loan {} already returned on {}", self.loan_id, returned_on).as_str()));
        }
        self.returned_on = Some(return_date);
        Ok(())
    }

    pub fn is_returned(&self) -> bool {
        self.returned_on.is_some()
    }

    pub fn is_overdue(&self) -> bool {
        !self.is_returned() && today() > self.due_date
    }

    pub fn can_renew(&self, max_renewals: u32) -> bool {
        !self.is_returned() && self.renew_count < max_renewals
    }

    pub fn renew(&mut self, extra_days: i64, max_renewals: u32) -> LibraryResult<()> {
        if !self.can_renew(max_renewals) {
            return Err(LibraryError::max_renewals_exceeded(
                format!("Loan {} cannot be renewed more than {} times",
                        self.loan_id, max_renewals).as_str()));
        }
        self.due_date = add_days(self.due_date, extra_days)?;
        self.renew_count += 1;
        Ok(())
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }
}

impl Display for LoanEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let status = if self.is_returned() { "returned" } else { "out" };
        write!(f, "Loan {}: {} to {} - {}", self.loan_id, self.isbn, self.member_id, status)
    }
}
