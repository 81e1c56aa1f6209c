use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::core::domain::{DEFAULT_MAX_BOOKS, DEFAULT_MEMBERSHIP_DURATION_DAYS, Identifiable};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::{add_days, today};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("valid email pattern");
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone pattern");
}

fn default_max_books() -> usize {
    DEFAULT_MAX_BOOKS
}

// MemberEntity abstracts a library member holding a card.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: String,
    pub name: String,
    pub registered_on: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub membership_expiry: NaiveDate,
    #[serde(default = "default_max_books")]
    pub max_books: usize,
    #[serde(default)]
    pub current_loans: Vec<String>,
}

impl MemberEntity {
    pub fn new(member_id: &str, name: &str, registered_on: NaiveDate) -> Self {
        Self {
            member_id: member_id.to_string(),
            name: name.to_string(),
            registered_on,
            email: None,
            phone: None,
            membership_expiry: today() + Duration::days(DEFAULT_MEMBERSHIP_DURATION_DAYS),
            max_books: DEFAULT_MAX_BOOKS,
            current_loans: vec![],
        }
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> LibraryResult<Self> {
        self.email = email;
        self.phone = phone;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !EMAIL_REGEX.is_match(email) {
                return Err(LibraryError::validation(
                    format!("Invalid email address: {}", email).as_str()));
            }
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            if !PHONE_REGEX.is_match(phone) {
                return Err(LibraryError::validation(
                    format!("Invalid phone number: {}", phone).as_str()));
            }
        }
        Ok(())
    }

    pub fn is_membership_active(&self) -> bool {
        today() <= self.membership_expiry
    }

    /// Whether one more loan fits under `max_books`.
    ///
    /// An expired membership is an error rather than `false` so callers can
    /// tell the two refusals apart.
    pub fn can_loan(&self) -> LibraryResult<bool> {
        if !self.is_membership_active() {
            return Err(LibraryError::membership_expired(
                format!("Membership expired on {}", self.membership_expiry).as_str()));
        }
        Ok(self.current_loans.len() < self.max_books)
    }

    pub fn add_loan(&mut self, loan_id: &str) -> LibraryResult<()> {
        if !self.can_loan()? {
            return Err(LibraryError::validation(
                format!("Member {} cannot take more loans", self.member_id).as_str()));
        }
        self.current_loans.push(loan_id.to_string());
        Ok(())
    }

    pub fn remove_loan(&mut self, loan_id: &str) -> LibraryResult<()> {
        match self.current_loans.iter().position(|id| id == loan_id) {
            Some(pos) => {
                self.current_loans.remove(pos);
                Ok(())
            }
            None => Err(LibraryError::validation(
                format!("Loan {} not found for member {}", loan_id, self.member_id).as_str())),
        }
    }

    pub fn renew_membership(&mut self, extra_days: i64) -> LibraryResult<()> {
        let from = if self.is_membership_active() { self.membership_expiry } else { today() };
        self.membership_expiry = add_days(from, extra_days)?;
        Ok(())
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }
}

impl Display for MemberEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let status = if self.is_membership_active() { "active" } else { "expired" };
        write!(f, "{} ({}) - membership {} until {}",
               self.name, self.member_id, status, self.membership_expiry)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::core::library::LibraryError;
    use crate::members::domain::model::MemberEntity;
    use crate::utils::date::today;

    fn member() -> MemberEntity {
        MemberEntity::new("M1", "Ada Lovelace", today())
    }

    #[test]
    fn test_should_build_member() {
        let member = member();
        assert_eq!("M1", member.member_id.as_str());
        assert_eq!(today() + Duration::days(365), member.membership_expiry);
        assert_eq!(5, member.max_books);
        assert!(member.current_loans.is_empty());
        assert!(member.to_string().contains("membership active"));
    }

    #[test]
    fn test_should_validate_contact() {
        let ok = member().with_contact(Some("ada@example.org".to_string()), Some("+48123456789".to_string()));
        assert!(ok.is_ok());
        let bad_email = member().with_contact(Some("not-an-email".to_string()), None);
        assert!(matches!(bad_email, Err(LibraryError::Validation { .. })));
        let bad_phone = member().with_contact(None, Some("12-34".to_string()));
        assert!(matches!(bad_phone, Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_refuse_loan_when_expired() {
        let mut member = member();
        member.membership_expiry = today() - Duration::days(1);
        assert!(!member.is_membership_active());
        assert!(matches!(member.can_loan(), Err(LibraryError::MembershipExpired { .. })));
        assert!(matches!(member.add_loan("L1"), Err(LibraryError::MembershipExpired { .. })));
    }

    #[test]
    fn test_should_cap_loans_at_max_books() {
        let mut member = member();
        member.max_books = 2;
        member.add_loan("L1").expect("should add loan");
        member.add_loan("L2").expect("should add loan");
        assert!(!member.can_loan().expect("should be active"));
        assert!(matches!(member.add_loan("L3"), Err(LibraryError::Validation { .. })));
        assert_eq!(vec!["L1".to_string(), "L2".to_string()], member.current_loans);
    }

    #[test]
    fn test_should_remove_loan() {
        let mut member = member();
        member.add_loan("L1").expect("should add loan");
        member.remove_loan("L1").expect("should remove loan");
        assert!(member.current_loans.is_empty());
        assert!(matches!(member.remove_loan("L1"), Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_renew_membership() {
        let mut active = member();
        let expiry = active.membership_expiry;
        active.renew_membership(30).expect("should renew");
        assert_eq!(expiry + Duration::days(30), active.membership_expiry);

        let mut expired = member();
        expired.membership_expiry = today() - Duration::days(100);
        expired.renew_membership(30).expect("should renew");
        assert_eq!(today() + Duration::days(30), expired.membership_expiry);
    }

    #[test]
    fn test_should_reject_huge_membership_renewal() {
        let mut member = member();
        let expiry = member.membership_expiry;
        assert!(matches!(member.renew_membership(i64::MIN), Err(LibraryError::Validation { .. })));
        assert_eq!(expiry, member.membership_expiry);
    }
}
