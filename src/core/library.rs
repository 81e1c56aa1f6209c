use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq)]
pub enum LibraryError {
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    AccessDenied {
        message: String,
    },
    BookNotAvailable {
        message: String,
    },
    MemberNotFound {
        message: String,
    },
    UserNotFound {
        message: String,
    },
    MembershipExpired {
        message: String,
    },
    MaxRenewalsExceeded {
        message: String,
    },
    ReservationExpired {
        message: String,
    },
    // file is missing, unreadable or a record could not be rebuilt
    Import {
        message: String,
    },
    Export {
        message: String,
    },
    Validation {
        message: String,
    },
    Serialization {
        message: String,
    },
}

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn access_denied(message: &str) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string() }
    }

    pub fn book_not_available(message: &str) -> LibraryError {
        LibraryError::BookNotAvailable { message: message.to_string() }
    }

    pub fn member_not_found(message: &str) -> LibraryError {
        LibraryError::MemberNotFound { message: message.to_string() }
    }

    pub fn user_not_found(message: &str) -> LibraryError {
        LibraryError::UserNotFound { message: message.to_string() }
    }

    pub fn membership_expired(message: &str) -> LibraryError {
        LibraryError::MembershipExpired { message: message.to_string() }
    }

    pub fn max_renewals_exceeded(message: &str) -> LibraryError {
        LibraryError::MaxRenewalsExceeded { message: message.to_string() }
    }

    pub fn reservation_expired(message: &str) -> LibraryError {
        LibraryError::ReservationExpired { message: message.to_string() }
    }

    pub fn import(message: &str) -> LibraryError {
        LibraryError::Import { message: message.to_string() }
    }

    pub fn export(message: &str) -> LibraryError {
        LibraryError::Export { message: message.to_string() }
    }

    pub fn validation(message: &str) -> LibraryError {
        LibraryError::Validation { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::NotFound { message } => message,
            LibraryError::DuplicateKey { message } => message,
            LibraryError::AccessDenied { message } => message,
            LibraryError::BookNotAvailable { message } => message,
            LibraryError::MemberNotFound { message } => message,
            LibraryError::UserNotFound { message } => message,
            LibraryError::MembershipExpired { message } => message,
            LibraryError::MaxRenewalsExceeded { message } => message,
            LibraryError::ReservationExpired { message } => message,
            LibraryError::Import { message } => message,
            LibraryError::Export { message } => message,
            LibraryError::Validation { message } => message,
            LibraryError::Serialization { message } => message,
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("json parsing {}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the store and the services.
pub type LibraryResult<T> = Result<T, LibraryError>;

// Older exports wrote enum values as `BookStatus.LOANED`; only the last
// segment is meaningful.
fn symbolic_name(s: &str) -> &str {
    s.rsplit('.').next().unwrap_or(s).trim()
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BookStatus {
    #[default]
    Available,
    Loaned,
    Reserved,
}

impl FromStr for BookStatus {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match symbolic_name(s) {
            "AVAILABLE" => Ok(BookStatus::Available),
            "LOANED" => Ok(BookStatus::Loaned),
            "RESERVED" => Ok(BookStatus::Reserved),
            other => Err(LibraryError::validation(
                format!("unknown book status {}", other).as_str())),
        }
    }
}

impl TryFrom<String> for BookStatus {
    type Error = LibraryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        BookStatus::from_str(s.as_str())
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        status.to_string()
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "AVAILABLE"),
            BookStatus::Loaned => write!(f, "LOANED"),
            BookStatus::Reserved => write!(f, "RESERVED"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Guest,
    Student,
    Teacher,
    Librarian,
    Admin,
}

impl Role {
    pub fn all() -> [Role; 5] {
        [Role::Guest, Role::Student, Role::Teacher, Role::Librarian, Role::Admin]
    }

    pub fn parse(s: &str) -> Option<Role> {
        match symbolic_name(s) {
            "GUEST" => Some(Role::Guest),
            "STUDENT" => Some(Role::Student),
            "TEACHER" => Some(Role::Teacher),
            "LIBRARIAN" => Some(Role::Librarian),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Permission matrix shared by user accounts and catalog role checks.
    pub fn permits(&self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::Librarian => !matches!(action, Action::ManageUsers),
            Role::Student | Role::Teacher => matches!(action, Action::Loan | Action::Reserve),
            Role::Guest => false,
        }
    }
}

// unmapped roles fall back to the least privileged one
impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(s.as_str()).unwrap_or(Role::Guest)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Guest => write!(f, "GUEST"),
            Role::Student => write!(f, "STUDENT"),
            Role::Teacher => write!(f, "TEACHER"),
            Role::Librarian => write!(f, "LIBRARIAN"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Protected operations a user may be allowed to perform.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Loan,
    Return,
    Reserve,
    AddBook,
    RemoveBook,
    ManageUsers,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Action::Loan => write!(f, "loan"),
            Action::Return => write!(f, "return"),
            Action::Reserve => write!(f, "reserve"),
            Action::AddBook => write!(f, "add_book"),
            Action::RemoveBook => write!(f, "remove_book"),
            Action::ManageUsers => write!(f, "manage_users"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::core::library::{Action, BookStatus, LibraryError, Role};

    #[test]
    fn test_should_create_errors() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound { .. }));
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey { .. }));
        assert!(matches!(LibraryError::access_denied("test"), LibraryError::AccessDenied { .. }));
        assert!(matches!(LibraryError::book_not_available("test"), LibraryError::BookNotAvailable { .. }));
        assert!(matches!(LibraryError::member_not_found("test"), LibraryError::MemberNotFound { .. }));
        assert!(matches!(LibraryError::user_not_found("test"), LibraryError::UserNotFound { .. }));
        assert!(matches!(LibraryError::membership_expired("test"), LibraryError::MembershipExpired { .. }));
        assert!(matches!(LibraryError::max_renewals_exceeded("test"), LibraryError::MaxRenewalsExceeded { .. }));
        assert!(matches!(LibraryError::reservation_expired("test"), LibraryError::ReservationExpired { .. }));
        assert!(matches!(LibraryError::import("test"), LibraryError::Import { .. }));
        assert!(matches!(LibraryError::export("test"), LibraryError::Export { .. }));
        assert!(matches!(LibraryError::validation("test"), LibraryError::Validation { .. }));
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization { .. }));
    }

    #[test]
    fn test_should_display_message_only() {
        let err = LibraryError::member_not_found("Member M1 not found");
        assert_eq!("Member M1 not found", err.to_string());
    }

    #[test]
    fn test_should_convert_json_error() {
        let err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        assert!(matches!(LibraryError::from(err), LibraryError::Serialization { .. }));
    }

    #[test]
    fn test_should_format_book_status() {
        for status in [BookStatus::Available, BookStatus::Loaned, BookStatus::Reserved] {
            let str_status = BookStatus::from_str(status.to_string().as_str()).expect("should parse");
            assert_eq!(status, str_status);
        }
    }

    #[test]
    fn test_should_strip_legacy_prefix() {
        assert_eq!(BookStatus::Loaned, BookStatus::from_str("BookStatus.LOANED").expect("should parse"));
        assert_eq!(Role::Admin, Role::from("Role.ADMIN".to_string()));
    }

    #[test]
    fn test_should_reject_unknown_status() {
        assert!(BookStatus::from_str("UNAVAILABLE").is_err());
        let res: Result<BookStatus, _> = serde_json::from_str("\"UNAVAILABLE\"");
        assert!(res.is_err());
    }

    #[test]
    fn test_should_default_unknown_role_to_guest() {
        assert_eq!(Role::Guest, Role::from("SUPERUSER".to_string()));
        assert_eq!(None, Role::parse("SUPERUSER"));
    }

    #[test]
    fn test_should_format_roles() {
        for role in Role::all() {
            assert_eq!(role, Role::from(role.to_string()));
        }
        assert_eq!("\"LIBRARIAN\"", serde_json::to_string(&Role::Librarian).expect("should serialize"));
    }

    #[test]
    fn test_should_permit_actions_by_role() {
        assert!(Role::Admin.permits(Action::ManageUsers));
        assert!(Role::Librarian.permits(Action::AddBook));
        assert!(Role::Librarian.permits(Action::Return));
        assert!(!Role::Librarian.permits(Action::ManageUsers));
        assert!(Role::Teacher.permits(Action::Reserve));
        assert!(!Role::Student.permits(Action::Return));
        assert!(!Role::Student.permits(Action::RemoveBook));
        assert!(!Role::Guest.permits(Action::Loan));
    }
}
