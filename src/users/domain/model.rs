use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{Action, Role};
use crate::utils::date;

fn default_active() -> bool {
    true
}

// UserEntity abstracts a system account and the role it acts under.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    #[serde(with = "date::serializer")]
    pub joined_on: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "date::opt_serializer", default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserEntity {
    pub fn new(user_id: &str, name: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            role,
            joined_on: Utc::now(),
            is_active: true,
            last_login: None,
        }
    }

    /// Inactive accounts hold no permissions at all.
    pub fn has_permission(&self, action: Action) -> bool {
        self.is_active && self.role.permits(action)
    }

    pub fn is_admin(&self) -> bool {
        self.has_permission(Action::ManageUsers)
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> String {
        self.user_id.to_string()
    }
}

impl Display for UserEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let status = if self.is_active { "active" } else { "inactive" };
        write!(f, "User {} ({}) - role {}, {}", self.user_id, self.name, self.role, status)
    }
}
