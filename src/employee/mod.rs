/// Employee account management
///
/// Registration, authentication, sessions, profile and hours updates.

mod manager;

pub use manager::EmployeeManager;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub is_admin: bool,
}

/// Editable identity fields; the password is never updated through this
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hire_date: NaiveDate,
    pub is_admin: bool,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session response: the opaque token plus the resolved employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub employee: crate::db::models::Employee,
}

/// Hours counters update (overwrites, never accumulates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursUpdate {
    pub completed: i64,
    pub required: i64,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub password: String,
}
