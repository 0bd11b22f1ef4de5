/// Database models and row mappings
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employee record in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string; opaque, comparable only through credential::verify
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hire_date: NaiveDate,
    pub is_admin: bool,
    /// Completed training hours
    pub completed: i64,
    /// Required training hours
    pub required: i64,
}

/// Work location record
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub site_name: String,
    pub city: Option<String>,
    /// Two-letter state code
    pub state: String,
}

/// Certification catalog record
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Certification {
    pub id: i64,
    pub cert_name: String,
    /// Hours of training needed to earn the certification
    pub hours: i64,
    /// Mandatory vs optional certification
    pub required: bool,
    pub expires: bool,
    /// Renewal cadence quantity, set when `expires` is true
    pub good_for_time: Option<i64>,
    /// Renewal cadence unit (days/weeks/months/years), set when `expires` is true
    pub good_for_unit: Option<String>,
}

/// Offered training session (catalog entry, not an attendance record)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: String,
    pub room: String,
    pub hours: i64,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Employee-certification association entity.
///
/// Carries the received date and the computed due date beyond the two
/// foreign keys. `due` is present only when the certification expires.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmployeeCertification {
    pub id: i64,
    pub employee_id: i64,
    pub cert_id: i64,
    pub received: NaiveDate,
    pub due: Option<NaiveDate>,
}

/// Session record in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub employee_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
