/// Catalog management
///
/// Admin-maintained catalogs: certifications, work locations, and offered
/// training sessions.

mod manager;

pub use manager::CatalogManager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Certification create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationInput {
    pub cert_name: String,
    /// Hours of training needed to earn it
    pub hours: i64,
    /// Mandatory vs optional
    pub required: bool,
    pub expires: bool,
    pub good_for_time: Option<i64>,
    pub good_for_unit: Option<String>,
}

/// Location create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInput {
    pub site_name: String,
    pub city: Option<String>,
    pub state: String,
}

/// Training session create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingInput {
    pub name: String,
    pub city: Option<String>,
    pub state: String,
    pub room: String,
    pub hours: i64,
    pub scheduled_at: Option<DateTime<Utc>>,
}
