/// Certification and location assignment
///
/// Writes the employee-certification association (computing the due date for
/// expiring certifications) and the employee-location join.

mod manager;

pub use manager::AssignmentManager;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assign-certification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignCertification {
    pub cert_id: i64,
    pub received: NaiveDate,
}

/// Assign-location request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignLocation {
    pub location_id: i64,
}
