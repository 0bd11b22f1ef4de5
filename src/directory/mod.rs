/// Read-only directory queries
///
/// Plain listings consumed by the presentation layer. Rows come back in
/// insertion (id) order; no pagination at this scale, though listing is the
/// first place to grow a cursor if the dataset ever warrants one.
use crate::{
    db::models::{Certification, Employee, Location, TrainingSession},
    error::CertsResult,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One certification an employee holds, with its association dates
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HeldCertification {
    /// Association record id
    pub record_id: i64,
    pub cert_id: i64,
    pub cert_name: String,
    pub required: bool,
    pub expires: bool,
    pub received: NaiveDate,
    pub due: Option<NaiveDate>,
}

/// Read-only query service
pub struct Directory {
    db: SqlitePool,
}

impl Directory {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// List all employees
    pub async fn list_employees(&self) -> CertsResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, username, password_hash, email, first_name, last_name,
                    hire_date, is_admin, completed, required
             FROM employees ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(employees)
    }

    /// List all locations
    pub async fn list_locations(&self) -> CertsResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, site_name, city, state FROM locations ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    /// List all certifications
    pub async fn list_certifications(&self) -> CertsResult<Vec<Certification>> {
        let certs = sqlx::query_as::<_, Certification>(
            "SELECT id, cert_name, hours, required, expires, good_for_time, good_for_unit
             FROM certs ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(certs)
    }

    /// List all offered training sessions
    pub async fn list_trainings(&self) -> CertsResult<Vec<TrainingSession>> {
        let trainings = sqlx::query_as::<_, TrainingSession>(
            "SELECT id, name, city, state, room, hours, scheduled_at
             FROM trainings ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(trainings)
    }

    /// Certifications held by one employee, with received/due dates
    pub async fn certifications_for(&self, employee_id: i64) -> CertsResult<Vec<HeldCertification>> {
        let held = sqlx::query_as::<_, HeldCertification>(
            "SELECT ec.id AS record_id, c.id AS cert_id, c.cert_name, c.required, c.expires,
                    ec.received, ec.due
             FROM employee_certs ec
             JOIN certs c ON c.id = ec.cert_id
             WHERE ec.employee_id = ?1
             ORDER BY ec.id",
        )
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(held)
    }

    /// Locations assigned to one employee
    pub async fn locations_for(&self, employee_id: i64) -> CertsResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT l.id, l.site_name, l.city, l.state
             FROM employee_locations el
             JOIN locations l ON l.id = el.location_id
             WHERE el.employee_id = ?1
             ORDER BY l.id",
        )
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }
}
