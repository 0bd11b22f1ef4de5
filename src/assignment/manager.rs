/// Assignment manager implementation
use crate::{
    db::models::{Certification, EmployeeCertification},
    error::{conflict_on, CertsError, CertsResult},
    expiry,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Assignment service for employee certifications and locations
pub struct AssignmentManager {
    db: SqlitePool,
}

impl AssignmentManager {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn ensure_employee(&self, employee_id: i64) -> CertsResult<()> {
        sqlx::query("SELECT id FROM employees WHERE id = ?1")
            .bind(employee_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(CertsError::NotFound {
                entity: "employee",
                id: employee_id,
            })?;

        Ok(())
    }

    /// Assign a certification to an employee.
    ///
    /// The due date is computed from the certification's renewal cadence
    /// when it expires, and left unset when it does not. Re-assignment
    /// creates a new association record; existing ones are never mutated.
    pub async fn assign_certification(
        &self,
        employee_id: i64,
        cert_id: i64,
        received: NaiveDate,
    ) -> CertsResult<EmployeeCertification> {
        self.ensure_employee(employee_id).await?;

        let cert = sqlx::query_as::<_, Certification>(
            "SELECT id, cert_name, hours, required, expires, good_for_time, good_for_unit
             FROM certs WHERE id = ?1",
        )
        .bind(cert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(CertsError::NotFound {
            entity: "certification",
            id: cert_id,
        })?;

        let due = if cert.expires {
            Some(expiry::due_date(
                received,
                cert.good_for_time.unwrap_or(0),
                cert.good_for_unit.as_deref().unwrap_or(""),
            ))
        } else {
            None
        };

        let result = sqlx::query(
            "INSERT INTO employee_certs (employee_id, cert_id, received, due)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(employee_id)
        .bind(cert_id)
        .bind(received)
        .bind(due)
        .execute(&self.db)
        .await?;

        tracing::info!(
            "Assigned certification {} to employee {}",
            cert.cert_name,
            employee_id
        );

        Ok(EmployeeCertification {
            id: result.last_insert_rowid(),
            employee_id,
            cert_id,
            received,
            due,
        })
    }

    /// Remove one certification record from an employee
    pub async fn remove_certification(&self, record_id: i64) -> CertsResult<()> {
        let result = sqlx::query("DELETE FROM employee_certs WHERE id = ?1")
            .bind(record_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "employee_certification",
                id: record_id,
            });
        }

        Ok(())
    }

    /// Add a location to an employee's set.
    ///
    /// Duplicate assignment is rejected as a Conflict rather than silently
    /// absorbed.
    pub async fn assign_location(&self, employee_id: i64, location_id: i64) -> CertsResult<()> {
        self.ensure_employee(employee_id).await?;

        sqlx::query("SELECT id FROM locations WHERE id = ?1")
            .bind(location_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(CertsError::NotFound {
                entity: "location",
                id: location_id,
            })?;

        sqlx::query("INSERT INTO employee_locations (employee_id, location_id) VALUES (?1, ?2)")
            .bind(employee_id)
            .bind(location_id)
            .execute(&self.db)
            .await
            .map_err(conflict_on("location"))?;

        Ok(())
    }

    /// Remove a location from an employee's set
    pub async fn remove_location(&self, employee_id: i64, location_id: i64) -> CertsResult<()> {
        let result = sqlx::query(
            "DELETE FROM employee_locations WHERE employee_id = ?1 AND location_id = ?2",
        )
        .bind(employee_id)
        .bind(location_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "location",
                id: location_id,
            });
        }

        Ok(())
    }
}
