/// Catalog manager implementation
use crate::{
    catalog::{CertificationInput, LocationInput, TrainingInput},
    db::models::{Certification, Location, TrainingSession},
    error::{conflict_on, CertsError, CertsResult},
    expiry::RenewalUnit,
    validation,
};
use sqlx::SqlitePool;

/// Upper bound on a renewal cadence quantity. A thousand of the largest
/// unit is a millennium; anything beyond that is a typo, not a policy.
const MAX_RENEWAL_QUANTITY: i64 = 1000;

/// Catalog service for certifications, locations, and trainings
pub struct CatalogManager {
    db: SqlitePool,
}

impl CatalogManager {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Validate a certification payload.
    ///
    /// An expiring certification must carry a positive renewal quantity and
    /// a recognized unit; a non-expiring one may carry them (they are simply
    /// never used).
    fn validate_certification(input: &CertificationInput) -> CertsResult<()> {
        if input.cert_name.trim().is_empty() {
            return Err(CertsError::Validation {
                field: "cert_name",
                reason: "cert_name cannot be empty".to_string(),
            });
        }

        if input.hours < 0 {
            return Err(CertsError::Validation {
                field: "hours",
                reason: "Hours cannot be negative".to_string(),
            });
        }

        if input.expires {
            match input.good_for_time {
                Some(t) if t > 0 && t <= MAX_RENEWAL_QUANTITY => {}
                Some(t) if t > MAX_RENEWAL_QUANTITY => {
                    return Err(CertsError::Validation {
                        field: "good_for_time",
                        reason: format!(
                            "Renewal quantity must be at most {}",
                            MAX_RENEWAL_QUANTITY
                        ),
                    })
                }
                _ => {
                    return Err(CertsError::Validation {
                        field: "good_for_time",
                        reason: "Expiring certifications need a positive renewal quantity"
                            .to_string(),
                    })
                }
            }

            match &input.good_for_unit {
                Some(unit) => {
                    RenewalUnit::from_str(unit)?;
                }
                None => {
                    return Err(CertsError::Validation {
                        field: "good_for_unit",
                        reason: "Expiring certifications need a renewal unit".to_string(),
                    })
                }
            }
        }

        Ok(())
    }

    /// Canonicalize the renewal unit so the expiry calculator sees the
    /// lowercase spelling it matches on.
    fn normalize_unit(mut input: CertificationInput) -> CertificationInput {
        if let Some(unit) = &input.good_for_unit {
            if let Ok(parsed) = RenewalUnit::from_str(unit) {
                input.good_for_unit = Some(parsed.as_str().to_string());
            }
        }
        input
    }

    /// Create a certification
    pub async fn create_certification(
        &self,
        input: CertificationInput,
    ) -> CertsResult<Certification> {
        Self::validate_certification(&input)?;
        let input = Self::normalize_unit(input);

        let result = sqlx::query(
            "INSERT INTO certs (cert_name, hours, required, expires, good_for_time, good_for_unit)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&input.cert_name)
        .bind(input.hours)
        .bind(input.required)
        .bind(input.expires)
        .bind(input.good_for_time)
        .bind(&input.good_for_unit)
        .execute(&self.db)
        .await
        .map_err(conflict_on("cert_name"))?;

        Ok(Certification {
            id: result.last_insert_rowid(),
            cert_name: input.cert_name,
            hours: input.hours,
            required: input.required,
            expires: input.expires,
            good_for_time: input.good_for_time,
            good_for_unit: input.good_for_unit,
        })
    }

    /// Update a certification
    pub async fn update_certification(
        &self,
        cert_id: i64,
        input: CertificationInput,
    ) -> CertsResult<Certification> {
        Self::validate_certification(&input)?;
        let input = Self::normalize_unit(input);

        let result = sqlx::query(
            "UPDATE certs
             SET cert_name = ?1, hours = ?2, required = ?3, expires = ?4,
                 good_for_time = ?5, good_for_unit = ?6
             WHERE id = ?7",
        )
        .bind(&input.cert_name)
        .bind(input.hours)
        .bind(input.required)
        .bind(input.expires)
        .bind(input.good_for_time)
        .bind(&input.good_for_unit)
        .bind(cert_id)
        .execute(&self.db)
        .await
        .map_err(conflict_on("cert_name"))?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "certification",
                id: cert_id,
            });
        }

        self.get_certification(cert_id).await
    }

    /// Delete a certification; held copies cascade away with it
    pub async fn delete_certification(&self, cert_id: i64) -> CertsResult<()> {
        let result = sqlx::query("DELETE FROM certs WHERE id = ?1")
            .bind(cert_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "certification",
                id: cert_id,
            });
        }

        Ok(())
    }

    /// Get a certification by id
    pub async fn get_certification(&self, cert_id: i64) -> CertsResult<Certification> {
        sqlx::query_as::<_, Certification>(
            "SELECT id, cert_name, hours, required, expires, good_for_time, good_for_unit
             FROM certs WHERE id = ?1",
        )
        .bind(cert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(CertsError::NotFound {
            entity: "certification",
            id: cert_id,
        })
    }

    fn validate_location(input: &LocationInput) -> CertsResult<()> {
        validation::validate_site_name(&input.site_name)?;
        if let Some(city) = &input.city {
            validation::validate_city(city)?;
        }
        validation::validate_state(&input.state)
    }

    /// Create a location
    pub async fn create_location(&self, input: LocationInput) -> CertsResult<Location> {
        Self::validate_location(&input)?;

        let result = sqlx::query("INSERT INTO locations (site_name, city, state) VALUES (?1, ?2, ?3)")
            .bind(&input.site_name)
            .bind(&input.city)
            .bind(&input.state)
            .execute(&self.db)
            .await
            .map_err(conflict_on("site_name"))?;

        Ok(Location {
            id: result.last_insert_rowid(),
            site_name: input.site_name,
            city: input.city,
            state: input.state,
        })
    }

    /// Update a location
    pub async fn update_location(
        &self,
        location_id: i64,
        input: LocationInput,
    ) -> CertsResult<Location> {
        Self::validate_location(&input)?;

        let result =
            sqlx::query("UPDATE locations SET site_name = ?1, city = ?2, state = ?3 WHERE id = ?4")
                .bind(&input.site_name)
                .bind(&input.city)
                .bind(&input.state)
                .bind(location_id)
                .execute(&self.db)
                .await
                .map_err(conflict_on("site_name"))?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "location",
                id: location_id,
            });
        }

        Ok(Location {
            id: location_id,
            site_name: input.site_name,
            city: input.city,
            state: input.state,
        })
    }

    /// Delete a location; employee associations cascade away with it
    pub async fn delete_location(&self, location_id: i64) -> CertsResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?1")
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

    fn validate_training(input: &TrainingInput) -> CertsResult<()> {
        if input.name.trim().is_empty() {
            return Err(CertsError::Validation {
                field: "name",
                reason: "name cannot be empty".to_string(),
            });
        }
        if let Some(city) = &input.city {
            validation::validate_city(city)?;
        }
        validation::validate_state(&input.state)?;
        validation::validate_room(&input.room)?;

        if input.hours <= 0 {
            return Err(CertsError::Validation {
                field: "hours",
                reason: "Training hours must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Create a training session
    pub async fn create_training(&self, input: TrainingInput) -> CertsResult<TrainingSession> {
        Self::validate_training(&input)?;

        let result = sqlx::query(
            "INSERT INTO trainings (name, city, state, room, hours, scheduled_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.room)
        .bind(input.hours)
        .bind(input.scheduled_at)
        .execute(&self.db)
        .await?;

        Ok(TrainingSession {
            id: result.last_insert_rowid(),
            name: input.name,
            city: input.city,
            state: input.state,
            room: input.room,
            hours: input.hours,
            scheduled_at: input.scheduled_at,
        })
    }

    /// Update a training session
    pub async fn update_training(
        &self,
        training_id: i64,
        input: TrainingInput,
    ) -> CertsResult<TrainingSession> {
        Self::validate_training(&input)?;

        let result = sqlx::query(
            "UPDATE trainings
             SET name = ?1, city = ?2, state = ?3, room = ?4, hours = ?5, scheduled_at = ?6
             WHERE id = ?7",
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.room)
        .bind(input.hours)
        .bind(input.scheduled_at)
        .bind(training_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "training",
                id: training_id,
            });
        }

        Ok(TrainingSession {
            id: training_id,
            name: input.name,
            city: input.city,
            state: input.state,
            room: input.room,
            hours: input.hours,
            scheduled_at: input.scheduled_at,
        })
    }

    /// Delete a training session
    pub async fn delete_training(&self, training_id: i64) -> CertsResult<()> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = ?1")
            .bind(training_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "training",
                id: training_id,
            });
        }

        Ok(())
    }
}
