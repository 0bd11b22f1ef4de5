/// Employee manager implementation using runtime queries
use crate::{
    config::ServerConfig,
    credential,
    db::models::{Employee, Session},
    employee::{NewEmployee, UpdateProfile},
    error::{conflict_on, CertsError, CertsResult},
    validation,
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

const EMPLOYEE_COLUMNS: &str = "id, username, password_hash, email, first_name, last_name, \
                                hire_date, is_admin, completed, required";

/// Employee account service
pub struct EmployeeManager {
    db: SqlitePool,
    config: Arc<ServerConfig>,
}

impl EmployeeManager {
    /// Create a new employee manager
    pub fn new(db: SqlitePool, config: Arc<ServerConfig>) -> Self {
        Self { db, config }
    }

    /// Register a new employee with a hashed credential.
    ///
    /// A duplicate email surfaces as `Conflict { field: "email" }`; the
    /// insert either fully commits or leaves nothing behind.
    pub async fn register(&self, new: NewEmployee) -> CertsResult<Employee> {
        validation::validate_username(&new.username)?;
        validation::validate_email(&new.email)?;
        validation::validate_first_name(&new.first_name)?;
        validation::validate_last_name(&new.last_name)?;
        validation::validate_password(&new.password)?;

        let password_hash = credential::hash(&new.password)?;

        let result = sqlx::query(
            "INSERT INTO employees (username, password_hash, email, first_name, last_name, \
                                    hire_date, is_admin, completed, required)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0)",
        )
        .bind(&new.username)
        .bind(&password_hash)
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.hire_date)
        .bind(new.is_admin)
        .execute(&self.db)
        .await
        .map_err(conflict_on("email"))?;

        tracing::info!("Registered employee {}", new.username);

        Ok(Employee {
            id: result.last_insert_rowid(),
            username: new.username,
            password_hash,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            hire_date: new.hire_date,
            is_admin: new.is_admin,
            completed: 0,
            required: 0,
        })
    }

    /// Verify credentials.
    ///
    /// Returns `None` for both an unknown username and a wrong password,
    /// indistinguishably; a miss still runs a verification against a dummy
    /// hash so the two paths do equivalent work.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> CertsResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE username = ?1 ORDER BY id LIMIT 1",
            EMPLOYEE_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        match employee {
            Some(employee) if credential::verify(password, &employee.password_hash) => {
                Ok(Some(employee))
            }
            Some(_) => Ok(None),
            None => {
                credential::verify(password, credential::dummy_hash());
                Ok(None)
            }
        }
    }

    /// Overwrite the employee's credential with a new hash.
    ///
    /// The only operation that touches the credential after registration;
    /// profile updates never do.
    pub async fn reset_password(
        &self,
        employee_id: i64,
        new_password: &str,
    ) -> CertsResult<Employee> {
        validation::validate_password(new_password)?;

        let password_hash = credential::hash(new_password)?;

        let result = sqlx::query("UPDATE employees SET password_hash = ?1 WHERE id = ?2")
            .bind(&password_hash)
            .bind(employee_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "employee",
                id: employee_id,
            });
        }

        tracing::info!("Password reset for employee {}", employee_id);

        self.get_employee(employee_id).await
    }

    /// Update the editable identity fields and the admin flag
    pub async fn update_profile(
        &self,
        employee_id: i64,
        update: UpdateProfile,
    ) -> CertsResult<Employee> {
        validation::validate_username(&update.username)?;
        validation::validate_email(&update.email)?;
        validation::validate_first_name(&update.first_name)?;
        validation::validate_last_name(&update.last_name)?;

        let result = sqlx::query(
            "UPDATE employees
             SET username = ?1, email = ?2, first_name = ?3, last_name = ?4,
                 hire_date = ?5, is_admin = ?6
             WHERE id = ?7",
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.hire_date)
        .bind(update.is_admin)
        .bind(employee_id)
        .execute(&self.db)
        .await
        .map_err(conflict_on("email"))?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "employee",
                id: employee_id,
            });
        }

        self.get_employee(employee_id).await
    }

    /// Overwrite the completed/required hours counters
    pub async fn update_hours(
        &self,
        employee_id: i64,
        completed: i64,
        required: i64,
    ) -> CertsResult<Employee> {
        if completed < 0 || required < 0 {
            return Err(CertsError::Validation {
                field: "hours",
                reason: "Hours counters cannot be negative".to_string(),
            });
        }

        let result = sqlx::query("UPDATE employees SET completed = ?1, required = ?2 WHERE id = ?3")
            .bind(completed)
            .bind(required)
            .bind(employee_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "employee",
                id: employee_id,
            });
        }

        self.get_employee(employee_id).await
    }

    /// Get an employee by id
    pub async fn get_employee(&self, employee_id: i64) -> CertsResult<Employee> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = ?1",
            EMPLOYEE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(CertsError::NotFound {
            entity: "employee",
            id: employee_id,
        })
    }

    /// Delete an employee.
    ///
    /// Association rows, certifications held, and open sessions go with it
    /// via the schema's cascade rules.
    pub async fn delete_employee(&self, employee_id: i64) -> CertsResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(employee_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CertsError::NotFound {
                entity: "employee",
                id: employee_id,
            });
        }

        Ok(())
    }

    /// Issue a session for an authenticated employee
    pub async fn create_session(&self, employee_id: i64) -> CertsResult<Session> {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            employee_id,
            created_at: now,
            expires_at: now + Duration::hours(self.config.auth.session_ttl_hours),
        };

        sqlx::query(
            "INSERT INTO sessions (token, employee_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&session.token)
        .bind(session.employee_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.db)
        .await?;

        Ok(session)
    }

    /// Resolve a session token back to its employee.
    ///
    /// Unknown and expired tokens both come back as `Unauthorized`; an
    /// expired session row is removed on the way out.
    pub async fn resolve_session(&self, token: &str) -> CertsResult<Employee> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, employee_id, created_at, expires_at FROM sessions WHERE token = ?1",
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| CertsError::Unauthorized("Invalid session".to_string()))?;

        if session.expires_at < Utc::now() {
            self.delete_session(token).await?;
            return Err(CertsError::Unauthorized("Session expired".to_string()));
        }

        self.get_employee(session.employee_id).await
    }

    /// Invalidate a session (logout). Idempotent.
    pub async fn delete_session(&self, token: &str) -> CertsResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::NaiveDate;

    fn test_config() -> Arc<ServerConfig> {
        Arc::new(ServerConfig {
            service: crate::config::ServiceConfig {
                hostname: "localhost".to_string(),
                port: 0,
            },
            storage: crate::config::StorageConfig {
                data_directory: "./data".into(),
                database: ":memory:".into(),
            },
            auth: crate::config::AuthConfig {
                session_ttl_hours: 12,
            },
            logging: crate::config::LoggingConfig {
                level: "debug".to_string(),
            },
        })
    }

    fn new_employee(username: &str, email: &str) -> NewEmployee {
        NewEmployee {
            username: username.to_string(),
            password: "s3cretpw".to_string(),
            email: email.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            is_admin: false,
        }
    }

    async fn test_manager() -> EmployeeManager {
        EmployeeManager::new(db::test_pool().await, test_config())
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let mgr = test_manager().await;

        let created = mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();
        assert!(created.id > 0);
        assert_ne!(created.password_hash, "s3cretpw");

        let authed = mgr.authenticate("jdoe", "s3cretpw").await.unwrap();
        assert_eq!(authed.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_and_first_registration_survives() {
        let mgr = test_manager().await;

        let first = mgr.register(new_employee("jdoe", "shared@example.com")).await.unwrap();

        let err = mgr
            .register(new_employee("jsmith", "shared@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, CertsError::Conflict { field: "email" }));

        // First registration unaffected
        let still_there = mgr.get_employee(first.id).await.unwrap();
        assert_eq!(still_there.username, "jdoe");
        assert!(mgr.authenticate("jsmith", "s3cretpw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_auth_is_indistinguishable() {
        let mgr = test_manager().await;
        mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();

        let wrong_password = mgr.authenticate("jdoe", "wrong").await.unwrap();
        let unknown_user = mgr.authenticate("nobody", "s3cretpw").await.unwrap();

        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }

    #[tokio::test]
    async fn test_update_hours_overwrites() {
        let mgr = test_manager().await;
        let emp = mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();

        let updated = mgr.update_hours(emp.id, 5, 10).await.unwrap();
        assert_eq!((updated.completed, updated.required), (5, 10));

        // Second call overwrites, never accumulates
        let updated = mgr.update_hours(emp.id, 7, 20).await.unwrap();
        assert_eq!((updated.completed, updated.required), (7, 20));

        let read_back = mgr.get_employee(emp.id).await.unwrap();
        assert_eq!((read_back.completed, read_back.required), (7, 20));
    }

    #[tokio::test]
    async fn test_update_hours_missing_employee_is_not_found() {
        let mgr = test_manager().await;
        let err = mgr.update_hours(999, 1, 2).await.unwrap_err();
        assert!(matches!(err, CertsError::NotFound { entity: "employee", id: 999 }));
    }

    #[tokio::test]
    async fn test_reset_password_rehashes() {
        let mgr = test_manager().await;
        let emp = mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();

        mgr.reset_password(emp.id, "newpassword").await.unwrap();

        assert!(mgr.authenticate("jdoe", "s3cretpw").await.unwrap().is_none());
        assert!(mgr.authenticate("jdoe", "newpassword").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_profile_never_touches_password() {
        let mgr = test_manager().await;
        let emp = mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();

        let updated = mgr
            .update_profile(
                emp.id,
                UpdateProfile {
                    username: "jdoe2".to_string(),
                    email: "jdoe2@example.com".to_string(),
                    first_name: "Janet".to_string(),
                    last_name: "Doe".to_string(),
                    hire_date: emp.hire_date,
                    is_admin: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "jdoe2");
        assert!(updated.is_admin);
        // Old credential still works under the new username
        assert!(mgr.authenticate("jdoe2", "s3cretpw").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let mgr = test_manager().await;
        let emp = mgr.register(new_employee("jdoe", "jdoe@example.com")).await.unwrap();

        let session = mgr.create_session(emp.id).await.unwrap();
        let resolved = mgr.resolve_session(&session.token).await.unwrap();
        assert_eq!(resolved.id, emp.id);

        mgr.delete_session(&session.token).await.unwrap();
        let err = mgr.resolve_session(&session.token).await.unwrap_err();
        assert!(matches!(err, CertsError::Unauthorized(_)));

        // Logout is idempotent
        mgr.delete_session(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_session_token_is_unauthorized() {
        let mgr = test_manager().await;
        let err = mgr.resolve_session("not-a-token").await.unwrap_err();
        assert!(matches!(err, CertsError::Unauthorized(_)));
    }
}
