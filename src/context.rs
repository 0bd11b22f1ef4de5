/// Application context and dependency injection
use crate::{
    assignment::AssignmentManager,
    catalog::CatalogManager,
    config::ServerConfig,
    db,
    directory::Directory,
    employee::EmployeeManager,
    error::CertsResult,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub employees: Arc<EmployeeManager>,
    pub catalog: Arc<CatalogManager>,
    pub assignments: Arc<AssignmentManager>,
    pub directory: Arc<Directory>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> CertsResult<Self> {
        config.validate()?;

        // Create data directory if it doesn't exist
        tokio::fs::create_dir_all(&config.storage.data_directory).await?;

        let pool = db::create_pool(&config.storage.database, db::DatabaseOptions::default()).await?;

        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        Ok(Self::from_pool(config, pool))
    }

    /// Build the context around an existing pool (tests use this directly)
    pub fn from_pool(config: ServerConfig, pool: SqlitePool) -> Self {
        let config = Arc::new(config);

        Self {
            config: config.clone(),
            db: pool.clone(),
            employees: Arc::new(EmployeeManager::new(pool.clone(), config)),
            catalog: Arc::new(CatalogManager::new(pool.clone())),
            assignments: Arc::new(AssignmentManager::new(pool.clone())),
            directory: Arc::new(Directory::new(pool)),
        }
    }
}
