//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::{PostRepository, UserRepository};
use postboard_infra::{DatabaseConfig, InMemoryDatabase};

#[cfg(feature = "postgres")]
use migration::{DbErr, Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use postboard_infra::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

use crate::services::{PostService, UserService};

/// Largest accepted bulk upload file, in bytes.
pub const DEFAULT_UPLOAD_LIMIT: usize = 2 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: UserService,
    pub upload_limit: usize,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    #[cfg(feature = "postgres")]
    pub async fn new(db_config: Option<&DatabaseConfig>, run_migrations: bool) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match connect(config, run_migrations).await {
            Ok(conn) => {
                let conn = Arc::new(conn);
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(conn.main.clone()));
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(conn.main.clone()));

                tracing::info!("Application state initialized");
                Self {
                    posts: PostService::new(posts, users.clone()),
                    users: UserService::new(users),
                    upload_limit: DEFAULT_UPLOAD_LIMIT,
                    db: Some(conn),
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new(_db_config: Option<&DatabaseConfig>, _run_migrations: bool) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryDatabase::new();
        let users: Arc<dyn UserRepository> = Arc::new(store.user_repository());
        let posts: Arc<dyn PostRepository> = Arc::new(store.post_repository());

        Self {
            posts: PostService::new(posts, users.clone()),
            users: UserService::new(users),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }

    /// Name of the backing store, as reported by the health check.
    #[cfg(feature = "postgres")]
    pub fn storage(&self) -> &'static str {
        match self.db {
            Some(_) => "postgres",
            None => "in-memory",
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub fn storage(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    config: &DatabaseConfig,
    run_migrations: bool,
) -> Result<DatabaseConnections, DbErr> {
    let conn = DatabaseConnections::init(config).await?;

    if run_migrations {
        tracing::info!("Applying pending migrations");
        Migrator::up(&conn.main, None).await?;
    }

    Ok(conn)
}
