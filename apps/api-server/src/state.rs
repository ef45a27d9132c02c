//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use bulletin_core::ports::{PasswordService, PostRepository};
use bulletin_core::{PostService, ResetCredentials};
use bulletin_infra::Argon2PasswordService;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let reset = match &config.reset {
            Some(reset) => Some(
                reset
                    .credentials(passwords.as_ref())
                    .context("invalid reset credentials")?,
            ),
            None => {
                tracing::warn!("RESET_USERNAME/RESET_PASSWORD not set. Reset endpoint disabled.");
                None
            }
        };

        let posts = Self::post_repository(config).await?;
        tracing::info!("Application state initialized");

        Ok(Self::with_repository(posts, passwords, reset))
    }

    pub fn with_repository(
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
        reset: Option<ResetCredentials>,
    ) -> Self {
        Self {
            posts: PostService::new(posts, passwords, reset),
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        use bulletin_infra::PostgresPostRepository;
        use bulletin_infra::database::connect;
        use migration::{Migrator, MigratorTrait};

        let conn = connect(&config.database)
            .await
            .context("failed to connect to database")?;

        Migrator::up(&conn, None)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("Database schema up to date");

        Ok(Arc::new(PostgresPostRepository::new(conn)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Arc::new(bulletin_infra::InMemoryPostRepository::new()))
    }
}
