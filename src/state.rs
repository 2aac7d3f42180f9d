use std::sync::Arc;

use crate::auth::repo::{PgUserRepository, UserRepository};
use crate::config::AppConfig;
use crate::db;
use crate::donations::repo::{DonationRepository, PgDonationRepository};
use crate::memory::{InMemoryDonations, InMemoryUsers};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub donations: Arc<dyn DonationRepository>,
}

impl AppState {
    /// Connects to Postgres, applies migrations and wires the SQL repositories.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;

        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            donations: Arc::new(PgDonationRepository::new(pool)),
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepository>,
        donations: Arc<dyn DonationRepository>,
    ) -> Self {
        Self {
            config,
            users,
            donations,
        }
    }

    /// State backed by empty in-memory repositories and test config.
    pub fn in_memory() -> Self {
        Self::in_memory_with(InMemoryDonations::default())
    }

    pub fn in_memory_with(donations: InMemoryDonations) -> Self {
        Self::from_parts(
            Arc::new(AppConfig::for_tests()),
            Arc::new(InMemoryUsers::default()),
            Arc::new(donations),
        )
    }
}
