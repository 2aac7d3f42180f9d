//! In-process repositories used by tests and by `AppState::in_memory`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    auth::{
        repo::UserRepository,
        repo_types::{NewUser, User},
    },
    donations::{repo::DonationRepository, repo_types::DonationRow},
    error::RepoError,
};

#[derive(Clone, Default)]
pub struct InMemoryUsers {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUsers {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        // A panicking test thread must not poison the store for the others.
        self.users.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.lock().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::UniqueViolation);
        }
        let created = User {
            id: users.len() as i64 + 1,
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            status: user.status,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
struct DonationStore {
    campaigns: Vec<(i64, String)>,
    donations: Vec<DonationRow>,
}

#[derive(Clone, Default)]
pub struct InMemoryDonations {
    store: Arc<Mutex<DonationStore>>,
}

impl InMemoryDonations {
    fn lock(&self) -> std::sync::MutexGuard<'_, DonationStore> {
        self.store.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Registers a campaign and returns its id.
    pub fn add_campaign(&self, title: &str) -> i64 {
        let mut store = self.lock();
        let id = store.campaigns.len() as i64 + 1;
        store.campaigns.push((id, title.to_string()));
        id
    }

    /// Records a donation against an existing campaign and returns its id.
    pub fn add_donation(
        &self,
        user_id: i64,
        campaign_id: i64,
        amount: Decimal,
        date: OffsetDateTime,
        hash: Option<&str>,
    ) -> i64 {
        let mut store = self.lock();
        let campaign_title = store
            .campaigns
            .iter()
            .find(|(id, _)| *id == campaign_id)
            .map(|(_, title)| title.clone())
            .unwrap_or_default();
        let donation_id = store.donations.len() as i64 + 1;
        store.donations.push(DonationRow {
            donation_id,
            user_id,
            campaign_id,
            amount,
            date,
            hash: hash.map(str::to_string),
            campaign_title,
        });
        donation_id
    }
}

#[async_trait]
impl DonationRepository for InMemoryDonations {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<DonationRow>, RepoError> {
        let mut rows: Vec<DonationRow> = self
            .lock()
            .donations
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.donation_id.cmp(&a.donation_id))
        });
        Ok(rows)
    }
}
