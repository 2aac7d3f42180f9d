use async_trait::async_trait;
use sqlx::PgPool;

use crate::donations::repo_types::DonationRow;
use crate::error::RepoError;

#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Donations of a user, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<DonationRow>, RepoError>;
}

#[derive(Clone)]
pub struct PgDonationRepository {
    db: PgPool,
}

impl PgDonationRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DonationRepository for PgDonationRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<DonationRow>, RepoError> {
        let rows = sqlx::query_as::<_, DonationRow>(
            r#"
            SELECT d.id AS donation_id, d.user_id, d.campaign_id, d.amount, d.date, d.hash,
                   c.title AS campaign_title
            FROM donations d
            JOIN campaigns c ON c.id = d.campaign_id
            WHERE d.user_id = $1
            ORDER BY d.date DESC, d.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;
        Ok(rows)
    }
}
