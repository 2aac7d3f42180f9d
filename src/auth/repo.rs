use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User, UserRow};
use crate::error::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;
    /// Insert a user. A duplicate email yields `RepoError::UniqueViolation`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, email, password_hash, role, status, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, email, password_hash, role, status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (full_name, email, password_hash, role, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, password_hash, role, status, created_at
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.status.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;
        Ok(User::try_from(row)?)
    }
}
