use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use super::repo_types::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
            _ => StoreError::Database(e),
        }
    }
}

/// One statement per call. `None` means no row matched the id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn insert(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn find(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, StoreError>;
    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, city, country, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, city, country)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, city, country, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&user.country)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, city, country, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = $1, email = $2, city = $3, country = $4
             WHERE id = $5
            RETURNING id, name, email, city, country, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&user.country)
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
             WHERE id = $1
            RETURNING id, name, email, city, country, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}
