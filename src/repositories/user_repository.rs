use crate::models::user::{NewUser, User, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User not found")]
    NotFound,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<User>;
    async fn get_all(&self) -> RepositoryResult<Vec<User>>;
    async fn update_by_id(&self, id: &str, updates: UserUpdate) -> RepositoryResult<User>;
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let id = user.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Utc::now();

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, first_name, last_name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, email, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, created_at, updated_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_by_id(&self, id: &str, updates: UserUpdate) -> RepositoryResult<User> {
        let mut user = self.get_by_id(id).await?;
        updates.apply_to(&mut user);
        user.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = ?, last_name = ?, email = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Deleted between the lookup and the write
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(user)
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
