use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    pub username: String,
    pub password_hash: String,
    pub email: String,
}

impl User {
    pub async fn find(db: &SqlitePool, id: Uuid) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, username, password_hash, email FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, username, password_hash, email FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        id: Uuid,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO users (id, username, password_hash, email) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(username)
            .bind(password_hash)
            .bind(email)
            .execute(db)
            .await?;

        Ok(())
    }
}
