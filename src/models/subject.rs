use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Subject {
    pub id: Uuid,

    pub name: String,
}

impl Subject {
    pub async fn all(db: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM subjects ORDER BY name")
            .fetch_all(db)
            .await
    }

    pub async fn count(db: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
            .fetch_one(db)
            .await
    }

    pub async fn create(db: &SqlitePool, id: Uuid, name: &str) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO subjects (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(db)
            .await?;

        Ok(())
    }
}
