use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, full_name, email, roll_number, class_batch, \
     date_of_birth, is_verified, otp, created_at, updated_at";

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Option<Uuid>,

    pub full_name: String,
    pub email: String,
    pub roll_number: String,
    pub class_batch: String,
    pub date_of_birth: NaiveDate,

    pub is_verified: bool,
    pub otp: Option<String>,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Whitelisted sort keys for the student listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StudentSort {
    #[default]
    FullName,
    RollNumber,
    ClassBatch,
    DateOfBirth,
}

impl StudentSort {
    #[must_use]
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            Some("roll_number") => Self::RollNumber,
            Some("class_batch") => Self::ClassBatch,
            Some("date_of_birth") => Self::DateOfBirth,
            _ => Self::FullName,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::RollNumber => "roll_number",
            Self::ClassBatch => "class_batch",
            Self::DateOfBirth => "date_of_birth",
        }
    }
}

/// Outcome of an OTP check against the stored code.
#[derive(Debug, PartialEq, Eq)]
pub enum OtpOutcome {
    Verified,
    Mismatch,
}

impl Student {
    pub async fn all(db: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {COLUMNS} FROM students ORDER BY full_name"
        ))
        .fetch_all(db)
        .await
    }

    /// Substring search over name and roll number; an empty query matches everyone.
    pub async fn search(db: &SqlitePool, query: &str, sort: StudentSort) -> sqlx::Result<Vec<Self>> {
        let order = sort.as_str();
        let pattern = format!("%{query}%");

        sqlx::query_as::<_, Self>(&format!(
            "SELECT {COLUMNS} FROM students \
             WHERE full_name LIKE ?1 OR roll_number LIKE ?1 \
             ORDER BY {order}"
        ))
        .bind(pattern)
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &SqlitePool, id: Uuid) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(&format!("SELECT {COLUMNS} FROM students WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_user(db: &SqlitePool, user_id: Uuid) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(&format!("SELECT {COLUMNS} FROM students WHERE user_id = ?"))
            .bind(user_id)
            .fetch_optional(db)
            .await
    }

    pub async fn count(db: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await
    }

    #[expect(clippy::too_many_arguments)]
    pub async fn create(
        db: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
        id: Uuid,
        user_id: Option<Uuid>,
        full_name: &str,
        email: &str,
        roll_number: &str,
        class_batch: &str,
        date_of_birth: NaiveDate,
    ) -> sqlx::Result<()> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO students \
             (id, user_id, full_name, email, roll_number, class_batch, date_of_birth, \
              is_verified, otp, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, NULL, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .bind(roll_number)
        .bind(class_batch)
        .bind(date_of_birth)
        .bind(now)
        .bind(now)
        .execute(db)
        .await?;

        Ok(())
    }

    /// Returns false when no student with this id exists.
    pub async fn update(
        db: &SqlitePool,
        id: Uuid,
        full_name: &str,
        email: &str,
        roll_number: &str,
        class_batch: &str,
        date_of_birth: NaiveDate,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE students SET full_name = ?, email = ?, roll_number = ?, \
             class_batch = ?, date_of_birth = ?, updated_at = ? WHERE id = ?",
        )
        .bind(full_name)
        .bind(email)
        .bind(roll_number)
        .bind(class_batch)
        .bind(date_of_birth)
        .bind(Utc::now().naive_utc())
        .bind(id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &SqlitePool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Stores a fresh plaintext code, replacing any previous one.
    pub async fn set_otp(db: &SqlitePool, id: Uuid, code: &str) -> sqlx::Result<()> {
        sqlx::query("UPDATE students SET otp = ?, updated_at = ? WHERE id = ?")
            .bind(code)
            .bind(Utc::now().naive_utc())
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Compares the submitted code against the stored one in a single UPDATE:
    /// on match the student becomes verified and the code is cleared, on
    /// mismatch (or no stored code) nothing changes.
    pub async fn verify_otp(db: &SqlitePool, id: Uuid, code: &str) -> sqlx::Result<OtpOutcome> {
        let result = sqlx::query(
            "UPDATE students SET is_verified = 1, otp = NULL, updated_at = ? \
             WHERE id = ? AND otp = ?",
        )
        .bind(Utc::now().naive_utc())
        .bind(id)
        .bind(code)
        .execute(db)
        .await?;

        if result.rows_affected() > 0 {
            Ok(OtpOutcome::Verified)
        } else {
            Ok(OtpOutcome::Mismatch)
        }
    }
}
