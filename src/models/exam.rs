use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// The fixed set of exam categories marks are grouped under.
#[derive(sqlx::Type, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Quarterly,
    Midterm,
    Model,
    EndTerm,
}

impl ExamType {
    pub const ALL: [Self; 4] = [Self::Quarterly, Self::Midterm, Self::Model, Self::EndTerm];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quarterly" => Some(Self::Quarterly),
            "midterm" => Some(Self::Midterm),
            "model" => Some(Self::Model),
            "end_term" => Some(Self::EndTerm),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Midterm => "midterm",
            Self::Model => "model",
            Self::EndTerm => "end_term",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quarterly => "Quarterly",
            Self::Midterm => "Midterm",
            Self::Model => "Model",
            Self::EndTerm => "End-Term",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Exam {
    pub id: Uuid,

    pub exam_type: ExamType,
    pub name: String,
    pub date: NaiveDate,
}

impl Exam {
    pub async fn all(db: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, exam_type, name, date FROM exams ORDER BY date")
            .fetch_all(db)
            .await
    }

    pub async fn count(db: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM exams")
            .fetch_one(db)
            .await
    }

    /// Exam types that exist in the exams table, for filter dropdowns.
    pub async fn types_in_use(db: &SqlitePool) -> sqlx::Result<Vec<ExamType>> {
        sqlx::query_scalar("SELECT DISTINCT exam_type FROM exams ORDER BY exam_type")
            .fetch_all(db)
            .await
    }

    pub async fn create(
        db: &SqlitePool,
        id: Uuid,
        exam_type: ExamType,
        name: &str,
        date: NaiveDate,
    ) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO exams (id, exam_type, name, date) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(exam_type)
            .bind(name)
            .bind(date)
            .execute(db)
            .await?;

        Ok(())
    }
}
