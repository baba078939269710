use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{self, ExamType};
use crate::ranking::MarkRecord;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct ProgressSheet {
    pub id: Uuid,

    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub subject_id: Uuid,

    pub marks: i64,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A mark entry joined with its student, exam and subject, for listings.
#[derive(Debug, sqlx::FromRow)]
pub struct ProgressRow {
    pub id: Uuid,

    pub student_name: String,
    pub roll_number: String,

    pub exam_name: String,
    pub exam_type: ExamType,
    pub exam_date: NaiveDate,

    pub subject_name: String,
    pub marks: i64,

    pub created_at: NaiveDateTime,
}

/// Whitelisted sort keys for the progress listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressSort {
    #[default]
    Student,
    Marks,
    ExamDate,
}

impl ProgressSort {
    #[must_use]
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            Some("marks") => Self::Marks,
            Some("exam_date") => Self::ExamDate,
            _ => Self::Student,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Marks => "marks",
            Self::ExamDate => "exam_date",
        }
    }

    const fn column(self) -> &'static str {
        match self {
            Self::Student => "s.full_name",
            Self::Marks => "p.marks",
            Self::ExamDate => "e.date",
        }
    }
}

#[derive(Debug, Error)]
pub enum MarkSaveError {
    #[error("Marks must be between 0 and 100.")]
    MarksOutOfRange,
    #[error("A mark for this student, exam and subject already exists.")]
    Duplicate,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

const LISTING: &str = "SELECT p.id, s.full_name AS student_name, s.roll_number, \
     e.name AS exam_name, e.exam_type, e.date AS exam_date, \
     sub.name AS subject_name, p.marks, p.created_at \
     FROM progress_sheets p \
     JOIN students s ON p.student_id = s.id \
     JOIN exams e ON p.exam_id = e.id \
     JOIN subjects sub ON p.subject_id = sub.id";

impl ProgressSheet {
    pub async fn create(
        db: &SqlitePool,
        student_id: Uuid,
        exam_id: Uuid,
        subject_id: Uuid,
        marks: i64,
    ) -> Result<(), MarkSaveError> {
        if !(0..=100).contains(&marks) {
            return Err(MarkSaveError::MarksOutOfRange);
        }

        let now = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO progress_sheets \
             (id, student_id, exam_id, subject_id, marks, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(exam_id)
        .bind(subject_id)
        .bind(marks)
        .bind(now)
        .bind(now)
        .execute(db)
        .await
        .map_err(|err| {
            if models::is_unique_violation(&err) {
                MarkSaveError::Duplicate
            } else {
                MarkSaveError::Db(err)
            }
        })?;

        Ok(())
    }

    pub async fn listing(
        db: &SqlitePool,
        exam_type: Option<ExamType>,
        sort: ProgressSort,
    ) -> sqlx::Result<Vec<ProgressRow>> {
        let order = sort.column();

        match exam_type {
            Some(exam_type) => {
                sqlx::query_as::<_, ProgressRow>(&format!(
                    "{LISTING} WHERE e.exam_type = ? ORDER BY {order}"
                ))
                .bind(exam_type)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, ProgressRow>(&format!("{LISTING} ORDER BY {order}"))
                    .fetch_all(db)
                    .await
            }
        }
    }

    pub async fn recent(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ProgressRow>> {
        sqlx::query_as::<_, ProgressRow>(&format!(
            "{LISTING} ORDER BY p.created_at DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(db)
        .await
    }

    /// Every mark of the given exam type, one row per progress sheet.
    pub async fn marks_for_exam_type(
        db: &SqlitePool,
        exam_type: ExamType,
    ) -> sqlx::Result<Vec<MarkRecord>> {
        sqlx::query_as::<_, MarkRecord>(
            "SELECT s.id AS student_id, s.full_name, s.roll_number, p.marks \
             FROM progress_sheets p \
             JOIN students s ON p.student_id = s.id \
             JOIN exams e ON p.exam_id = e.id \
             WHERE e.exam_type = ?",
        )
        .bind(exam_type)
        .fetch_all(db)
        .await
    }
}
