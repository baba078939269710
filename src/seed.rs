//! Inserts the default subjects and exams if they are not present yet.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::ExamType;

const DEFAULT_SUBJECTS: [&str; 8] = [
    "Mathematics",
    "Science",
    "English",
    "History",
    "Geography",
    "Physics",
    "Chemistry",
    "Biology",
];

const DEFAULT_EXAMS: [(ExamType, &str, &str); 4] = [
    (ExamType::Quarterly, "Quarterly Exam", "2026-03-15"),
    (ExamType::Midterm, "Midterm Exam", "2026-06-15"),
    (ExamType::Model, "Model Exam", "2026-09-15"),
    (ExamType::EndTerm, "End-Term Exam", "2026-12-15"),
];

pub async fn initial_data(db: &SqlitePool) -> sqlx::Result<()> {
    for name in DEFAULT_SUBJECTS {
        sqlx::query("INSERT INTO subjects (id, name) VALUES (?, ?) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(db)
            .await?;
    }

    for (exam_type, name, date) in DEFAULT_EXAMS {
        sqlx::query(
            "INSERT INTO exams (id, exam_type, name, date) VALUES (?, ?, ?, ?) \
             ON CONFLICT (exam_type) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(exam_type)
        .bind(name)
        .bind(date)
        .execute(db)
        .await?;
    }

    tracing::info!("default subjects and exams ensured");

    Ok(())
}
