use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use student_progress::models::{Exam, ExamType, MarkSaveError, ProgressSheet, Student, Subject};
use student_progress::ranking;
use uuid::Uuid;

struct Fixture {
    db: SqlitePool,
    student_id: Uuid,
    exam_id: Uuid,
    subject_ids: Vec<Uuid>,
}

async fn fixture() -> Fixture {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("migrations");

    let student_id = Uuid::new_v4();
    Student::create(
        &db,
        student_id,
        None,
        "Mina Patel",
        "mina@example.com",
        "R-001",
        "10-A",
        NaiveDate::from_ymd_opt(2009, 4, 12).expect("valid date"),
    )
    .await
    .expect("insert student");

    let exam_id = Uuid::new_v4();
    Exam::create(
        &db,
        exam_id,
        ExamType::Midterm,
        "Midterm Exam",
        NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date"),
    )
    .await
    .expect("insert exam");

    let mut subject_ids = Vec::new();
    for name in ["Mathematics", "Science", "English"] {
        let id = Uuid::new_v4();
        Subject::create(&db, id, name).await.expect("insert subject");
        subject_ids.push(id);
    }

    Fixture {
        db,
        student_id,
        exam_id,
        subject_ids,
    }
}

#[tokio::test]
async fn marks_outside_range_are_rejected() {
    let f = fixture().await;

    for marks in [-1, 101, 1000] {
        let result =
            ProgressSheet::create(&f.db, f.student_id, f.exam_id, f.subject_ids[0], marks).await;
        assert!(matches!(result, Err(MarkSaveError::MarksOutOfRange)));
    }

    for (i, marks) in [0, 100].into_iter().enumerate() {
        ProgressSheet::create(&f.db, f.student_id, f.exam_id, f.subject_ids[i], marks)
            .await
            .expect("boundary marks are valid");
    }
}

#[tokio::test]
async fn check_constraint_backs_up_model_validation() {
    let f = fixture().await;

    let result = sqlx::query(
        "INSERT INTO progress_sheets \
         (id, student_id, exam_id, subject_id, marks, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 250, '2026-01-01 00:00:00', '2026-01-01 00:00:00')",
    )
    .bind(Uuid::new_v4())
    .bind(f.student_id)
    .bind(f.exam_id)
    .bind(f.subject_ids[0])
    .execute(&f.db)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn duplicate_triple_is_rejected() {
    let f = fixture().await;

    ProgressSheet::create(&f.db, f.student_id, f.exam_id, f.subject_ids[0], 80)
        .await
        .expect("first entry");

    let result = ProgressSheet::create(&f.db, f.student_id, f.exam_id, f.subject_ids[0], 90).await;
    assert!(matches!(result, Err(MarkSaveError::Duplicate)));

    // a different subject for the same student and exam is fine
    ProgressSheet::create(&f.db, f.student_id, f.exam_id, f.subject_ids[1], 90)
        .await
        .expect("different subject");
}

#[tokio::test]
async fn duplicate_exam_type_and_subject_name_are_rejected() {
    let f = fixture().await;

    let result = Exam::create(
        &f.db,
        Uuid::new_v4(),
        ExamType::Midterm,
        "Second Midterm",
        NaiveDate::from_ymd_opt(2026, 7, 1).expect("valid date"),
    )
    .await;
    assert!(result.is_err());

    assert!(Subject::create(&f.db, Uuid::new_v4(), "Mathematics")
        .await
        .is_err());
}

#[tokio::test]
async fn ranking_uses_only_the_selected_exam_type() {
    let f = fixture().await;

    for (subject, marks) in f.subject_ids.iter().zip([80, 90, 70]) {
        ProgressSheet::create(&f.db, f.student_id, f.exam_id, *subject, marks)
            .await
            .expect("midterm mark");
    }

    // marks under another exam type must not leak into the midterm ranking
    let quarterly_id = Uuid::new_v4();
    Exam::create(
        &f.db,
        quarterly_id,
        ExamType::Quarterly,
        "Quarterly Exam",
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date"),
    )
    .await
    .expect("insert exam");
    ProgressSheet::create(&f.db, f.student_id, quarterly_id, f.subject_ids[0], 5)
        .await
        .expect("quarterly mark");

    let records = ProgressSheet::marks_for_exam_type(&f.db, ExamType::Midterm)
        .await
        .expect("marks");
    let entries = ranking::rank(records);

    assert_eq!(entries.len(), 1);
    assert!((entries[0].average - 80.0).abs() < f64::EPSILON);
    assert_eq!(entries[0].total, 240);
    assert_eq!(entries[0].subjects, 3);

    let other = ProgressSheet::marks_for_exam_type(&f.db, ExamType::EndTerm)
        .await
        .expect("marks");
    assert!(ranking::rank(other).is_empty());
}
