pub use exam::{Exam, ExamType};
pub use progress_sheet::{MarkSaveError, ProgressRow, ProgressSheet, ProgressSort};
pub use student::{OtpOutcome, Student, StudentSort};
pub use subject::Subject;
pub use user::User;

mod exam;
mod progress_sheet;
mod student;
mod subject;
mod user;

/// True when the error is a violated UNIQUE constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
