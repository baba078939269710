mod admin;
mod auth;
mod dashboard;
mod progress;
mod ranking;
mod student;

pub use admin::{AddExamPage, AddSubjectPage};
pub use auth::{LoginPage, RegisterPage, VerifyOtpPage};
pub use dashboard::DashboardPage;
pub use progress::{AddProgressPage, ProgressSheetPage};
pub use ranking::RankingPage;
pub use student::{AddStudentPage, DeleteStudentPage, EditStudentPage, StudentListPage};
