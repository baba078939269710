use askama::Template;

use crate::flash::Flash;
use crate::models::ProgressRow;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub total_students: i64,
    pub total_exams: i64,
    pub total_subjects: i64,

    pub recent_progress: Vec<ProgressRow>,
}
