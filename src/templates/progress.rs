use askama::Template;

use crate::flash::Flash;
use crate::models::{Exam, ProgressRow, Student, Subject};

#[derive(Template)]
#[template(path = "progress_sheet.html")]
pub struct ProgressSheetPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub sheets: Vec<ProgressRow>,
    pub exams: Vec<Exam>,
    pub selected_exam_type: &'static str,
    pub sort_by: &'static str,
}

#[derive(Template)]
#[template(path = "add_progress_sheet.html")]
pub struct AddProgressPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub students: Vec<Student>,
    pub exams: Vec<Exam>,
    pub subjects: Vec<Subject>,
}
