use askama::Template;

use crate::flash::Flash;
use crate::models::ExamType;

#[derive(Template)]
#[template(path = "add_exam.html")]
pub struct AddExamPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub exam_types: Vec<ExamType>,
}

#[derive(Template)]
#[template(path = "add_subject.html")]
pub struct AddSubjectPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,
}
