use askama::Template;

use crate::flash::Flash;
use crate::models::Student;

#[derive(Template)]
#[template(path = "student_list.html")]
pub struct StudentListPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub students: Vec<Student>,
    pub search_query: String,
    pub sort_by: &'static str,
}

#[derive(Template)]
#[template(path = "add_student.html")]
pub struct AddStudentPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "edit_student.html")]
pub struct EditStudentPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub student: Student,
}

#[derive(Template)]
#[template(path = "delete_student.html")]
pub struct DeleteStudentPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub student: Student,
}
