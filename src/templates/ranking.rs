use askama::Template;

use crate::flash::Flash;
use crate::models::ExamType;
use crate::ranking::RankingEntry;

#[derive(Template)]
#[template(path = "ranking.html")]
pub struct RankingPage {
    pub user_name: String,
    pub flashes: Vec<Flash>,

    pub entries: Vec<RankingEntry>,
    pub selected_exam_type: ExamType,
    pub exam_types: Vec<ExamType>,
}
