use askama::Template;

use crate::models::StudentRecord;
use super::PageContext;

#[derive(Template)]
#[template(path = "students/list.html")]
pub struct StudentListTemplate {
    pub ctx: PageContext,
    pub loading: bool,
    pub rows: Vec<StudentRecord>,
    pub confirm_id: Option<i64>,
    pub draft: Option<StudentRecord>,
}
