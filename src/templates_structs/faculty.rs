use askama::Template;

use crate::models::{FacultyRecord, Record};
use super::PageContext;

#[derive(Template)]
#[template(path = "faculties/list.html")]
pub struct FacultyListTemplate {
    pub ctx: PageContext,
    pub loading: bool,
    pub rows: Vec<FacultyRecord>,
    /// Plain delete confirmation open for this id.
    pub confirm_id: Option<i64>,
    /// Reassign-and-delete prompt open for this id.
    pub reassign_id: Option<i64>,
    pub replacement_options: Vec<ReplacementOption>,
    pub draft: Option<FacultyRecord>,
}

/// One `<option>` of the replacement select.
pub struct ReplacementOption {
    pub id: i64,
    pub label: String,
    pub selected: bool,
}

impl ReplacementOption {
    pub fn new(record: &FacultyRecord, selected: Option<i64>) -> Self {
        Self {
            id: record.id,
            label: record.label(),
            selected: selected == Some(record.id),
        }
    }
}
