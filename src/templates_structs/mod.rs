// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::workflow::{Notice, Notifications};

mod common;
mod faculty;
mod student;

pub use self::common::{HomeTemplate, LoginTemplate, RoleCard, SessionExpiredTemplate};
pub use self::faculty::{FacultyListTemplate, ReplacementOption};
pub use self::student::StudentListTemplate;

/// Common context shared by all signed-in pages.
/// Templates access these as `ctx.admin_name`, `ctx.notices`, etc.
pub struct PageContext {
    pub admin_name: String,
    pub avatar_initial: String,
    pub csrf_token: String,
    pub current_path: String,
    pub notices: Vec<Notice>,
}

impl PageContext {
    pub fn build(session: &Session, admin_name: &str, current_path: &str, notes: &Notifications) -> Self {
        let avatar_initial = admin_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            admin_name: admin_name.to_string(),
            avatar_initial,
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
            notices: notes.notices().to_vec(),
        }
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}
