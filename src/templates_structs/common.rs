use askama::Template;

use crate::workflow::Notice;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
    pub roles: Vec<RoleCard>,
}

pub struct RoleCard {
    pub title: &'static str,
    pub css_class: &'static str,
    pub summary: &'static str,
}

impl RoleCard {
    pub fn all() -> Vec<RoleCard> {
        vec![
            RoleCard {
                title: "Admin",
                css_class: "role-admin",
                summary: "Manage users, create events, assign faculty, and configure platform-wide settings.",
            },
            RoleCard {
                title: "Faculty",
                css_class: "role-faculty",
                summary: "View assigned events, track participation, and manage student attendance.",
            },
            RoleCard {
                title: "Student",
                css_class: "role-student",
                summary: "Discover, register, and attend events. Track your participation and engagement.",
            },
        ]
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
    pub csrf_token: String,
    pub notices: Vec<Notice>,
}

#[derive(Template)]
#[template(path = "session_expired.html")]
pub struct SessionExpiredTemplate {
    pub notices: Vec<Notice>,
    pub redirect_to: String,
    pub delay_secs: u64,
}
