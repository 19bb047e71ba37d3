use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Delay before an expired session is sent to the login page.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Success => "toast-success",
            Level::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: String,
    pub after_ms: u64,
}

/// Toasts raised during one interaction plus at most one pending redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    notices: Vec<Notice>,
    redirect: Option<Redirect>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notices.push(Notice { level: Level::Success, message: message.into() });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice { level: Level::Error, message: message.into() });
    }

    /// Shared session/error handler: 401 schedules the login redirect,
    /// anything else is shown as is.
    pub fn report(&mut self, err: &ApiError) {
        if err.is_unauthorized() {
            self.session_expired();
        } else {
            self.error(err.to_string());
        }
    }

    /// Schedules the login redirect once; repeated expiries are no-ops.
    pub fn session_expired(&mut self) {
        if self.redirect.is_some() {
            return;
        }
        self.error(ApiError::Unauthorized.to_string());
        self.redirect = Some(Redirect {
            to: LOGIN_PATH.to_string(),
            after_ms: LOGIN_REDIRECT_DELAY.as_millis() as u64,
        });
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    pub fn redirect_scheduled(&self) -> bool {
        self.redirect.is_some()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && self.redirect.is_none()
    }

    /// Fold notices carried over from a previous request in front of ours.
    pub fn absorb(&mut self, earlier: Notifications) {
        let mut notices = earlier.notices;
        notices.append(&mut self.notices);
        self.notices = notices;
        if self.redirect.is_none() {
            self.redirect = earlier.redirect;
        }
    }
}
