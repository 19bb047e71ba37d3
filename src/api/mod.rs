//! Session-aware access to the portal's REST backend.
//!
//! Workflows only see the [`AdminApi`] trait, so tests can swap the
//! reqwest-backed [`client::BackendSession`] for an in-memory fake.

pub mod classify;
pub mod client;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AdminProfile, Collection, Record};

pub use self::client::{BackendClient, BackendSession};

/// Query parameter the faculty delete endpoint takes for reassignment.
pub const REPLACEMENT_PARAM: &str = "replacementFacultyId";

/// Fallback text when the backend gives no usable message.
pub const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 from any admin endpoint.
    Unauthorized,
    /// The delete target still owns dependent records.
    DependencyConflict {
        resource: Collection,
        message: String,
        dependents: Option<u32>,
    },
    NotFound(String),
    Rejected { status: u16, message: String },
    Timeout,
    Transport(String),
    /// The backend answered 2xx with a body that breaks its contract.
    MalformedResponse { endpoint: String, detail: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Session expired. Redirecting to login..."),
            ApiError::DependencyConflict { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Rejected { message, .. }
            | ApiError::Transport(message) => {
                if message.trim().is_empty() {
                    f.write_str(GENERIC_ERROR)
                } else {
                    f.write_str(message.trim())
                }
            }
            ApiError::Timeout => write!(f, "The server took too long to respond"),
            ApiError::MalformedResponse { endpoint, .. } => {
                write!(f, "Received unexpected data from {endpoint}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Backend session cookie in `name=value` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials(pub String);

impl Credentials {
    /// Keep only the `name=value` pair of a `Set-Cookie` header.
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let pair = header.split(';').next()?.trim();
        if pair.is_empty() || !pair.contains('=') {
            return None;
        }
        Some(Credentials(pair.to_string()))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

/// The request capability every admin workflow is written against.
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    /// Identity check (`GET /me`).
    async fn me(&self) -> Result<AdminProfile, ApiError>;

    async fn list<R: Record>(&self) -> Result<Vec<R>, ApiError>;

    async fn update<R: Record>(&self, record: &R) -> Result<(), ApiError>;

    /// Delete `id`, optionally handing its dependents to `replacement`.
    async fn delete(
        &self,
        collection: Collection,
        id: i64,
        replacement: Option<i64>,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_strip_cookie_attributes() {
        let c = Credentials::from_set_cookie("JSESSIONID=abc123; Path=/; HttpOnly").expect("cookie");
        assert_eq!(c.header_value(), "JSESSIONID=abc123");
        assert!(Credentials::from_set_cookie("; Path=/").is_none());
    }

    #[test]
    fn empty_backend_message_uses_fallback() {
        let e = ApiError::Rejected { status: 500, message: "  ".to_string() };
        assert_eq!(e.to_string(), GENERIC_ERROR);
        let e = ApiError::Rejected { status: 400, message: "Email already exists".to_string() };
        assert_eq!(e.to_string(), "Email already exists");
    }
}
