use serde::{Deserialize, Serialize};

use super::record::nullable_string;

/// The signed-in administrator as reported by `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
}

impl AdminProfile {
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() { &self.email } else { &self.username }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
