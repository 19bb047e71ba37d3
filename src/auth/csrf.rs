//! Per-session form tokens. Every admin POST carries the token rendered
//! into its page; a mismatch ends the request with 403.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";

/// Token bytes before hex encoding.
const TOKEN_BYTES: usize = 32;

fn stored_token(session: &Session) -> Option<String> {
    session
        .get::<String>(CSRF_KEY)
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

/// The session's form token, minted on first use.
pub fn get_or_create_token(session: &Session) -> String {
    if let Some(token) = stored_token(session) {
        return token;
    }
    let token = generate_token();
    if let Err(e) = session.insert(CSRF_KEY, &token) {
        log::warn!("could not store form token: {e}");
    }
    token
}

/// Accept the post only if `submitted` equals the session's token.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    match stored_token(session) {
        Some(expected) if tokens_match(&expected, submitted) => Ok(()),
        Some(_) => {
            log::warn!("rejected form post with a mismatched token");
            Err(AppError::Csrf)
        }
        None => {
            log::warn!("rejected form post from a session without a token");
            Err(AppError::Csrf)
        }
    }
}

/// Random hex string; form tokens and browser ids both come from here.
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

/// Compares every byte even after a mismatch, so timing does not reveal
/// how much of a guessed token was right.
fn tokens_match(expected: &str, submitted: &str) -> bool {
    let (a, b) = (expected.as_bytes(), submitted.as_bytes());
    let diff = a
        .iter()
        .zip(b)
        .fold(a.len() ^ b.len(), |acc, (x, y)| acc | usize::from(x ^ y));
    diff == 0
}
