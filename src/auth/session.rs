use actix_session::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::Credentials;
use crate::auth::csrf;
use crate::errors::AppError;
use crate::workflow::Notifications;

const CREDENTIALS_KEY: &str = "backend_cookie";
const ADMIN_NAME_KEY: &str = "admin_name";
const NOTICES_KEY: &str = "notices";
const BROWSER_ID_KEY: &str = "browser_id";

pub fn get_credentials(session: &Session) -> Option<Credentials> {
    session.get::<Credentials>(CREDENTIALS_KEY).unwrap_or(None)
}

pub fn sign_in(session: &Session, credentials: &Credentials, admin_name: &str) -> Result<(), AppError> {
    session.renew();
    session.insert(CREDENTIALS_KEY, credentials)?;
    session.insert(ADMIN_NAME_KEY, admin_name)?;
    session.insert(BROWSER_ID_KEY, csrf::generate_token())?;
    Ok(())
}

pub fn get_admin_name(session: &Session) -> Option<String> {
    session.get::<String>(ADMIN_NAME_KEY).unwrap_or(None)
}

/// Per-browser id for the in-flight registry, fixed at sign-in.
pub fn browser_id(session: &Session) -> Option<String> {
    session.get::<String>(BROWSER_ID_KEY).ok().flatten()
}

/// Notices queued by the previous request, removed from the session.
pub fn take_notices(session: &Session) -> Notifications {
    let notes = session.get::<Notifications>(NOTICES_KEY).unwrap_or(None);
    if notes.is_some() {
        session.remove(NOTICES_KEY);
    }
    notes.unwrap_or_default()
}

/// Queue notices for the page the browser is about to be redirected to.
pub fn queue_notices(session: &Session, notes: &Notifications) -> Result<(), AppError> {
    if notes.is_empty() {
        return Ok(());
    }
    let mut merged = notes.clone();
    merged.absorb(take_notices(session));
    session.insert(NOTICES_KEY, &merged)?;
    Ok(())
}

/// Page workflow state (open modal, draft); absent or unreadable state
/// starts fresh.
pub fn load_state<T: DeserializeOwned + Default>(session: &Session, key: &str) -> T {
    match session.get::<T>(key) {
        Ok(Some(state)) => state,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("discarding unreadable session state '{key}': {e}");
            session.remove(key);
            T::default()
        }
    }
}

pub fn save_state<T: Serialize>(session: &Session, key: &str, state: &T) -> Result<(), AppError> {
    session.insert(key, state)?;
    Ok(())
}
