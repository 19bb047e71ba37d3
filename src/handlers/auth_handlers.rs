use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiError, BackendClient};
use crate::auth::{csrf, validate};
use crate::auth::session::{get_credentials, sign_in, take_notices};
use crate::errors::{AppError, render, see_other};
use crate::templates_structs::{LoginTemplate, SessionExpiredTemplate};
use crate::workflow::notice::{LOGIN_PATH, LOGIN_REDIRECT_DELAY};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, error: Option<String>, email: &str) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error,
        email: email.to_string(),
        csrf_token: csrf::get_or_create_token(session),
        notices: take_notices(session).notices().to_vec(),
    };
    render(tmpl)
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    login_form(&session, None, "")
}

pub async fn login_submit(
    client: web::Data<BackendClient>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let email = form.email.trim();
    if let Some(err) = validate::validate_email(email)
        .or_else(|| validate::validate_required(&form.password, "Password", 128))
    {
        return login_form(&session, Some(err), email);
    }

    match client.login(email, &form.password).await {
        Ok((profile, credentials)) => {
            sign_in(&session, &credentials, profile.display_name())?;
            log::info!("admin '{}' signed in", profile.display_name());
            Ok(see_other("/faculties"))
        }
        Err(ApiError::Unauthorized) => {
            login_form(&session, Some("Invalid credentials".to_string()), email)
        }
        Err(e) => {
            log::warn!("login failed: {e:?}");
            login_form(&session, Some(e.to_string()), email)
        }
    }
}

pub async fn logout(
    client: web::Data<BackendClient>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Err(e) = client.session(get_credentials(&session)).logout().await {
        log::warn!("backend logout failed: {e}");
    }
    session.purge();
    Ok(see_other(LOGIN_PATH))
}

/// Interstitial shown after a 401: the toast, then a timed hop to login.
pub async fn session_expired(session: Session) -> Result<HttpResponse, AppError> {
    let notes = take_notices(&session);
    let (redirect_to, delay_ms) = match notes.redirect() {
        Some(r) => (r.to.clone(), r.after_ms),
        None => (LOGIN_PATH.to_string(), LOGIN_REDIRECT_DELAY.as_millis() as u64),
    };
    let tmpl = SessionExpiredTemplate {
        notices: notes.notices().to_vec(),
        redirect_to,
        delay_secs: delay_ms.div_ceil(1000),
    };
    render(tmpl)
}
