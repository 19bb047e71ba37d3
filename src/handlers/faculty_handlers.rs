use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::BackendClient;
use crate::auth::csrf;
use crate::auth::in_flight::InFlight;
use crate::auth::validate::parse_optional_id;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::records::{self, form_csrf};
use crate::models::{Collection, FacultyRecord};
use crate::templates_structs::{FacultyListTemplate, PageContext, ReplacementOption};
use crate::workflow::{DeleteState, Notifications};

#[derive(Deserialize)]
pub struct ReassignForm {
    pub csrf_token: String,
    #[serde(default)]
    pub replacement_id: String,
}

pub async fn list(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let page = match records::load_page::<FacultyRecord>(&client, &session).await? {
        Ok(page) => page,
        Err(redirect) => return Ok(redirect),
    };

    let (loading, rows) = page.rows();
    let state = page.delete.state();
    let (confirm_id, reassign_id, selected) = match state {
        DeleteState::Idle => (None, None, None),
        DeleteState::ConfirmPending { id } => (Some(id), None, None),
        DeleteState::ReassignPending { id, replacement } => (None, Some(id), replacement),
    };
    let replacement_options = page
        .delete
        .replacement_options(page.loader.records())
        .into_iter()
        .map(|f| ReplacementOption::new(f, selected))
        .collect();

    let tmpl = FacultyListTemplate {
        ctx: PageContext::build(&session, &page.admin_name, "/faculties", &page.notes),
        loading,
        rows,
        confirm_id,
        reassign_id,
        replacement_options,
        draft: page.editor.draft().cloned(),
    };
    render(tmpl)
}

pub async fn edit(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::begin_edit::<FacultyRecord>(&client, &session, path.into_inner()).await
}

pub async fn update(
    client: web::Data<BackendClient>,
    in_flight: web::Data<InFlight>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, form_csrf(&form))?;
    records::submit_edit::<FacultyRecord>(&client, &in_flight, &session, &form).await
}

pub async fn cancel_edit(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::cancel_edit::<FacultyRecord>(&session)
}

pub async fn delete(
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::request_delete::<FacultyRecord>(&session, path.into_inner())
}

pub async fn confirm_delete(
    client: web::Data<BackendClient>,
    in_flight: web::Data<InFlight>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::confirm_delete::<FacultyRecord>(&client, &in_flight, &session).await
}

pub async fn reassign(
    client: web::Data<BackendClient>,
    in_flight: web::Data<InFlight>,
    session: Session,
    form: web::Form<ReassignForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let replacement = match parse_optional_id(&form.replacement_id) {
        Ok(id) => id,
        Err(msg) => {
            let mut notes = Notifications::new();
            notes.error(msg);
            return records::finish(&session, &notes, Collection::Faculties);
        }
    };
    records::reassign_delete::<FacultyRecord>(&client, &in_flight, &session, replacement).await
}

pub async fn cancel_delete(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::cancel_delete::<FacultyRecord>(&session)
}
