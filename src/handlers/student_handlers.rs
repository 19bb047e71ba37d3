use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::BackendClient;
use crate::auth::csrf;
use crate::auth::in_flight::InFlight;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::records::{self, form_csrf};
use crate::models::StudentRecord;
use crate::templates_structs::{PageContext, StudentListTemplate};

pub async fn list(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let page = match records::load_page::<StudentRecord>(&client, &session).await? {
        Ok(page) => page,
        Err(redirect) => return Ok(redirect),
    };

    let (loading, rows) = page.rows();
    let tmpl = StudentListTemplate {
        ctx: PageContext::build(&session, &page.admin_name, "/students", &page.notes),
        loading,
        rows,
        confirm_id: page.delete.state().target(),
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
    records::begin_edit::<StudentRecord>(&client, &session, path.into_inner()).await
}

pub async fn update(
    client: web::Data<BackendClient>,
    in_flight: web::Data<InFlight>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, form_csrf(&form))?;
    records::submit_edit::<StudentRecord>(&client, &in_flight, &session, &form).await
}

pub async fn cancel_edit(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::cancel_edit::<StudentRecord>(&session)
}

pub async fn delete(
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::request_delete::<StudentRecord>(&session, path.into_inner())
}

pub async fn confirm_delete(
    client: web::Data<BackendClient>,
    in_flight: web::Data<InFlight>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::confirm_delete::<StudentRecord>(&client, &in_flight, &session).await
}

pub async fn cancel_delete(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    records::cancel_delete::<StudentRecord>(&session)
}
