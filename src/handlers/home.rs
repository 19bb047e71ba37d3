use actix_session::Session;
use actix_web::HttpResponse;

use crate::auth::session::get_credentials;
use crate::errors::{AppError, render};
use crate::templates_structs::{HomeTemplate, RoleCard};

pub async fn index(session: Session) -> Result<HttpResponse, AppError> {
    let tmpl = HomeTemplate {
        signed_in: get_credentials(&session).is_some(),
        roles: RoleCard::all(),
    };
    render(tmpl)
}
