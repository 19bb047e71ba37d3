use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::auth::session::get_credentials;
use crate::workflow::notice::LOGIN_PATH;

/// Sends browsers without a backend session cookie straight to the login
/// page. Whether the cookie is still valid is the session guard's job.
pub async fn require_backend_session(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();

    if get_credentials(&session).is_none() {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
