pub mod auth_handlers;
pub mod faculty_handlers;
pub mod home;
pub mod records;
pub mod student_handlers;

use actix_web::{middleware, web};

use crate::auth::middleware::require_backend_session;

/// Page routes. Fixed paths come before `/{id}` paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::index))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/session-expired", web::get().to(auth_handlers::session_expired));
    cfg.service(
        web::scope("")
            .wrap(middleware::from_fn(require_backend_session))
            .route("/logout", web::post().to(auth_handlers::logout))
            .route("/faculties", web::get().to(faculty_handlers::list))
            .route("/faculties/edit", web::post().to(faculty_handlers::update))
            .route("/faculties/edit/cancel", web::post().to(faculty_handlers::cancel_edit))
            .route("/faculties/delete/confirm", web::post().to(faculty_handlers::confirm_delete))
            .route("/faculties/delete/reassign", web::post().to(faculty_handlers::reassign))
            .route("/faculties/delete/cancel", web::post().to(faculty_handlers::cancel_delete))
            .route("/faculties/{id}/edit", web::post().to(faculty_handlers::edit))
            .route("/faculties/{id}/delete", web::post().to(faculty_handlers::delete))
            .route("/students", web::get().to(student_handlers::list))
            .route("/students/edit", web::post().to(student_handlers::update))
            .route("/students/edit/cancel", web::post().to(student_handlers::cancel_edit))
            .route("/students/delete/confirm", web::post().to(student_handlers::confirm_delete))
            .route("/students/delete/cancel", web::post().to(student_handlers::cancel_delete))
            .route("/students/{id}/edit", web::post().to(student_handlers::edit))
            .route("/students/{id}/delete", web::post().to(student_handlers::delete)),
    );
}
