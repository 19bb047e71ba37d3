use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use activity_admin::api::BackendClient;
use activity_admin::auth::in_flight::InFlight;
use activity_admin::config::Config;
use activity_admin::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let secret_key = config.session_key();

    let client = BackendClient::new(&config.backend_url, config.backend_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let in_flight = InFlight::new();

    log::info!(
        "Starting server at http://{} (backend {}, timeout {:?})",
        config.bind_addr,
        client.base_url(),
        config.backend_timeout
    );

    let cookie_secure = config.cookie_secure;
    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(in_flight.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
