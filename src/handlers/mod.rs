pub mod api_v1;
pub mod dashboard;
pub mod report_handlers;
pub mod session_handlers;

use actix_web::{web, HttpResponse};

use crate::config::AppConfig;

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// GET / - the dashboard is the landing page.
pub async fn root(config: web::Data<AppConfig>) -> HttpResponse {
    see_other(&config.url("dashboard"))
}

pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
