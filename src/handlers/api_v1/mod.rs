pub mod drafts;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

/// Every write under `/api/v1/draft` is a POST carrying a JSON body. A plain
/// HTML form cannot send `application/json` cross-site, so insisting on it
/// keeps the draft endpoints out of reach of forged form posts.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if *req.method() == actix_web::http::Method::POST {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Draft updates must be sent as application/json"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draft")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(drafts::read))
            .route("/fields", web::post().to(drafts::set_field))
            .route("/context", web::post().to(drafts::import_context))
            .route("/reset", web::post().to(drafts::reset))
    );
}
