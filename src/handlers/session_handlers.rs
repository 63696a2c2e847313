use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::session::registry::DraftRegistry;
use crate::session::{csrf, existing_session_key};

#[derive(Deserialize)]
pub struct CloseForm {
    pub csrf_token: String,
}

/// POST /sesion/cerrar - end the editing session and drop its draft.
pub async fn close(
    session: Session,
    form: web::Form<CloseForm>,
    registry: web::Data<DraftRegistry>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if let Some(key) = existing_session_key(&session) {
        registry.discard(&key);
    }
    session.purge();

    Ok(super::see_other(&config.url("dashboard")))
}
