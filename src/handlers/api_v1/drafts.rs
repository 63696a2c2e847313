use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::report::{ContractContext, DraftField, DraftStore};
use crate::session::registry::DraftRegistry;
use crate::session::{existing_session_key, session_key};

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub field: String,
    pub value: String,
}

/// GET /api/v1/draft - current draft with its validity flag
/// Sessions that never edited get a pristine draft; nothing is registered.
pub async fn read(
    session: Session,
    registry: web::Data<DraftRegistry>,
) -> Result<HttpResponse, AppError> {
    let snapshot = match existing_session_key(&session).and_then(|key| registry.get(&key)) {
        Some(handle) => handle.with(|store| store.snapshot()),
        None => DraftStore::new().snapshot(),
    };
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/v1/draft/fields - overwrite one field
/// Body: {"field": "contractId", "value": "CO1.PCCNTR.123456"}
pub async fn set_field(
    session: Session,
    registry: web::Data<DraftRegistry>,
    body: web::Json<SetFieldRequest>,
) -> Result<HttpResponse, AppError> {
    let field: DraftField = body.field.parse()?;
    let key = session_key(&session)?;
    let snapshot = registry.open(&key).with(|store| {
        store.set(field, body.value.as_str());
        store.snapshot()
    });
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/v1/draft/context - prefill from a selected contract
pub async fn import_context(
    session: Session,
    registry: web::Data<DraftRegistry>,
    body: web::Json<ContractContext>,
) -> Result<HttpResponse, AppError> {
    let key = session_key(&session)?;
    let snapshot = registry.open(&key).with(|store| {
        store.import_context(&body);
        store.snapshot()
    });
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/v1/draft/reset
pub async fn reset(
    session: Session,
    registry: web::Data<DraftRegistry>,
) -> Result<HttpResponse, AppError> {
    let key = session_key(&session)?;
    let snapshot = registry.open(&key).with(|store| {
        store.reset();
        store.snapshot()
    });
    Ok(HttpResponse::Ok().json(snapshot))
}
