use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::contracts::Catalog;
use crate::errors::{AppError, render};
use crate::session::registry::DraftRegistry;
use crate::session::{csrf, session_key};
use crate::templates_structs::{ContractCard, DashboardTemplate, PageContext};

/// GET /dashboard - one card per red-flagged contract.
pub async fn index(
    session: Session,
    catalog: web::Data<Catalog>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config);
    let cards = catalog.all().iter().map(ContractCard::from).collect();
    render(DashboardTemplate { ctx, cards })
}

#[derive(Deserialize)]
pub struct SelectForm {
    pub csrf_token: String,
}

/// POST /seleccionar/{contract_id} - prefill the session's draft, then go to the report form.
///
/// The import finishes before the redirect is sent, so the form never renders
/// an unpopulated draft.
pub async fn select(
    path: web::Path<String>,
    session: Session,
    form: web::Form<SelectForm>,
    catalog: web::Data<Catalog>,
    registry: web::Data<DraftRegistry>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let contract_id = path.into_inner();
    let contract = catalog.find(&contract_id).ok_or(AppError::NotFound)?;

    let key = session_key(&session)?;
    let context = contract.context();
    registry
        .open(&key)
        .with(|store| store.import_context(&context));
    log::info!("Session {key} selected contract {contract_id}");

    Ok(super::see_other(&config.url("denunciar")))
}
