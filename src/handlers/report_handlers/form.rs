use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::{AppError, render, render_with_status};
use crate::handlers::see_other;
use crate::report::validate::contract_id_error;
use crate::report::draft::NO_SELECTION;
use crate::report::{DraftField, DraftStore, ReportDraft};
use crate::session::registry::DraftRegistry;
use crate::session::{csrf, existing_session_key, session_key, set_flash};
use crate::templates_structs::{PageContext, ReportFormView, ReportTemplate};

#[derive(Deserialize)]
pub struct ReportForm {
    pub action: String, // "update", "reset", "send"
    pub csrf_token: String,
    pub contract_id: Option<String>,
    pub irregularity_type: Option<String>,
    pub description: Option<String>,
}

impl ReportForm {
    /// Copy the submitted fields into the draft. Absent fields are left alone;
    /// an empty category puts the placeholder back.
    fn apply(&self, store: &mut DraftStore) {
        if let Some(contract_id) = &self.contract_id {
            store.set(DraftField::ContractId, contract_id.as_str());
        }
        if let Some(kind) = self.irregularity_type.as_deref() {
            let kind = if kind.is_empty() { NO_SELECTION } else { kind };
            store.set(DraftField::IrregularityType, kind);
        }
        if let Some(description) = &self.description {
            store.set(DraftField::Description, description.as_str());
        }
    }
}

/// GET /denunciar
///
/// Read-only: a session without a draft sees a pristine form, and no draft is
/// created until the first edit.
pub async fn form(
    session: Session,
    registry: web::Data<DraftRegistry>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let form = match existing_session_key(&session).and_then(|key| registry.get(&key)) {
        Some(handle) => handle.with(|store| ReportFormView::from_draft(store.draft())),
        None => ReportFormView::from_draft(&ReportDraft::new()),
    };
    let ctx = PageContext::build(&session, &config);
    render(ReportTemplate { ctx, form, errors: vec![] })
}

/// POST /denunciar
pub async fn submit(
    session: Session,
    form: web::Form<ReportForm>,
    registry: web::Data<DraftRegistry>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let key = session_key(&session)?;
    let handle = registry.open(&key);

    match form.action.as_str() {
        "update" => {
            handle.with(|store| form.apply(store));
            set_flash(&session, "Borrador guardado");
            Ok(see_other(&config.url("denunciar")))
        }
        "reset" => {
            handle.with(|store| store.reset());
            set_flash(&session, "Borrador reiniciado");
            Ok(see_other(&config.url("denunciar")))
        }
        "send" => {
            let outcome = handle.with(|store| {
                form.apply(store);
                let draft = store.draft();
                if draft.is_valid() {
                    Ok(mailto_link(draft, config.report_email_to.as_deref()))
                } else {
                    Err((
                        ReportFormView::from_draft(draft),
                        contract_id_error(draft.contract_id()),
                    ))
                }
            });
            match outcome {
                Ok(link) => {
                    log::info!("Session {key} opened mail draft for a report");
                    Ok(see_other(&link))
                }
                Err((form, error)) => {
                    let ctx = PageContext::build(&session, &config);
                    let errors = error.into_iter().collect();
                    render_with_status(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ReportTemplate { ctx, form, errors },
                    )
                }
            }
        }
        other => Err(AppError::BadRequest(format!("Unknown action: {other}"))),
    }
}

/// `mailto:` URL carrying the report, for the citizen's own mail client.
pub fn mailto_link(draft: &ReportDraft, recipient: Option<&str>) -> String {
    let subject = format!("Reporte de irregularidad - contrato {}", draft.contract_id());
    let kind = if draft.has_irregularity_type() {
        draft.irregularity_type()
    } else {
        "Sin especificar"
    };
    let body = format!(
        "ID del contrato: {}\nEntidad: {}\nValor: {}\nTipo de irregularidad: {}\n\n{}",
        draft.contract_id(),
        draft.entity(),
        draft.amount(),
        kind,
        draft.description(),
    );
    format!(
        "mailto:{}?subject={}&body={}",
        recipient.unwrap_or_default(),
        urlencoding::encode(&subject),
        urlencoding::encode(&body),
    )
}
