// Template context structures for Askama templates.

use actix_session::Session;
use askama::Template;

use crate::config::AppConfig;
use crate::contracts::RedFlagContract;
use crate::report::ReportDraft;
use crate::report::draft::{IRREGULARITY_TYPES, NO_SELECTION};
use crate::session::{csrf, take_flash};

/// Common context shared by all pages.
pub struct PageContext {
    pub base_path: String,
    pub csrf_token: String,
    pub flash: Option<String>,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig) -> Self {
        Self {
            base_path: config.base_path.clone(),
            csrf_token: csrf::get_or_create_token(session),
            flash: take_flash(session),
        }
    }
}

pub struct ContractCard {
    pub contract_id: String,
    pub entity: String,
    pub amount: String,
    pub object: String,
    pub flags: String,
}

impl From<&RedFlagContract> for ContractCard {
    fn from(contract: &RedFlagContract) -> Self {
        Self {
            contract_id: contract.contract_id.clone(),
            entity: contract.entity.clone(),
            amount: contract.amount.clone(),
            object: contract.object.clone(),
            flags: contract.flags.join(" · "),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub cards: Vec<ContractCard>,
}

pub struct IrregularityOption {
    pub value: String,
    pub selected: bool,
}

/// What the report form binds to. `can_submit` comes from the draft's own
/// validity so the template never repeats the contract ID rule.
pub struct ReportFormView {
    pub contract_id: String,
    pub irregularity_type: String,
    pub description: String,
    pub entity: String,
    pub amount: String,
    pub options: Vec<IrregularityOption>,
    pub no_selection: bool,
    pub can_submit: bool,
}

impl ReportFormView {
    pub fn from_draft(draft: &ReportDraft) -> Self {
        let current = draft.irregularity_type();
        let mut options: Vec<IrregularityOption> = IRREGULARITY_TYPES
            .iter()
            .map(|value| IrregularityOption {
                value: value.to_string(),
                selected: *value == current,
            })
            .collect();
        // Keep values outside the fixed list visible instead of silently
        // replacing them with the first option.
        if draft.has_irregularity_type() && !IRREGULARITY_TYPES.contains(&current) {
            options.push(IrregularityOption {
                value: current.to_string(),
                selected: true,
            });
        }
        Self {
            contract_id: draft.contract_id().to_string(),
            irregularity_type: current.to_string(),
            description: draft.description().to_string(),
            entity: draft.entity().to_string(),
            amount: draft.amount().to_string(),
            options,
            no_selection: current == NO_SELECTION,
            can_submit: draft.is_valid(),
        }
    }
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub ctx: PageContext,
    pub form: ReportFormView,
    pub errors: Vec<String>,
}
