use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::is_valid_contract_id;

/// Placeholder category shown until the citizen picks a real one.
pub const NO_SELECTION: &str = "Seleccione una opción...";
pub const DEFAULT_ENTITY: &str = "Entidad de Ejemplo";
pub const DEFAULT_AMOUNT: &str = "$0";

/// Categories offered by the report form, in display order.
pub const IRREGULARITY_TYPES: &[&str] = &[
    "Sobrecosto",
    "Direccionamiento del contrato",
    "Incumplimiento del contratista",
    "Fraccionamiento de contratos",
    "Conflicto de intereses",
    "Otra",
];

/// The five editable fields of a [`ReportDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    ContractId,
    IrregularityType,
    Description,
    Entity,
    Amount,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::ContractId,
        DraftField::IrregularityType,
        DraftField::Description,
        DraftField::Entity,
        DraftField::Amount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::ContractId => "contractId",
            DraftField::IrregularityType => "irregularityType",
            DraftField::Description => "description",
            DraftField::Entity => "entity",
            DraftField::Amount => "amount",
        }
    }

    /// Entity and amount describe the loaded contract, not the citizen's report text.
    pub fn is_contract_context(self) -> bool {
        matches!(self, DraftField::Entity | DraftField::Amount)
    }

    /// Value of the field in a freshly created draft.
    pub fn pristine(self) -> &'static str {
        match self {
            DraftField::ContractId | DraftField::Description => "",
            DraftField::IrregularityType => NO_SELECTION,
            DraftField::Entity => DEFAULT_ENTITY,
            DraftField::Amount => DEFAULT_AMOUNT,
        }
    }

    /// Fields the citizen writes, i.e. everything but the contract context.
    fn report_text() -> impl Iterator<Item = DraftField> {
        Self::ALL.into_iter().filter(|field| !field.is_contract_context())
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown draft field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contractId" | "contract_id" => Ok(DraftField::ContractId),
            "irregularityType" | "irregularity_type" => Ok(DraftField::IrregularityType),
            "description" => Ok(DraftField::Description),
            "entity" => Ok(DraftField::Entity),
            "amount" => Ok(DraftField::Amount),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Contract data handed over by the dashboard when a card is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractContext {
    pub contract_id: String,
    pub entity: String,
    pub amount: String,
}

/// Observable validity of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DraftState {
    Invalid,
    Valid,
}

/// The report a citizen is composing.
///
/// Validity is never stored: [`ReportDraft::is_valid`] re-runs the contract ID
/// check against the current value on every call, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    contract_id: String,
    irregularity_type: String,
    description: String,
    entity: String,
    amount: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            contract_id: DraftField::ContractId.pristine().to_string(),
            irregularity_type: DraftField::IrregularityType.pristine().to_string(),
            description: DraftField::Description.pristine().to_string(),
            entity: DraftField::Entity.pristine().to_string(),
            amount: DraftField::Amount.pristine().to_string(),
        }
    }
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn irregularity_type(&self) -> &str {
        &self.irregularity_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Display string such as `"$1.250.000"`; never parsed.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::ContractId => &self.contract_id,
            DraftField::IrregularityType => &self.irregularity_type,
            DraftField::Description => &self.description,
            DraftField::Entity => &self.entity,
            DraftField::Amount => &self.amount,
        }
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::ContractId => &mut self.contract_id,
            DraftField::IrregularityType => &mut self.irregularity_type,
            DraftField::Description => &mut self.description,
            DraftField::Entity => &mut self.entity,
            DraftField::Amount => &mut self.amount,
        }
    }

    /// Overwrite one field. Any text is accepted, including an invalid
    /// contract ID while the user is still typing. Returns whether the value changed.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = self.slot_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Load contract context from the dashboard. Irregularity type and
    /// description are kept so switching contracts does not lose written text.
    pub fn import_context(&mut self, context: &ContractContext) -> bool {
        let mut changed = self.set(DraftField::ContractId, context.contract_id.as_str());
        changed |= self.set(DraftField::Entity, context.entity.as_str());
        changed |= self.set(DraftField::Amount, context.amount.as_str());
        changed
    }

    /// Clear the report text. Entity and amount stay as loaded.
    pub fn reset(&mut self) {
        for field in DraftField::report_text() {
            self.set(field, field.pristine());
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_contract_id(&self.contract_id)
    }

    pub fn state(&self) -> DraftState {
        if self.is_valid() {
            DraftState::Valid
        } else {
            DraftState::Invalid
        }
    }

    /// True when none of the user-entered fields has been touched.
    pub fn is_pristine(&self) -> bool {
        DraftField::report_text().all(|field| self.get(field) == field.pristine())
    }

    /// True once a real category has been picked.
    pub fn has_irregularity_type(&self) -> bool {
        self.irregularity_type != NO_SELECTION
    }
}
