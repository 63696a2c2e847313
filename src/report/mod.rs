//! The in-progress irregularity report and its observation layer.

pub mod draft;
pub mod store;
pub mod validate;

pub use draft::{ContractContext, DraftField, DraftState, ReportDraft, UnknownField};
pub use store::{DraftSnapshot, DraftStore};
