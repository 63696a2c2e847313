//! Citizen irregularity reports against red-flagged public contracts.
//!
//! The heart of the crate is [`report::ReportDraft`], the session-scoped draft
//! with its derived contract ID validity. The HTTP layer around it lists
//! contracts, prefills drafts from a selection and renders the report form.

pub mod app;
pub mod config;
pub mod contracts;
pub mod errors;
pub mod handlers;
pub mod report;
pub mod session;
pub mod templates_structs;
