pub mod form;
pub mod ws;

pub use form::{form, submit};
pub use ws::connect;
