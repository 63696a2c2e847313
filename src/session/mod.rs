pub mod csrf;
pub mod registry;
pub mod sweeper;

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;
use registry::SessionKey;

/// Session slot holding the key of this browser session's draft.
const DRAFT_KEY: &str = "draft_key";
const FLASH: &str = "flash";

/// Random 32-byte hex token.
pub(crate) fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Draft key of this session, issuing a new one on first visit.
pub fn session_key(session: &Session) -> Result<SessionKey, AppError> {
    if let Some(key) = existing_session_key(session) {
        return Ok(key);
    }
    let key = SessionKey::generate();
    session
        .insert(DRAFT_KEY, key.as_str())
        .map_err(|e| AppError::Session(format!("Failed to store draft key: {e}")))?;
    Ok(key)
}

pub fn existing_session_key(session: &Session) -> Option<SessionKey> {
    session
        .get::<String>(DRAFT_KEY)
        .unwrap_or(None)
        .map(SessionKey::new)
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}
