//! Per-session token embedded in every HTML form (card selection, report
//! edits, closing the session).

use actix_session::Session;

use crate::errors::AppError;

const CSRF_TOKEN: &str = "csrf_token";

/// Token rendered into this session's forms. Issued on the first page view.
pub fn get_or_create_token(session: &Session) -> String {
    match session.get::<String>(CSRF_TOKEN) {
        Ok(Some(token)) => token,
        _ => {
            let token = super::generate_token();
            let _ = session.insert(CSRF_TOKEN, &token);
            token
        }
    }
}

/// Reject a form POST whose `csrf_token` field does not match the session.
/// A session that never rendered a form has no token and always fails.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    match session.get::<String>(CSRF_TOKEN) {
        Ok(Some(stored)) if !stored.is_empty() && tokens_match(&stored, submitted) => Ok(()),
        _ => Err(AppError::Csrf),
    }
}

/// Byte comparison that does not stop at the first difference.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len()
        && stored
            .bytes()
            .zip(submitted.bytes())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::tokens_match;

    #[test]
    fn compares_whole_tokens() {
        assert!(tokens_match("abcd", "abcd"));
        assert!(!tokens_match("abcd", "abce"));
        assert!(!tokens_match("abcd", "abc"));
        assert!(!tokens_match("", "a"));
    }
}
