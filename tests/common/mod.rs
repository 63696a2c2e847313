//! Shared test infrastructure for HTTP-level tests.
//!
//! Each test builds the real application with the bundled contract catalog
//! and a fresh draft registry. `CookieJar` carries the session cookie between
//! requests the way a browser would.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use regex::Regex;

use veeduria::app::AppState;
use veeduria::config::AppConfig;
use veeduria::contracts::Catalog;
use veeduria::session::registry::DraftRegistry;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const BASE: &str = "/VeedurIA-Ciudadana";
pub const SESSION_COOKIE: &str = "id";

// ============================================================================
// APP SETUP
// ============================================================================

/// Application state with a fixed signing key and the bundled catalog.
pub fn test_state() -> AppState {
    let config = AppConfig {
        session_key: Some("k".repeat(64)),
        report_email_to: Some("veeduria@example.org".to_string()),
        ..AppConfig::default()
    };
    let catalog = Catalog::bundled().expect("bundled catalog");
    AppState::new(config, catalog, DraftRegistry::new())
}

pub fn url(path: &str) -> String {
    format!("{BASE}/{}", path.trim_start_matches('/'))
}

// ============================================================================
// SESSION COOKIE
// ============================================================================

#[derive(Default)]
pub struct CookieJar {
    session: Option<Cookie<'static>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the current session cookie, if any.
    pub fn apply(&self, req: TestRequest) -> TestRequest {
        match &self.session {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    /// Pick up a refreshed session cookie from a response.
    pub fn update<B>(&mut self, resp: &ServiceResponse<B>) {
        if let Some(cookie) = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
        {
            self.session = Some(cookie.into_owned());
        }
    }
}

// ============================================================================
// HTML SCRAPING
// ============================================================================

pub fn csrf_token(html: &str) -> String {
    capture(html, r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("csrf token in page")
}

/// Select actions of the dashboard cards, in page order.
pub fn card_actions(html: &str) -> Vec<String> {
    let re = Regex::new(&format!(r#"action="({BASE}/seleccionar/[^"]+)""#)).expect("regex");
    re.captures_iter(html).map(|c| c[1].to_string()).collect()
}

pub fn contract_id_input(html: &str) -> String {
    capture(html, r#"placeholder="Ej: CO1\.PCCNTR\.123456" value="([^"]*)""#)
        .expect("contract id input in page")
}

/// Whether the "Enviar Email" button is rendered enabled.
pub fn send_enabled(html: &str) -> bool {
    let re = Regex::new(
        r#"<button type="submit" name="action" value="send"( disabled)?>Enviar Email</button>"#,
    )
    .expect("regex");
    let caps = re.captures(html).expect("send button in page");
    caps.get(1).is_none()
}

fn capture(html: &str, pattern: &str) -> Option<String> {
    Regex::new(pattern)
        .expect("regex")
        .captures(html)
        .map(|c| c[1].to_string())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}
