use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::Key;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4321";
pub const DEFAULT_BASE_PATH: &str = "/VeedurIA-Ciudadana";
pub const DEFAULT_DRAFT_IDLE_MINUTES: u64 = 60;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Mount point for every route; empty or `/segment` without trailing slash.
    pub base_path: String,
    pub session_key: Option<String>,
    pub draft_idle: Duration,
    pub contracts_seed: Option<PathBuf>,
    pub report_email_to: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            session_key: None,
            draft_idle: Duration::from_secs(DEFAULT_DRAFT_IDLE_MINUTES * 60),
            contracts_seed: None,
            report_email_to: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let draft_idle = match non_empty("DRAFT_IDLE_MINUTES") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(minutes) if minutes > 0 => Duration::from_secs(minutes * 60),
                _ => {
                    log::warn!(
                        "Ignoring DRAFT_IDLE_MINUTES={raw:?}, using {DEFAULT_DRAFT_IDLE_MINUTES}"
                    );
                    defaults.draft_idle
                }
            },
            None => defaults.draft_idle,
        };

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            base_path: lookup("BASE_PATH")
                .map(|raw| normalize_base_path(&raw))
                .unwrap_or(defaults.base_path),
            session_key: non_empty("SESSION_KEY"),
            draft_idle,
            contracts_seed: non_empty("CONTRACTS_SEED").map(PathBuf::from),
            report_email_to: non_empty("REPORT_EMAIL_TO"),
        }
    }

    /// Absolute URL path for a route under the base path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_path, path.trim_start_matches('/'))
    }

    /// Cookie signing key. Falls back to a random key, so sessions and their
    /// drafts do not survive a restart.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need 64+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

/// `"VeedurIA/"` -> `"/VeedurIA"`, `"/"` -> `""`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
