use std::time::Duration;

use super::registry::DraftRegistry;

const MIN_PERIOD: Duration = Duration::from_secs(30);

/// Periodically drop drafts whose session has been idle for `max_idle`.
pub fn spawn_sweeper(registry: DraftRegistry, max_idle: Duration) {
    let period = (max_idle / 4).max(MIN_PERIOD);
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = registry.sweep_idle(max_idle);
            if removed > 0 {
                log::info!(
                    "Draft sweeper discarded {} idle draft(s), {} remaining",
                    removed,
                    registry.len()
                );
            }
        }
    });
}
