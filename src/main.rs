use actix_web::HttpServer;

use veeduria::app::{self, AppState};
use veeduria::config::AppConfig;
use veeduria::contracts::Catalog;
use veeduria::session::registry::DraftRegistry;
use veeduria::session::sweeper;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = AppConfig::from_env();
    let catalog = Catalog::load(&config).map_err(std::io::Error::other)?;

    let registry = DraftRegistry::new();
    sweeper::spawn_sweeper(registry.clone(), config.draft_idle);

    let bind_addr = config.bind_addr.clone();
    log::info!("Starting server at http://{}{}/", bind_addr, config.base_path);

    let state = AppState::new(config, catalog, registry);
    HttpServer::new(move || app::build_app(state.clone()))
        .bind(bind_addr)?
        .run()
        .await
}
