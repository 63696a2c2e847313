use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::Key,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web,
};

use crate::config::AppConfig;
use crate::contracts::Catalog;
use crate::handlers;
use crate::session::registry::DraftRegistry;

/// Everything the HTTP workers share.
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<AppConfig>,
    pub catalog: web::Data<Catalog>,
    pub registry: web::Data<DraftRegistry>,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, registry: DraftRegistry) -> Self {
        let cookie_key = config.cookie_key();
        Self {
            config: web::Data::new(config),
            catalog: web::Data::new(catalog),
            registry: web::Data::new(registry),
            cookie_key,
        }
    }
}

pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), state.cookie_key.clone())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();
    let base_path = state.config.base_path.clone();

    App::new()
        .wrap(session_mw)
        .wrap(middleware::Logger::default())
        .app_data(state.config)
        .app_data(state.catalog)
        .app_data(state.registry)
        .service(
            web::scope(&base_path)
                .route("", web::get().to(handlers::root))
                .route("/", web::get().to(handlers::root))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/seleccionar/{contract_id}", web::post().to(handlers::dashboard::select))
                .route("/denunciar", web::get().to(handlers::report_handlers::form))
                .route("/denunciar", web::post().to(handlers::report_handlers::submit))
                .route("/denunciar/ws", web::get().to(handlers::report_handlers::connect))
                .route("/sesion/cerrar", web::post().to(handlers::session_handlers::close))
                .service(web::scope("/api/v1").configure(handlers::api_v1::configure)),
        )
        // Default 404 handler (must be registered last)
        .default_service(web::to(handlers::not_found))
}
