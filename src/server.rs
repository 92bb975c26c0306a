use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::algorithm::GeneratorConfig;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::server_handlers::{buildings, courses, docs, schedules, users};
use crate::storage::ScheduleStore;

/// Cabecera con la que el gateway identifica al usuario.
pub const USER_HEADER: &str = "X-User-Id";

/// Estado compartido por todos los handlers.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<ScheduleStore>,
    pub generator: GeneratorConfig,
    /// Limita cuántas generaciones corren a la vez en el pool bloqueante.
    pub permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, store: Arc<ScheduleStore>, generator: GeneratorConfig) -> AppState {
        let procs = std::cmp::max(1, num_cpus::get());
        AppState { catalog, store, generator, permits: Arc::new(Semaphore::new(procs)) }
    }
}

/// Usuario de la petición, o la respuesta 401 a devolver.
pub(crate) fn user_id(req: &HttpRequest) -> Result<String, HttpResponse> {
    req.headers()
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HttpResponse::Unauthorized().json(json!({"error": format!("missing {} header", USER_HEADER)})))
}

pub(crate) fn internal_error(context: &str, e: &(dyn Error + Send + Sync)) -> HttpResponse {
    error!(error = %e, "{}", context);
    HttpResponse::InternalServerError().json(json!({"error": context}))
}

/// Registra todas las rutas. Las rutas literales van antes que las
/// parametrizadas (`/schedules/save` antes que `/schedules/{id}`).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedules/generate", web::post().to(schedules::generate_handler))
        .route("/schedules/save", web::post().to(schedules::save_handler))
        .route("/schedules/compare", web::post().to(schedules::compare_handler))
        .route("/schedules", web::get().to(schedules::list_handler))
        .route("/schedules/{id}/crns", web::get().to(schedules::crns_handler))
        .service(
            web::resource("/schedules/{id}")
                .route(web::get().to(schedules::get_handler))
                .route(web::put().to(schedules::update_handler))
                .route(web::delete().to(schedules::delete_handler)),
        )
        .route("/courses", web::get().to(courses::list_handler))
        .route("/courses/departments/list", web::get().to(courses::departments_handler))
        .route("/courses/stats/overview", web::get().to(courses::stats_handler))
        .route("/courses/search/{query}", web::get().to(courses::search_handler))
        .route("/courses/{code}/sections", web::get().to(courses::sections_handler))
        .route("/courses/{code}", web::get().to(courses::get_handler))
        .route("/buildings", web::get().to(buildings::list_handler))
        .route("/buildings/walking-time", web::post().to(buildings::walking_time_handler))
        .route("/buildings/{number}", web::get().to(buildings::get_handler))
        .service(
            web::resource("/users/preferences")
                .route(web::get().to(users::get_preferences_handler))
                .route(web::put().to(users::put_preferences_handler)),
        )
        .route("/users/usage", web::get().to(users::usage_handler))
        .route("/help", web::get().to(docs::help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let catalog = crate::catalog::load_catalog_cached(&config.catalog_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    let store = ScheduleStore::open(&config.db_path).map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(AppState::new(catalog, Arc::new(store), config.generator));

    info!(bind = %config.bind, "iniciando servidor");
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(config.bind.as_str())?
        .run()
        .await
}
