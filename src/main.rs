// --- Generador de Horarios - Archivo principal ---

use campusshift::config::AppConfig;
use campusshift::run_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env antes del filtro de logs por si define RUST_LOG
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campusshift=info,actix_web=info")))
        .init();

    let config = AppConfig::from_env();

    tracing::info!(bind = %config.bind, catalog = %config.catalog_path.display(), "=== Generador de Horarios (API) ===");
    run_server(config).await
}
