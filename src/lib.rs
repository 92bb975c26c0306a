// Biblioteca raíz del crate `campusshift`.
// Generador de horarios sin choques: catálogo -> búsqueda -> ranking, más la
// API HTTP y la persistencia de horarios guardados.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod storage;

pub use algorithm::{generate, generate_from_catalog, GenerateOutcome, GeneratorConfig};
pub use error::{CatalogError, ScheduleError};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
