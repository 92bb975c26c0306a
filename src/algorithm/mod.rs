// Módulo de alto nivel para la generación de horarios
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod conflict;
pub mod generator;
pub mod geo;
pub mod ranking;
pub mod score;
pub mod search;
pub mod walking;

// Reexportar la API pública del generador
pub use conflict::{has_conflict, sections_conflict};
pub use generator::{generate, generate_from_catalog, generate_with_stats, GenerateOutcome, Generated, GeneratorConfig};
pub use geo::{distance_km, walking_minutes};
pub use ranking::{select_top, DEFAULT_MAX_SCHEDULES};
pub use score::score;
pub use search::{enumerate_schedules, OmissionMode, SearchLimits, SearchOutcome, SearchStats};
pub use walking::total_walking_time;
