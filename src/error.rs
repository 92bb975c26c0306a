// Tipos de error del núcleo de generación y del catálogo.

/// Errores del generador de horarios.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid time '{0}': expected HH:MM (24h)")]
    InvalidTime(String),

    #[error("invalid day '{0}': expected Sunday..Thursday")]
    InvalidDay(String),

    #[error("meeting time must start before it ends ({start} >= {end})")]
    EmptyMeeting { start: String, end: String },

    #[error("search space too large: visited {visited} nodes (limit {limit})")]
    SearchSpaceTooLarge { visited: u64, limit: u64 },

    #[error("search space too large: produced {produced} candidates (limit {limit})")]
    TooManyCandidates { produced: usize, limit: usize },
}

impl ScheduleError {
    /// true para los errores de tope de búsqueda (no de datos mal formados)
    pub fn is_search_cap(&self) -> bool {
        matches!(self, ScheduleError::SearchSpaceTooLarge { .. } | ScheduleError::TooManyCandidates { .. })
    }
}

/// Errores al leer el archivo de catálogo (cursos + edificios).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
