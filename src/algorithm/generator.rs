// generator.rs - Orquestador de la generación de horarios
//
// Pipeline:
// 1. (opcional) resolver cursos pedidos y edificios desde el catálogo
// 2. búsqueda exhaustiva con rechazo de choques (search)
// 3. ranking: orden por puntaje y corte a los `max_schedules` mejores
//
// Todo el I/O ocurre antes de la búsqueda; `generate` es puro.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithm::ranking::{select_top, DEFAULT_MAX_SCHEDULES};
use crate::algorithm::search::{enumerate_schedules, OmissionMode, SearchLimits, SearchStats};
use crate::catalog::Catalog;
use crate::error::ScheduleError;
use crate::models::{BuildingMap, CourseRequest, Preferences, ScheduleCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub max_schedules: usize,
    pub omission: OmissionMode,
    pub limits: SearchLimits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_schedules: DEFAULT_MAX_SCHEDULES,
            omission: OmissionMode::Always,
            limits: SearchLimits::default(),
        }
    }
}

/// Resultado del ranking junto con las estadísticas de la búsqueda.
#[derive(Debug, Clone)]
pub struct Generated {
    pub schedules: Vec<ScheduleCandidate>,
    pub stats: SearchStats,
}

/// Genera los mejores horarios para los cursos ya resueltos.
///
/// Determinista para entradas idénticas. Devuelve entre 0 y
/// `config.max_schedules` candidatos en orden de puntaje no creciente.
pub fn generate(
    requests: &[CourseRequest],
    preferences: &Preferences,
    buildings: &BuildingMap,
    config: &GeneratorConfig,
) -> Result<Vec<ScheduleCandidate>, ScheduleError> {
    generate_with_stats(requests, preferences, buildings, config).map(|g| g.schedules)
}

pub fn generate_with_stats(
    requests: &[CourseRequest],
    preferences: &Preferences,
    buildings: &BuildingMap,
    config: &GeneratorConfig,
) -> Result<Generated, ScheduleError> {
    let section_total: usize = requests.iter().map(|r| r.sections.len()).sum();
    info!(courses = requests.len(), sections = section_total, omission = ?config.omission, "generando horarios");

    let outcome = enumerate_schedules(requests, preferences, buildings, config.omission, config.limits)?;
    let stats = outcome.stats;
    let schedules = select_top(outcome.candidates, config.max_schedules);

    info!(nodes = stats.nodes_visited, candidates = stats.candidates, returned = schedules.len(), "generación completada");
    Ok(Generated { schedules, stats })
}

/// Resultado de generar a partir del catálogo.
#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    /// Ninguno de los códigos pedidos existe para ese término/año.
    NoCourses,
    Generated(Generated),
}

/// Resuelve los cursos pedidos en el catálogo (en el orden de `course_codes`,
/// ignorando duplicados y cursos inactivos) y ejecuta `generate`.
pub fn generate_from_catalog(
    catalog: &Catalog,
    course_codes: &[String],
    term: &str,
    year: i32,
    preferences: &Preferences,
    config: &GeneratorConfig,
) -> Result<GenerateOutcome, ScheduleError> {
    let requests = catalog.course_requests(course_codes, term, year);
    if requests.is_empty() {
        info!(term, year, "ningún curso pedido existe en el catálogo");
        return Ok(GenerateOutcome::NoCourses);
    }
    let buildings = catalog.building_map();
    let generated = generate_with_stats(&requests, preferences, &buildings, config)?;
    Ok(GenerateOutcome::Generated(generated))
}
