use serde::{Deserialize, Serialize};

use crate::models::{Preferences, SavedSchedule, ScheduleCandidate};

/// Cuerpo de `POST /schedules/generate`
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "course_codes": ["ICS 101", "MATH 101"],
///   "term": "Fall",
///   "year": 2024,
///   "preferences": {
///     "preferred_professors": ["Dr. Sarah Al-Zahrani"],
///     "avoid_early_classes": true,
///     "max_walking_distance": 10,
///     "preferred_buildings": ["63"],
///     "avoid_buildings": []
///   }
/// }
/// ```
///
/// # Campos:
/// - `course_codes`: cursos pedidos, en orden (requerido, no vacío)
/// - `term` / `year`: término académico (requeridos)
/// - `preferences`: opcional; si falta se usan las guardadas del usuario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub course_codes: Vec<String>,
    pub term: String,
    pub year: i32,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

pub fn parse_generate_request(json_str: &str) -> Result<GenerateRequest, serde_json::Error> {
    serde_json::from_str::<GenerateRequest>(json_str)
}

impl GenerateRequest {
    /// Códigos sin espacios sobrantes y sin entradas vacías.
    pub fn normalized_codes(&self) -> Vec<String> {
        self.course_codes
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub message: &'static str,
    pub count: usize,
    pub nodes_visited: u64,
    pub schedules: Vec<ScheduleCandidate>,
}

/// Horario a guardar: término más el candidato tal como lo devolvió `generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleData {
    pub term: String,
    pub year: i32,
    #[serde(flatten)]
    pub candidate: ScheduleCandidate,
}

/// Cuerpo de `POST /schedules/save`: `{"name": "...", "schedule_data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub schedule_data: Option<ScheduleData>,
}

pub fn parse_save_request(json_str: &str) -> Result<SaveRequest, serde_json::Error> {
    serde_json::from_str::<SaveRequest>(json_str)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub schedule_ids: Vec<i64>,
}

/// Filtro de `GET /schedules?term=..&year=..`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleListQuery {
    pub term: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkingTimeRequest {
    pub building1: String,
    pub building2: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseBrief {
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub building: String,
}

/// Fila de la comparación de horarios guardados.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub id: i64,
    pub name: String,
    pub total_credits: u32,
    pub total_walking_time: u32,
    pub score: f64,
    pub total_courses: usize,
    pub courses: Vec<CourseBrief>,
}

impl From<&SavedSchedule> for ComparisonEntry {
    fn from(s: &SavedSchedule) -> Self {
        ComparisonEntry {
            id: s.id,
            name: s.name.clone(),
            total_credits: s.total_credits,
            total_walking_time: s.total_walking_time,
            score: s.score,
            total_courses: s.sections.len(),
            courses: s
                .sections
                .iter()
                .map(|sec| CourseBrief {
                    course_code: sec.course_code.clone(),
                    course_name: sec.course_name.clone(),
                    instructor: sec.instructor.clone(),
                    building: sec.building.clone(),
                })
                .collect(),
        }
    }
}
