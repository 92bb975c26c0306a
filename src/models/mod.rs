// Estructuras de datos principales
mod time;

pub use time::{ClockTime, MeetingTime, Weekday};

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Coordenada geográfica en grados.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

/// Tabla edificio -> coordenada que consume la búsqueda.
pub type BuildingMap = HashMap<String, Coordinate>;

fn default_true() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_number: String,
    pub building_name: String,
    pub coordinates: Coordinate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Sección tal como aparece en el catálogo, dentro de su curso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOffering {
    pub crn: String,
    pub section_number: String,
    pub instructor: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
    pub time_slots: Vec<MeetingTime>,
    pub building: String,
    pub room: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SectionOffering {
    /// Quedan cupos (enrolled < capacity).
    pub fn has_seats(&self) -> bool {
        self.enrolled < self.capacity
    }

    /// Elegible para la búsqueda: con cupos y presencial.
    pub fn is_eligible(&self) -> bool {
        self.has_seats() && !self.is_online
    }
}

/// Curso del catálogo de un término/año.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    pub department: String,
    pub term: String,
    pub year: i32,
    #[serde(default)]
    pub sections: Vec<SectionOffering>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub corequisites: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Course {
    /// Materializa una sección del curso con los datos del curso incluidos.
    pub fn section(&self, offering: &SectionOffering) -> Section {
        Section {
            course_code: self.course_code.clone(),
            course_name: self.course_name.clone(),
            credits: self.credits,
            crn: offering.crn.clone(),
            section_number: offering.section_number.clone(),
            instructor: offering.instructor.clone(),
            capacity: offering.capacity,
            enrolled: offering.enrolled,
            time_slots: offering.time_slots.clone(),
            building: offering.building.clone(),
            room: offering.room.clone(),
            is_online: offering.is_online,
        }
    }

    /// Secciones elegibles en el orden del catálogo.
    pub fn eligible_sections(&self) -> Vec<Section> {
        self.sections.iter().filter(|s| s.is_eligible()).map(|s| self.section(s)).collect()
    }

    pub fn to_request(&self) -> CourseRequest {
        CourseRequest { course_code: self.course_code.clone(), sections: self.eligible_sections() }
    }
}

/// Sección comprometida en un horario: lleva código, nombre y créditos de su curso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    pub crn: String,
    pub section_number: String,
    pub instructor: String,
    pub capacity: u32,
    pub enrolled: u32,
    pub time_slots: Vec<MeetingTime>,
    pub building: String,
    pub room: String,
    pub is_online: bool,
}

/// Un curso pedido por el usuario, ya resuelto a sus secciones elegibles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub course_code: String,
    pub sections: Vec<Section>,
}

pub const DEFAULT_MAX_WALKING_MINUTES: u32 = 15;

fn default_max_walking() -> u32 { DEFAULT_MAX_WALKING_MINUTES }

/// Preferencias blandas del usuario. Los campos ausentes en el JSON toman
/// los valores por defecto (conjuntos vacíos, `false`, 15 minutos).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub preferred_professors: BTreeSet<String>,
    #[serde(default)]
    pub avoid_early_classes: bool,
    /// minutos
    #[serde(default = "default_max_walking")]
    pub max_walking_distance: u32,
    #[serde(default)]
    pub preferred_buildings: BTreeSet<String>,
    #[serde(default)]
    pub avoid_buildings: BTreeSet<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            preferred_professors: BTreeSet::new(),
            avoid_early_classes: false,
            max_walking_distance: DEFAULT_MAX_WALKING_MINUTES,
            preferred_buildings: BTreeSet::new(),
            avoid_buildings: BTreeSet::new(),
        }
    }
}

/// Combinación completa y sin choques, ya puntuada. No se modifica tras crearse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub sections: Vec<Section>,
    pub total_credits: u32,
    /// minutos
    pub total_walking_time: u32,
    pub score: f64,
    pub preferences: Preferences,
}

impl ScheduleCandidate {
    pub fn total_courses(&self) -> usize {
        self.sections.len()
    }

    pub fn crns(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.crn.clone()).collect()
    }
}

/// Horario guardado por un usuario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub term: String,
    pub year: i32,
    pub sections: Vec<Section>,
    pub total_credits: u32,
    pub total_walking_time: u32,
    pub score: f64,
    pub preferences: Preferences,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SavedSchedule {
    pub fn crns(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.crn.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub user_id: String,
    pub schedules_generated: i64,
    pub last_schedule_generation: Option<String>,
}
