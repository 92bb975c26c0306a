//! Búsqueda exhaustiva de combinaciones de secciones (backtracking).
//!
//! Recorre los cursos en el orden recibido. En cada curso prueba cada sección
//! elegible (en el orden del catálogo) que no choque con lo ya comprometido y
//! después, según [`OmissionMode`], prueba también omitir el curso. Cada hoja
//! con al menos una sección se materializa como [`ScheduleCandidate`].
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithm::conflict::has_conflict;
use crate::algorithm::score::score;
use crate::algorithm::walking::total_walking_time;
use crate::error::ScheduleError;
use crate::models::{BuildingMap, CourseRequest, Preferences, ScheduleCandidate, Section};

/// Cuándo se explora la rama "sin este curso".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OmissionMode {
    /// Siempre: todo curso pedido es opcional, aunque tenga secciones sin choque.
    #[default]
    Always,
    /// Sólo si el curso no tiene secciones elegibles.
    WhenNoSections,
}

impl FromStr for OmissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(OmissionMode::Always),
            "when-no-sections" | "when-empty" => Ok(OmissionMode::WhenNoSections),
            other => Err(format!("unknown omission mode '{}'", other)),
        }
    }
}

/// Topes duros del árbol de búsqueda. `None` desactiva el tope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub max_candidates: Option<usize>,
}

pub const DEFAULT_MAX_NODES: u64 = 2_000_000;
pub const DEFAULT_MAX_CANDIDATES: usize = 250_000;

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits { max_nodes: Some(DEFAULT_MAX_NODES), max_candidates: Some(DEFAULT_MAX_CANDIDATES) }
    }
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        SearchLimits { max_nodes: None, max_candidates: None }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub candidates: usize,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// En orden de descubrimiento.
    pub candidates: Vec<ScheduleCandidate>,
    pub stats: SearchStats,
}

/// Crea el candidato de una hoja: créditos, caminata y puntaje calculados desde cero.
pub fn materialize(sections: Vec<Section>, preferences: &Preferences, buildings: &BuildingMap) -> ScheduleCandidate {
    let total_credits = sections.iter().map(|s| s.credits).sum();
    let total_walking_time = total_walking_time(&sections, buildings);
    let score = score(&sections, preferences, total_walking_time);
    ScheduleCandidate {
        sections,
        total_credits,
        total_walking_time,
        score,
        preferences: preferences.clone(),
    }
}

struct Search<'a> {
    courses: &'a [CourseRequest],
    preferences: &'a Preferences,
    buildings: &'a BuildingMap,
    omission: OmissionMode,
    limits: SearchLimits,
    stats: SearchStats,
    found: Vec<ScheduleCandidate>,
}

impl<'a> Search<'a> {
    fn visit(&mut self, idx: usize, partial: &mut Vec<&'a Section>) -> Result<(), ScheduleError> {
        self.stats.nodes_visited += 1;
        if let Some(limit) = self.limits.max_nodes {
            if self.stats.nodes_visited > limit {
                return Err(ScheduleError::SearchSpaceTooLarge { visited: self.stats.nodes_visited, limit });
            }
        }

        if idx == self.courses.len() {
            // el horario vacío nunca se emite
            if !partial.is_empty() {
                self.emit(partial.as_slice())?;
            }
            return Ok(());
        }

        let courses = self.courses;
        let course = &courses[idx];
        for section in course.sections.iter() {
            if has_conflict(partial.as_slice(), section) {
                continue;
            }
            partial.push(section);
            let res = self.visit(idx + 1, partial);
            partial.pop();
            res?;
        }

        let skip = match self.omission {
            OmissionMode::Always => true,
            OmissionMode::WhenNoSections => course.sections.is_empty(),
        };
        if skip {
            self.visit(idx + 1, partial)?;
        }
        Ok(())
    }

    fn emit(&mut self, partial: &[&Section]) -> Result<(), ScheduleError> {
        if let Some(limit) = self.limits.max_candidates {
            if self.found.len() >= limit {
                return Err(ScheduleError::TooManyCandidates { produced: self.found.len() + 1, limit });
            }
        }
        let sections: Vec<Section> = partial.iter().map(|s| (*s).clone()).collect();
        self.found.push(materialize(sections, self.preferences, self.buildings));
        self.stats.candidates = self.found.len();
        Ok(())
    }
}

/// Enumera todas las combinaciones sin choques. No hace I/O; recorre el
/// árbol completo antes de devolver (sin corte temprano).
pub fn enumerate_schedules(
    courses: &[CourseRequest],
    preferences: &Preferences,
    buildings: &BuildingMap,
    omission: OmissionMode,
    limits: SearchLimits,
) -> Result<SearchOutcome, ScheduleError> {
    let mut search = Search {
        courses,
        preferences,
        buildings,
        omission,
        limits,
        stats: SearchStats::default(),
        found: Vec::new(),
    };
    let mut partial: Vec<&Section> = Vec::with_capacity(courses.len());
    search.visit(0, &mut partial)?;
    debug!(nodes = search.stats.nodes_visited, candidates = search.stats.candidates, "búsqueda completada");
    Ok(SearchOutcome { candidates: search.found, stats: search.stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeetingTime;

    fn section(code: &str, crn: &str, slots: &[(&str, &str, &str)]) -> Section {
        Section {
            course_code: code.to_string(),
            course_name: code.to_string(),
            credits: 3,
            crn: crn.to_string(),
            section_number: "001".to_string(),
            instructor: "Dr. Test".to_string(),
            capacity: 30,
            enrolled: 0,
            time_slots: slots.iter().map(|(d, s, e)| MeetingTime::parse(d, s, e).unwrap()).collect(),
            building: "63".to_string(),
            room: "101".to_string(),
            is_online: false,
        }
    }

    fn request(code: &str, sections: Vec<Section>) -> CourseRequest {
        CourseRequest { course_code: code.to_string(), sections }
    }

    fn crn_sets(out: &SearchOutcome) -> Vec<Vec<String>> {
        out.candidates.iter().map(|c| c.crns()).collect()
    }

    #[test]
    fn test_discovery_order_with_omission() {
        let a = request("A", vec![section("A", "a1", &[("Monday", "08:00", "09:00")]), section("A", "a2", &[("Monday", "10:00", "11:00")])]);
        let b = request("B", vec![section("B", "b1", &[("Monday", "08:30", "09:30")])]);
        let out = enumerate_schedules(&[a, b], &Preferences::default(), &BuildingMap::new(), OmissionMode::Always, SearchLimits::default()).unwrap();
        // a1+b1 choca; el vacío no se emite
        assert_eq!(crn_sets(&out), vec![
            vec!["a1".to_string()],
            vec!["a2".to_string(), "b1".to_string()],
            vec!["a2".to_string()],
            vec!["b1".to_string()],
        ]);
        assert_eq!(out.stats.candidates, 4);
    }

    #[test]
    fn test_strict_mode_keeps_full_coverage() {
        let a = request("A", vec![section("A", "a1", &[("Monday", "08:00", "09:00")])]);
        let b = request("B", vec![section("B", "b1", &[("Tuesday", "08:00", "09:00")])]);
        let c = request("C", vec![]);
        let out = enumerate_schedules(&[a, b, c], &Preferences::default(), &BuildingMap::new(), OmissionMode::WhenNoSections, SearchLimits::default()).unwrap();
        assert_eq!(crn_sets(&out), vec![vec!["a1".to_string(), "b1".to_string()]]);
    }

    #[test]
    fn test_empty_request_list_yields_nothing() {
        let out = enumerate_schedules(&[], &Preferences::default(), &BuildingMap::new(), OmissionMode::Always, SearchLimits::default()).unwrap();
        assert!(out.candidates.is_empty());
        assert_eq!(out.stats.nodes_visited, 1);
    }

    #[test]
    fn test_node_cap_fails_fast() {
        let courses: Vec<CourseRequest> = (0..6)
            .map(|i| {
                let code = format!("C{}", i);
                let day = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Sunday"][i];
                let start = if i == 5 { "14:00" } else { "08:00" };
                let end = if i == 5 { "15:00" } else { "09:00" };
                request(&code, vec![section(&code, &format!("{}-1", code), &[(day, start, end)])])
            })
            .collect();
        let limits = SearchLimits { max_nodes: Some(10), max_candidates: None };
        let err = enumerate_schedules(&courses, &Preferences::default(), &BuildingMap::new(), OmissionMode::Always, limits).unwrap_err();
        assert!(matches!(err, ScheduleError::SearchSpaceTooLarge { limit: 10, .. }));
    }

    #[test]
    fn test_candidate_cap_fails_fast() {
        let a = request("A", vec![section("A", "a1", &[("Monday", "08:00", "09:00")])]);
        let b = request("B", vec![section("B", "b1", &[("Tuesday", "08:00", "09:00")])]);
        let limits = SearchLimits { max_nodes: None, max_candidates: Some(2) };
        let err = enumerate_schedules(&[a, b], &Preferences::default(), &BuildingMap::new(), OmissionMode::Always, limits).unwrap_err();
        assert_eq!(err, ScheduleError::TooManyCandidates { produced: 3, limit: 2 });
    }

    #[test]
    fn test_omission_mode_from_str() {
        assert_eq!("always".parse::<OmissionMode>().unwrap(), OmissionMode::Always);
        assert_eq!("when-empty".parse::<OmissionMode>().unwrap(), OmissionMode::WhenNoSections);
        assert!("sometimes".parse::<OmissionMode>().is_err());
    }
}
