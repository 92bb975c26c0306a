//! Catálogo del término: cursos con sus secciones y edificios del campus.
//!
//! Es la fuente externa de datos del generador. Se lee una vez desde un
//! archivo JSON (`{"buildings": [...], "courses": [...]}`) y se consulta
//! en memoria; la búsqueda recibe ya resueltos los `CourseRequest` y el
//! mapa de edificios.
mod cache;

pub use cache::{clear_catalog_cache, load_catalog_cached};

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;
use crate::models::{Building, BuildingMap, Course, CourseRequest, SectionOffering};

/// Máximo de resultados de `search`.
pub const SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Filtros opcionales para listar cursos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourseFilter {
    pub term: Option<String>,
    pub year: Option<i32>,
    pub department: Option<String>,
    /// Subcadena del código, sin distinguir mayúsculas.
    pub course_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_courses: usize,
    pub total_sections: usize,
    pub departments: usize,
}

fn matches_term(course: &Course, term: Option<&str>, year: Option<i32>) -> bool {
    course.is_active
        && term.map_or(true, |t| course.term == t)
        && year.map_or(true, |y| course.year == y)
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Catalog, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|source| CatalogError::Io { path: path_str.clone(), source })?;
        let catalog = Catalog::from_json_str(&text)
            .map_err(|source| CatalogError::Parse { path: path_str.clone(), source })?;
        info!(path = %path_str, courses = catalog.courses.len(), buildings = catalog.buildings.len(), "catálogo cargado");
        Ok(catalog)
    }

    /// Resuelve los códigos pedidos a sus secciones elegibles
    /// (`enrolled < capacity` y presenciales). Conserva el orden de
    /// `course_codes`; los duplicados y los códigos inexistentes se ignoran.
    pub fn course_requests(&self, course_codes: &[String], term: &str, year: i32) -> Vec<CourseRequest> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for code in course_codes {
            let code = code.trim();
            if !seen.insert(code) {
                continue;
            }
            if let Some(course) = self.find_course(code, Some(term), Some(year)) {
                out.push(course.to_request());
            }
        }
        out
    }

    pub fn find_course(&self, code: &str, term: Option<&str>, year: Option<i32>) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_code == code && matches_term(c, term, year))
    }

    /// Cursos activos que cumplen el filtro, ordenados por código.
    pub fn list_courses(&self, filter: &CourseFilter) -> Vec<&Course> {
        let code_q = filter.course_code.as_ref().map(|q| q.to_lowercase());
        let mut out: Vec<&Course> = self
            .courses
            .iter()
            .filter(|c| matches_term(c, filter.term.as_deref(), filter.year))
            .filter(|c| filter.department.as_ref().map_or(true, |d| &c.department == d))
            .filter(|c| code_q.as_ref().map_or(true, |q| c.course_code.to_lowercase().contains(q)))
            .collect();
        out.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        out
    }

    /// Secciones con cupos de un curso (incluye las online).
    pub fn available_sections(&self, code: &str, term: Option<&str>, year: Option<i32>) -> Option<(&Course, Vec<&SectionOffering>)> {
        let course = self.find_course(code, term, year)?;
        let sections = course.sections.iter().filter(|s| s.has_seats()).collect();
        Some((course, sections))
    }

    pub fn departments(&self, term: Option<&str>, year: Option<i32>) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .courses
            .iter()
            .filter(|c| matches_term(c, term, year))
            .map(|c| c.department.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Búsqueda por código o nombre (subcadena, sin distinguir mayúsculas).
    pub fn search(&self, query: &str, term: Option<&str>, year: Option<i32>) -> Vec<&Course> {
        let q = query.to_lowercase();
        let mut out: Vec<&Course> = self
            .courses
            .iter()
            .filter(|c| matches_term(c, term, year))
            .filter(|c| c.course_code.to_lowercase().contains(&q) || c.course_name.to_lowercase().contains(&q))
            .collect();
        out.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        out.truncate(SEARCH_LIMIT);
        out
    }

    pub fn stats(&self, term: Option<&str>, year: Option<i32>) -> CatalogStats {
        let courses: Vec<&Course> = self.courses.iter().filter(|c| matches_term(c, term, year)).collect();
        CatalogStats {
            total_courses: courses.len(),
            total_sections: courses.iter().map(|c| c.sections.len()).sum(),
            departments: self.departments(term, year).len(),
        }
    }

    /// Edificios activos ordenados por número.
    pub fn buildings(&self) -> Vec<&Building> {
        let mut out: Vec<&Building> = self.buildings.iter().filter(|b| b.is_active).collect();
        out.sort_by(|a, b| a.building_number.cmp(&b.building_number));
        out
    }

    pub fn building(&self, number: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.is_active && b.building_number == number)
    }

    /// Mapa número de edificio -> coordenada (sólo edificios activos).
    pub fn building_map(&self) -> BuildingMap {
        self.buildings
            .iter()
            .filter(|b| b.is_active)
            .map(|b| (b.building_number.clone(), b.coordinates))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        "buildings": [
            {"building_number": "63", "building_name": "CCSE", "coordinates": {"lat": 26.3111, "lng": 50.2094}},
            {"building_number": "24", "building_name": "Sciences", "coordinates": {"lat": 26.3130, "lng": 50.2070}},
            {"building_number": "99", "building_name": "Old", "coordinates": {"lat": 0.0, "lng": 0.0}, "is_active": false}
        ],
        "courses": [
            {
                "course_code": "MATH 101", "course_name": "Calculus I", "credits": 4,
                "department": "Mathematics", "term": "Fall", "year": 2024,
                "sections": [
                    {"crn": "20001", "section_number": "001", "instructor": "Dr. M", "capacity": 35, "enrolled": 35,
                     "time_slots": [{"day": "Sunday", "start_time": "09:30", "end_time": "10:45"}],
                     "building": "24", "room": "201"},
                    {"crn": "20002", "section_number": "002", "instructor": "Dr. N", "capacity": 35, "enrolled": 10,
                     "time_slots": [{"day": "Monday", "start_time": "09:30", "end_time": "10:45"}],
                     "building": "24", "room": "202", "is_online": true},
                    {"crn": "20003", "section_number": "003", "instructor": "Dr. O", "capacity": 35,
                     "time_slots": [{"day": "Tuesday", "start_time": "09:30", "end_time": "10:45"}],
                     "building": "24", "room": "203"}
                ]
            },
            {
                "course_code": "ICS 101", "course_name": "Intro to Computer Science", "credits": 3,
                "department": "Computer Science", "term": "Fall", "year": 2024,
                "sections": []
            },
            {
                "course_code": "ICS 101", "course_name": "Intro to Computer Science", "credits": 3,
                "department": "Computer Science", "term": "Spring", "year": 2025,
                "sections": []
            }
        ]
    }"#;

    fn catalog() -> Catalog {
        Catalog::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_course_requests_filter_eligible_sections() {
        let c = catalog();
        let reqs = c.course_requests(&["MATH 101".to_string()], "Fall", 2024);
        assert_eq!(reqs.len(), 1);
        let crns: Vec<&str> = reqs[0].sections.iter().map(|s| s.crn.as_str()).collect();
        // 20001 lleno, 20002 online
        assert_eq!(crns, vec!["20003"]);
        assert_eq!(reqs[0].sections[0].course_name, "Calculus I");
        assert_eq!(reqs[0].sections[0].credits, 4);
    }

    #[test]
    fn test_course_requests_keep_order_and_skip_unknown() {
        let c = catalog();
        let codes = vec!["ICS 101".to_string(), "NOPE 1".to_string(), "MATH 101".to_string(), "ICS 101".to_string()];
        let reqs = c.course_requests(&codes, "Fall", 2024);
        let order: Vec<&str> = reqs.iter().map(|r| r.course_code.as_str()).collect();
        assert_eq!(order, vec!["ICS 101", "MATH 101"]);
    }

    #[test]
    fn test_building_map_skips_inactive() {
        let m = catalog().building_map();
        assert_eq!(m.len(), 2);
        assert!(m.contains_key("63"));
        assert!(!m.contains_key("99"));
    }

    #[test]
    fn test_list_and_search() {
        let c = catalog();
        let filter = CourseFilter { term: Some("Fall".to_string()), year: Some(2024), ..CourseFilter::default() };
        let codes: Vec<&str> = c.list_courses(&filter).iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["ICS 101", "MATH 101"]);

        let found = c.search("calc", None, None);
        assert_eq!(found.len(), 1);
        assert_eq!(c.departments(Some("Fall"), Some(2024)), vec!["Computer Science", "Mathematics"]);
        let stats = c.stats(Some("Fall"), Some(2024));
        assert_eq!(stats, CatalogStats { total_courses: 2, total_sections: 3, departments: 2 });
    }

    #[test]
    fn test_available_sections_include_online() {
        let c = catalog();
        let (_, secs) = c.available_sections("MATH 101", Some("Fall"), Some(2024)).unwrap();
        let crns: Vec<&str> = secs.iter().map(|s| s.crn.as_str()).collect();
        assert_eq!(crns, vec!["20002", "20003"]);
    }

    #[test]
    fn test_malformed_time_rejects_catalog() {
        let bad_time = SAMPLE.replacen("\"09:30\"", "\"9h30\"", 1);
        assert!(Catalog::from_json_str(&bad_time).is_err());
        let bad_day = SAMPLE.replacen("\"Tuesday\"", "\"Friday\"", 1);
        assert!(Catalog::from_json_str(&bad_day).is_err());
    }
}
