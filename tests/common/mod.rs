#![allow(dead_code)]
// Constructores compartidos por los tests de integración.
use campusshift::models::{BuildingMap, Coordinate, CourseRequest, MeetingTime, Section};

pub fn slot(day: &str, start: &str, end: &str) -> MeetingTime {
    MeetingTime::parse(day, start, end).expect("franja válida")
}

pub fn section(course: &str, crn: &str, building: &str, slots: &[(&str, &str, &str)]) -> Section {
    Section {
        course_code: course.to_string(),
        course_name: format!("{} name", course),
        credits: 3,
        crn: crn.to_string(),
        section_number: "001".to_string(),
        instructor: format!("Dr. {}", crn),
        capacity: 30,
        enrolled: 10,
        time_slots: slots.iter().map(|(d, s, e)| slot(d, s, e)).collect(),
        building: building.to_string(),
        room: "101".to_string(),
        is_online: false,
    }
}

pub fn request(course: &str, sections: Vec<Section>) -> CourseRequest {
    CourseRequest { course_code: course.to_string(), sections }
}

/// Edificios 63 y 24 del campus de ejemplo.
pub fn campus() -> BuildingMap {
    let mut m = BuildingMap::new();
    m.insert("63".to_string(), Coordinate::new(26.3111, 50.2094));
    m.insert("24".to_string(), Coordinate::new(26.3130, 50.2070));
    m.insert("76".to_string(), Coordinate::new(26.3140, 50.2060));
    m
}
