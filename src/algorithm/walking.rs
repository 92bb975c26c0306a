// Tiempo total de caminata entre clases consecutivas de un mismo día.
use std::collections::BTreeMap;

use crate::algorithm::geo::walking_minutes;
use crate::models::{BuildingMap, ClockTime, Section, Weekday};

/// Ocurrencia de una clase en un día concreto.
#[derive(Debug, Clone, Copy)]
struct DayEntry<'a> {
    building: &'a str,
    start: ClockTime,
}

/// Agrupa los bloques por día, ordena cada día por hora de inicio (orden
/// estable) y suma la caminata entre cada par consecutivo.
///
/// - Mismo edificio: 0 minutos.
/// - Edificio sin coordenadas en `buildings`: el tramo aporta 0 (no es error).
pub fn total_walking_time(sections: &[Section], buildings: &BuildingMap) -> u32 {
    let mut days: BTreeMap<Weekday, Vec<DayEntry<'_>>> = BTreeMap::new();
    for section in sections {
        for slot in &section.time_slots {
            days.entry(slot.day).or_default().push(DayEntry { building: &section.building, start: slot.start });
        }
    }

    let mut total = 0u32;
    for entries in days.values_mut() {
        entries.sort_by_key(|e| e.start);
        for pair in entries.windows(2) {
            total += transition_minutes(pair[0].building, pair[1].building, buildings);
        }
    }
    total
}

fn transition_minutes(from: &str, to: &str, buildings: &BuildingMap) -> u32 {
    if from == to {
        return 0;
    }
    match (buildings.get(from), buildings.get(to)) {
        (Some(a), Some(b)) => walking_minutes(*a, *b),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, MeetingTime};

    fn section(code: &str, building: &str, slots: &[(&str, &str, &str)]) -> Section {
        Section {
            course_code: code.to_string(),
            course_name: code.to_string(),
            credits: 3,
            crn: format!("{}-1", code),
            section_number: "001".to_string(),
            instructor: "Dr. Test".to_string(),
            capacity: 30,
            enrolled: 0,
            time_slots: slots.iter().map(|(d, s, e)| MeetingTime::parse(d, s, e).unwrap()).collect(),
            building: building.to_string(),
            room: "101".to_string(),
            is_online: false,
        }
    }

    fn buildings() -> BuildingMap {
        let mut m = BuildingMap::new();
        m.insert("63".to_string(), Coordinate::new(26.3111, 50.2094));
        m.insert("24".to_string(), Coordinate::new(26.3130, 50.2070));
        m
    }

    #[test]
    fn test_single_section_walks_nothing() {
        let s = section("A", "63", &[("Sunday", "08:00", "09:15"), ("Tuesday", "08:00", "09:15")]);
        assert_eq!(total_walking_time(&[s], &buildings()), 0);
    }

    #[test]
    fn test_same_building_is_zero() {
        let a = section("A", "63", &[("Sunday", "08:00", "09:15")]);
        let b = section("B", "63", &[("Sunday", "09:30", "10:45")]);
        assert_eq!(total_walking_time(&[a, b], &buildings()), 0);
    }

    #[test]
    fn test_counts_each_day_transition() {
        // dos días con el mismo traslado 63 -> 24
        let a = section("A", "63", &[("Sunday", "08:00", "09:15"), ("Tuesday", "08:00", "09:15")]);
        let b = section("B", "24", &[("Sunday", "09:30", "10:45"), ("Tuesday", "09:30", "10:45")]);
        let one_hop = walking_minutes(Coordinate::new(26.3111, 50.2094), Coordinate::new(26.3130, 50.2070));
        assert_eq!(total_walking_time(&[a, b], &buildings()), one_hop * 2);
    }

    #[test]
    fn test_orders_by_start_time_not_insertion() {
        // A(63) 10:00, B(24) 08:00, C(63) 12:00 -> 24->63->63 = un solo tramo
        let a = section("A", "63", &[("Monday", "10:00", "10:50")]);
        let b = section("B", "24", &[("Monday", "08:00", "08:50")]);
        let c = section("C", "63", &[("Monday", "12:00", "12:50")]);
        let one_hop = walking_minutes(Coordinate::new(26.3130, 50.2070), Coordinate::new(26.3111, 50.2094));
        assert_eq!(total_walking_time(&[a, b, c], &buildings()), one_hop);
    }

    #[test]
    fn test_unknown_building_contributes_zero() {
        let a = section("A", "63", &[("Monday", "08:00", "08:50")]);
        let b = section("B", "99", &[("Monday", "09:00", "09:50")]);
        assert_eq!(total_walking_time(&[a, b], &buildings()), 0);
    }
}
