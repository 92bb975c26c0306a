// Funciones para detectar choques de horario entre secciones.
use std::borrow::Borrow;

use crate::models::{MeetingTime, Section};

/// True si algún bloque de `a` solapa con alguno de `b` (mismo día y rango).
/// Que uno termine justo cuando empieza el otro no es choque.
pub fn meetings_conflict(a: &[MeetingTime], b: &[MeetingTime]) -> bool {
    a.iter().any(|ma| b.iter().any(|mb| ma.overlaps(mb)))
}

pub fn sections_conflict(a: &Section, b: &Section) -> bool {
    meetings_conflict(&a.time_slots, &b.time_slots)
}

/// True si `candidate` choca con cualquiera de las secciones ya comprometidas.
/// Acepta `&[Section]` o `&[&Section]`.
pub fn has_conflict<S: Borrow<Section>>(partial: &[S], candidate: &Section) -> bool {
    partial.iter().any(|committed| sections_conflict(committed.borrow(), candidate))
}

/// Primer par de secciones que chocan dentro de un horario, si existe.
pub fn find_conflicting_pair(sections: &[Section]) -> Option<(usize, usize)> {
    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            if sections_conflict(&sections[i], &sections[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mt(day: &str, s: &str, e: &str) -> MeetingTime {
        MeetingTime::parse(day, s, e).unwrap()
    }

    #[test]
    fn test_boundary_is_not_conflict() {
        // 09:00-09:50 y 09:50-10:40 el lunes conviven
        let a = [mt("Monday", "09:00", "09:50")];
        let b = [mt("Monday", "09:50", "10:40")];
        assert!(!meetings_conflict(&a, &b));
        assert!(!meetings_conflict(&b, &a));
    }

    #[test]
    fn test_overlap_same_day_only() {
        let a = [mt("Sunday", "08:00", "09:15")];
        let b = [mt("Sunday", "09:00", "10:00")];
        let c = [mt("Monday", "08:00", "09:15")];
        assert!(meetings_conflict(&a, &b));
        assert!(!meetings_conflict(&a, &c));
    }

    #[test]
    fn test_contained_interval_conflicts() {
        let a = [mt("Tuesday", "08:00", "12:00")];
        let b = [mt("Tuesday", "09:00", "09:30")];
        assert!(meetings_conflict(&a, &b));
    }
}
