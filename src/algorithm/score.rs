// Puntaje heurístico de un horario completo según las preferencias del usuario.
use crate::models::{Preferences, Section};

pub const BASE_SCORE: f64 = 100.0;
pub const WALKING_PENALTY_PER_MINUTE: f64 = 0.5;
pub const PREFERRED_PROFESSOR_BONUS: f64 = 10.0;
pub const EARLY_CLASS_PENALTY: f64 = 5.0;
/// Clases que empiezan antes de esta hora cuentan como "temprano".
pub const EARLY_CLASS_HOUR: u16 = 9;
pub const AVOIDED_BUILDING_PENALTY: f64 = 15.0;
pub const PREFERRED_BUILDING_BONUS: f64 = 5.0;
pub const OVER_LIMIT_PENALTY_PER_MINUTE: f64 = 2.0;

/// Calcula el puntaje desde cero. Todos los términos son aditivos sobre el
/// mismo acumulador y el resultado nunca es negativo.
pub fn score(sections: &[Section], preferences: &Preferences, total_walking_time: u32) -> f64 {
    let mut score = BASE_SCORE;

    score -= f64::from(total_walking_time) * WALKING_PENALTY_PER_MINUTE;

    for section in sections {
        if preferences.preferred_professors.contains(&section.instructor) {
            score += PREFERRED_PROFESSOR_BONUS;
        }
        if preferences.avoid_buildings.contains(&section.building) {
            score -= AVOIDED_BUILDING_PENALTY;
        }
        if preferences.preferred_buildings.contains(&section.building) {
            score += PREFERRED_BUILDING_BONUS;
        }
    }

    // se penaliza cada bloque temprano, no cada curso
    if preferences.avoid_early_classes {
        let early = sections
            .iter()
            .flat_map(|s| s.time_slots.iter())
            .filter(|m| m.start.hour() < EARLY_CLASS_HOUR)
            .count();
        score -= early as f64 * EARLY_CLASS_PENALTY;
    }

    if total_walking_time > preferences.max_walking_distance {
        let excess = total_walking_time - preferences.max_walking_distance;
        score -= f64::from(excess) * OVER_LIMIT_PENALTY_PER_MINUTE;
    }

    if score < 0.0 { 0.0 } else { score }
}
