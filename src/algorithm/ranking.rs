use std::cmp::Ordering;

use crate::models::ScheduleCandidate;

/// Cantidad de horarios devueltos por defecto.
pub const DEFAULT_MAX_SCHEDULES: usize = 10;

/// Ordena por puntaje descendente y se queda con los `max_schedules` mejores.
/// El orden es estable: a igual puntaje se conserva el orden de descubrimiento.
pub fn select_top(mut candidates: Vec<ScheduleCandidate>, max_schedules: usize) -> Vec<ScheduleCandidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(max_schedules);
    candidates
}
