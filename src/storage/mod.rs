// Persistencia de horarios guardados, preferencias y uso por usuario (SQLite)
pub mod db;

pub use db::{ScheduleStore, StoreResult, LIST_LIMIT};
