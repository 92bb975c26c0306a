use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::models::{Preferences, SavedSchedule, ScheduleCandidate, UsageStats};

pub type StoreResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Máximo de horarios devueltos por `list_schedules`.
pub const LIST_LIMIT: i64 = 50;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS schedules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    term TEXT NOT NULL,
    year INTEGER NOT NULL,
    sections_json TEXT NOT NULL,
    total_credits INTEGER NOT NULL,
    total_walking_time INTEGER NOT NULL,
    score REAL NOT NULL,
    preferences_json TEXT NOT NULL,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_schedules_user ON schedules (user_id, term, year);
CREATE TABLE IF NOT EXISTS user_preferences (
    user_id TEXT PRIMARY KEY,
    preferences_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS usage (
    user_id TEXT PRIMARY KEY,
    schedules_generated INTEGER NOT NULL DEFAULT 0,
    last_schedule_generation TEXT
);
";

const SELECT_COLUMNS: &str = "id, user_id, name, term, year, sections_json, total_credits, \
     total_walking_time, score, preferences_json, is_favorite, created_at, updated_at";

/// Almacén de horarios. Una sola conexión protegida por Mutex; las
/// operaciones son cortas así que no hace falta un pool.
pub struct ScheduleStore {
    conn: Mutex<Connection>,
}

impl fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleStore(..)")
    }
}

// Fila cruda antes de decodificar las columnas JSON
struct RawSchedule {
    id: i64,
    user_id: String,
    name: String,
    term: String,
    year: i32,
    sections_json: String,
    total_credits: u32,
    total_walking_time: u32,
    score: f64,
    preferences_json: String,
    is_favorite: bool,
    created_at: String,
    updated_at: String,
}

impl RawSchedule {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<RawSchedule> {
        Ok(RawSchedule {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            term: row.get(3)?,
            year: row.get(4)?,
            sections_json: row.get(5)?,
            total_credits: row.get(6)?,
            total_walking_time: row.get(7)?,
            score: row.get(8)?,
            preferences_json: row.get(9)?,
            is_favorite: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn decode(self) -> StoreResult<SavedSchedule> {
        Ok(SavedSchedule {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            term: self.term,
            year: self.year,
            sections: serde_json::from_str(&self.sections_json)?,
            total_credits: self.total_credits,
            total_walking_time: self.total_walking_time,
            score: self.score,
            preferences: serde_json::from_str(&self.preferences_json)?,
            is_favorite: self.is_favorite,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

impl ScheduleStore {
    /// Abre (o crea) la base en `path`, creando el directorio si no existe.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<ScheduleStore> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "base de horarios abierta");
        ScheduleStore::init(conn)
    }

    pub fn open_in_memory() -> StoreResult<ScheduleStore> {
        ScheduleStore::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<ScheduleStore> {
        conn.execute_batch(SCHEMA)?;
        Ok(ScheduleStore { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Guarda el candidato tal cual y suma uno al contador de uso del usuario.
    pub fn save_schedule(
        &self,
        user_id: &str,
        name: &str,
        term: &str,
        year: i32,
        candidate: &ScheduleCandidate,
    ) -> StoreResult<SavedSchedule> {
        let sections_json = serde_json::to_string(&candidate.sections)?;
        let preferences_json = serde_json::to_string(&candidate.preferences)?;
        let ts = now();

        let id = {
            let mut conn = self.lock();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO schedules (
                    user_id, name, term, year, sections_json, total_credits,
                    total_walking_time, score, preferences_json, is_favorite,
                    is_active, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, 1, ?10, ?10)",
                params![
                    user_id,
                    name,
                    term,
                    year,
                    sections_json,
                    candidate.total_credits,
                    candidate.total_walking_time,
                    candidate.score,
                    preferences_json,
                    ts,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO usage (user_id, schedules_generated, last_schedule_generation)
                 VALUES (?1, 1, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET
                    schedules_generated = schedules_generated + 1,
                    last_schedule_generation = excluded.last_schedule_generation",
                params![user_id, ts],
            )?;
            tx.commit()?;
            id
        };
        debug!(user_id, id, "horario guardado");

        Ok(SavedSchedule {
            id,
            user_id: user_id.to_string(),
            name: name.to_string(),
            term: term.to_string(),
            year,
            sections: candidate.sections.clone(),
            total_credits: candidate.total_credits,
            total_walking_time: candidate.total_walking_time,
            score: candidate.score,
            preferences: candidate.preferences.clone(),
            is_favorite: false,
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Horarios activos del usuario, más recientes primero (máx. 50). El
    /// filtro por término sólo se aplica si vienen `term` y `year`.
    pub fn list_schedules(&self, user_id: &str, term: Option<&str>, year: Option<i32>) -> StoreResult<Vec<SavedSchedule>> {
        let conn = self.lock();
        let raws: Vec<RawSchedule> = match (term, year) {
            (Some(t), Some(y)) => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM schedules
                     WHERE user_id = ?1 AND is_active = 1 AND term = ?2 AND year = ?3
                     ORDER BY id DESC LIMIT ?4"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![user_id, t, y, LIST_LIMIT], RawSchedule::from_row)?;
                rows.collect::<rusqlite::Result<_>>()?
            }
            _ => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM schedules
                     WHERE user_id = ?1 AND is_active = 1
                     ORDER BY id DESC LIMIT ?2"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![user_id, LIST_LIMIT], RawSchedule::from_row)?;
                rows.collect::<rusqlite::Result<_>>()?
            }
        };
        raws.into_iter().map(RawSchedule::decode).collect()
    }

    pub fn get_schedule(&self, user_id: &str, id: i64) -> StoreResult<Option<SavedSchedule>> {
        let conn = self.lock();
        let sql = format!("SELECT {SELECT_COLUMNS} FROM schedules WHERE id = ?1 AND user_id = ?2 AND is_active = 1");
        let raw = conn
            .query_row(&sql, params![id, user_id], RawSchedule::from_row)
            .optional()?;
        raw.map(RawSchedule::decode).transpose()
    }

    /// Cambia nombre y/o favorito. `None` si el horario no existe.
    pub fn update_schedule(
        &self,
        user_id: &str,
        id: i64,
        name: Option<&str>,
        is_favorite: Option<bool>,
    ) -> StoreResult<Option<SavedSchedule>> {
        let changed = {
            let conn = self.lock();
            conn.execute(
                "UPDATE schedules SET
                    name = COALESCE(?3, name),
                    is_favorite = COALESCE(?4, is_favorite),
                    updated_at = ?5
                 WHERE id = ?1 AND user_id = ?2 AND is_active = 1",
                params![id, user_id, name, is_favorite, now()],
            )?
        };
        if changed == 0 {
            return Ok(None);
        }
        self.get_schedule(user_id, id)
    }

    /// Borrado lógico. Devuelve `false` si no había nada que borrar.
    pub fn delete_schedule(&self, user_id: &str, id: i64) -> StoreResult<bool> {
        let conn = self.lock();
        let changed = conn.execute(
            "UPDATE schedules SET is_active = 0, updated_at = ?3 WHERE id = ?1 AND user_id = ?2 AND is_active = 1",
            params![id, user_id, now()],
        )?;
        Ok(changed > 0)
    }

    pub fn schedule_crns(&self, user_id: &str, id: i64) -> StoreResult<Option<Vec<String>>> {
        Ok(self.get_schedule(user_id, id)?.map(|s| s.crns()))
    }

    /// Devuelve los horarios en el orden de `ids`; `None` si falta alguno.
    pub fn compare_schedules(&self, user_id: &str, ids: &[i64]) -> StoreResult<Option<Vec<SavedSchedule>>> {
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.get_schedule(user_id, id)? {
                Some(s) => out.push(s),
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    /// Preferencias guardadas; las por defecto si el usuario no tiene.
    pub fn get_preferences(&self, user_id: &str) -> StoreResult<Preferences> {
        let conn = self.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT preferences_json FROM user_preferences WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Preferences::default()),
        }
    }

    pub fn set_preferences(&self, user_id: &str, preferences: &Preferences) -> StoreResult<()> {
        let json = serde_json::to_string(preferences)?;
        let conn = self.lock();
        conn.execute(
            "INSERT INTO user_preferences (user_id, preferences_json, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET preferences_json = excluded.preferences_json, updated_at = excluded.updated_at",
            params![user_id, json, now()],
        )?;
        Ok(())
    }

    pub fn usage(&self, user_id: &str) -> StoreResult<UsageStats> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT schedules_generated, last_schedule_generation FROM usage WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;
        let (schedules_generated, last_schedule_generation) = row.unwrap_or((0, None));
        Ok(UsageStats { user_id: user_id.to_string(), schedules_generated, last_schedule_generation })
    }
}
