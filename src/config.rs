// Configuración de la aplicación desde variables de entorno (y `.env` si existe).
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::algorithm::search::{DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_NODES};
use crate::algorithm::{GeneratorConfig, OmissionMode, SearchLimits, DEFAULT_MAX_SCHEDULES};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
pub const DEFAULT_DB_PATH: &str = "data/schedules.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub catalog_path: PathBuf,
    pub db_path: PathBuf,
    pub generator: GeneratorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            generator: GeneratorConfig::default(),
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Lee `CAMPUSSHIFT_*` del entorno. Los valores inválidos se ignoran con
    /// un aviso y se usa el valor por defecto.
    pub fn from_env() -> AppConfig {
        load_dotenv();
        AppConfig::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable (tests).
    pub fn from_lookup<F>(lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("CAMPUSSHIFT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let catalog_path = get("CAMPUSSHIFT_CATALOG").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));
        let db_path = get("CAMPUSSHIFT_DB_PATH").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let max_schedules = parse_or("CAMPUSSHIFT_MAX_SCHEDULES", get("CAMPUSSHIFT_MAX_SCHEDULES"), DEFAULT_MAX_SCHEDULES);
        let max_nodes = parse_cap("CAMPUSSHIFT_MAX_NODES", get("CAMPUSSHIFT_MAX_NODES"), DEFAULT_MAX_NODES);
        let max_candidates = parse_cap("CAMPUSSHIFT_MAX_CANDIDATES", get("CAMPUSSHIFT_MAX_CANDIDATES"), DEFAULT_MAX_CANDIDATES);
        let omission = parse_or("CAMPUSSHIFT_OMISSION", get("CAMPUSSHIFT_OMISSION"), OmissionMode::Always);

        AppConfig {
            bind,
            catalog_path,
            db_path,
            generator: GeneratorConfig {
                max_schedules,
                omission,
                limits: SearchLimits { max_nodes, max_candidates },
            },
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => match v.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(key, value = %v, "valor de configuración inválido, se usa el valor por defecto");
                default
            }
        },
    }
}

// 0 desactiva el tope
fn parse_cap<T: FromStr + PartialEq + Default>(key: &str, raw: Option<String>, default: T) -> Option<T> {
    let v = parse_or(key, raw, default);
    if v == T::default() { None } else { Some(v) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_when_empty() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.generator.max_schedules, 10);
        assert_eq!(cfg.generator.omission, OmissionMode::Always);
    }

    #[test]
    fn test_overrides_and_disabled_caps() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CAMPUSSHIFT_BIND", "0.0.0.0:9000"),
            ("CAMPUSSHIFT_MAX_SCHEDULES", "5"),
            ("CAMPUSSHIFT_MAX_NODES", "0"),
            ("CAMPUSSHIFT_MAX_CANDIDATES", "1000"),
            ("CAMPUSSHIFT_OMISSION", "when-no-sections"),
        ]));
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.generator.max_schedules, 5);
        assert_eq!(cfg.generator.limits.max_nodes, None);
        assert_eq!(cfg.generator.limits.max_candidates, Some(1000));
        assert_eq!(cfg.generator.omission, OmissionMode::WhenNoSections);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[("CAMPUSSHIFT_MAX_SCHEDULES", "many"), ("CAMPUSSHIFT_OMISSION", "never")]));
        assert_eq!(cfg.generator.max_schedules, 10);
        assert_eq!(cfg.generator.omission, OmissionMode::Always);
    }
}
