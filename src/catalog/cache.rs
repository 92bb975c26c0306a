//! Caché simple en memoria para catálogos ya parseados
//!
//! Proporciona load_catalog_cached(path) -> Arc<Catalog> que evita volver a
//! leer y parsear el mismo archivo en cada petición.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use super::Catalog;
use crate::error::CatalogError;

// Caché global: ruta -> Arc<Catalog>
static CATALOG_CACHE: OnceLock<Mutex<HashMap<String, Arc<Catalog>>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<String, Arc<Catalog>>> {
    CATALOG_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Devuelve el catálogo del archivo indicado, usando el caché si ya se leyó.
///
/// El Mutex sólo se toma para consultar e insertar; la lectura del archivo
/// ocurre fuera del bloqueo. Si dos hilos leen a la vez gana el primero en
/// insertar.
pub fn load_catalog_cached<P: AsRef<Path>>(path: P) -> Result<Arc<Catalog>, CatalogError> {
    let key = path.as_ref().to_string_lossy().to_string();

    {
        let guard = cache().lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = guard.get(&key) {
            debug!(path = %key, "catálogo desde caché");
            return Ok(Arc::clone(existing));
        }
    }

    let loaded = Arc::new(Catalog::load(path.as_ref())?);
    let mut guard = cache().lock().unwrap_or_else(|e| e.into_inner());
    let entry = guard.entry(key).or_insert_with(|| Arc::clone(&loaded));
    Ok(Arc::clone(entry))
}

/// Vacía el caché (p.ej. tras reemplazar el archivo de catálogo).
pub fn clear_catalog_cache() {
    cache().lock().unwrap_or_else(|e| e.into_inner()).clear();
}
