use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

use crate::algorithm::conflict::find_conflicting_pair;
use crate::algorithm::{generate_from_catalog, GenerateOutcome};
use crate::api_json::{
    CompareRequest, ComparisonEntry, GenerateRequest, GenerateResponse, SaveRequest, ScheduleListQuery,
    UpdateScheduleRequest,
};
use crate::server::{internal_error, user_id, AppState};

/// POST /schedules/generate
pub async fn generate_handler(req: HttpRequest, state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let params: GenerateRequest = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let codes = params.normalized_codes();
    if codes.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "course codes are required"}));
    }

    // sin preferencias en la petición: las guardadas del usuario
    let preferences = match params.preferences {
        Some(p) => p,
        None => match state.store.get_preferences(&user) {
            Ok(p) => p,
            Err(e) => return internal_error("failed to load preferences", e.as_ref()),
        },
    };

    let permit = match state.permits.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"})),
    };

    let start = Instant::now();
    let catalog = state.catalog.clone();
    let config = state.generator;
    let term = params.term.clone();
    let year = params.year;
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        generate_from_catalog(&catalog, &codes, &term, year, &preferences, &config)
    });

    let outcome = match blocking_handle.await {
        Ok(res) => res,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    };

    let generated = match outcome {
        Ok(GenerateOutcome::Generated(g)) => g,
        Ok(GenerateOutcome::NoCourses) => {
            return HttpResponse::NotFound().json(json!({"error": "no courses found for the given codes and term"}));
        }
        Err(e) if e.is_search_cap() => {
            warn!(user = %user, error = %e, "búsqueda abortada por tope");
            return HttpResponse::UnprocessableEntity().json(json!({"error": e.to_string()}));
        }
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    };

    info!(user = %user, returned = generated.schedules.len(), duration_ms = start.elapsed().as_millis() as u64, "generate");

    if generated.schedules.is_empty() {
        return HttpResponse::NotFound().json(json!({"error": "no valid schedules found for the given courses"}));
    }

    HttpResponse::Ok().json(GenerateResponse {
        message: "schedules generated successfully",
        count: generated.schedules.len(),
        nodes_visited: generated.stats.nodes_visited,
        schedules: generated.schedules,
    })
}

/// POST /schedules/save
pub async fn save_handler(req: HttpRequest, state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let params: SaveRequest = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let name = params.name.as_deref().map(str::trim).unwrap_or("");
    let data = match params.schedule_data {
        Some(d) if !name.is_empty() => d,
        _ => return HttpResponse::BadRequest().json(json!({"error": "schedule data and name are required"})),
    };

    if let Some((a, b)) = find_conflicting_pair(&data.candidate.sections) {
        let (sa, sb) = (&data.candidate.sections[a], &data.candidate.sections[b]);
        return HttpResponse::BadRequest().json(json!({
            "error": format!("sections {} and {} overlap", sa.crn, sb.crn)
        }));
    }

    match state.store.save_schedule(&user, name, &data.term, data.year, &data.candidate) {
        Ok(saved) => HttpResponse::Created().json(json!({"message": "schedule saved successfully", "schedule": saved})),
        Err(e) => internal_error("failed to save schedule", e.as_ref()),
    }
}

/// GET /schedules?term=..&year=..
pub async fn list_handler(req: HttpRequest, state: web::Data<AppState>, query: web::Query<ScheduleListQuery>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let q = query.into_inner();
    match state.store.list_schedules(&user, q.term.as_deref(), q.year) {
        Ok(list) => HttpResponse::Ok().json(json!({"count": list.len(), "schedules": list})),
        Err(e) => internal_error("failed to get schedules", e.as_ref()),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": "schedule not found"}))
}

/// GET /schedules/{id}
pub async fn get_handler(req: HttpRequest, state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    match state.store.get_schedule(&user, path.into_inner()) {
        Ok(Some(s)) => HttpResponse::Ok().json(json!({"schedule": s})),
        Ok(None) => not_found(),
        Err(e) => internal_error("failed to get schedule", e.as_ref()),
    }
}

/// PUT /schedules/{id}
pub async fn update_handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let params: UpdateScheduleRequest = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    match state.store.update_schedule(&user, path.into_inner(), params.name.as_deref(), params.is_favorite) {
        Ok(Some(s)) => HttpResponse::Ok().json(json!({"message": "schedule updated successfully", "schedule": s})),
        Ok(None) => not_found(),
        Err(e) => internal_error("failed to update schedule", e.as_ref()),
    }
}

/// DELETE /schedules/{id}
pub async fn delete_handler(req: HttpRequest, state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    match state.store.delete_schedule(&user, path.into_inner()) {
        Ok(true) => HttpResponse::Ok().json(json!({"message": "schedule deleted successfully"})),
        Ok(false) => not_found(),
        Err(e) => internal_error("failed to delete schedule", e.as_ref()),
    }
}

/// GET /schedules/{id}/crns
pub async fn crns_handler(req: HttpRequest, state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    match state.store.get_schedule(&user, path.into_inner()) {
        Ok(Some(s)) => {
            let crns = s.crns();
            HttpResponse::Ok().json(json!({"count": crns.len(), "crns": crns, "schedule_name": s.name}))
        }
        Ok(None) => not_found(),
        Err(e) => internal_error("failed to get crns", e.as_ref()),
    }
}

/// POST /schedules/compare
pub async fn compare_handler(req: HttpRequest, state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let params: CompareRequest = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    if params.schedule_ids.len() < 2 {
        return HttpResponse::BadRequest().json(json!({"error": "at least 2 schedule ids are required for comparison"}));
    }
    match state.store.compare_schedules(&user, &params.schedule_ids) {
        Ok(Some(list)) => {
            let comparison: Vec<ComparisonEntry> = list.iter().map(ComparisonEntry::from).collect();
            HttpResponse::Ok().json(json!({"count": comparison.len(), "comparison": comparison}))
        }
        Ok(None) => HttpResponse::NotFound().json(json!({"error": "one or more schedules not found"})),
        Err(e) => internal_error("failed to compare schedules", e.as_ref()),
    }
}
