use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::{distance_km, walking_minutes};
use crate::api_json::WalkingTimeRequest;
use crate::server::AppState;

/// GET /buildings
pub async fn list_handler(state: web::Data<AppState>) -> impl Responder {
    let buildings = state.catalog.buildings();
    HttpResponse::Ok().json(json!({"count": buildings.len(), "buildings": buildings}))
}

/// GET /buildings/{number}
pub async fn get_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.catalog.building(path.trim()) {
        Some(b) => HttpResponse::Ok().json(json!({"building": b})),
        None => HttpResponse::NotFound().json(json!({"error": "building not found"})),
    }
}

/// POST /buildings/walking-time  `{"building1": "63", "building2": "24"}`
pub async fn walking_time_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let params: WalkingTimeRequest = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    if params.building1.trim().is_empty() || params.building2.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "both building numbers are required"}));
    }

    let (b1, b2) = match (state.catalog.building(params.building1.trim()), state.catalog.building(params.building2.trim())) {
        (Some(a), Some(b)) => (a, b),
        _ => return HttpResponse::NotFound().json(json!({"error": "one or both buildings not found"})),
    };

    let distance = distance_km(b1.coordinates, b2.coordinates);
    // mismo edificio: sin caminata
    let minutes = if b1.building_number == b2.building_number { 0 } else { walking_minutes(b1.coordinates, b2.coordinates) };

    HttpResponse::Ok().json(json!({
        "building1": b1.building_name,
        "building2": b2.building_name,
        "distance_km": (distance * 100.0).round() / 100.0,
        "walking_time": minutes,
    }))
}
