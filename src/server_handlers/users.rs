use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::models::Preferences;
use crate::server::{internal_error, user_id, AppState};

/// GET /users/preferences
pub async fn get_preferences_handler(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    match state.store.get_preferences(&user) {
        Ok(p) => HttpResponse::Ok().json(json!({"preferences": p})),
        Err(e) => internal_error("failed to get preferences", e.as_ref()),
    }
}

/// PUT /users/preferences. Los campos ausentes vuelven a su valor por defecto.
pub async fn put_preferences_handler(req: HttpRequest, state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let prefs: Preferences = match serde_json::from_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    match state.store.set_preferences(&user, &prefs) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "preferences updated successfully", "preferences": prefs})),
        Err(e) => internal_error("failed to update preferences", e.as_ref()),
    }
}

/// GET /users/usage
pub async fn usage_handler(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let user = match user_id(&req) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    match state.store.usage(&user) {
        Ok(usage) => HttpResponse::Ok().json(json!({"usage": usage})),
        Err(e) => internal_error("failed to get usage statistics", e.as_ref()),
    }
}
