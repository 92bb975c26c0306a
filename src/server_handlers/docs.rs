use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::GenerateRequest;
use crate::models::Preferences;
use crate::server::USER_HEADER;

pub async fn help_handler() -> impl Responder {
    let mut preferences = Preferences::default();
    preferences.avoid_early_classes = true;
    preferences.preferred_buildings.insert("63".to_string());
    let example = GenerateRequest {
        course_codes: vec!["ICS 101".to_string(), "MATH 101".to_string()],
        term: "Fall".to_string(),
        year: 2024,
        preferences: Some(preferences),
    };

    let help = json!({
        "description": "API para generar horarios sin choques. POST /schedules/generate recibe los cursos pedidos y devuelve hasta 10 horarios ordenados por puntaje.",
        "post_example": example,
        "user_header": USER_HEADER,
        "note": "Si 'preferences' no viene en la petición se usan las guardadas con PUT /users/preferences. Cualquier curso puede quedar fuera de un horario.",
        "routes": [
            "POST /schedules/generate", "POST /schedules/save", "GET /schedules",
            "GET|PUT|DELETE /schedules/{id}", "GET /schedules/{id}/crns", "POST /schedules/compare",
            "GET /courses", "GET /courses/{code}", "GET /courses/{code}/sections",
            "GET /courses/departments/list", "GET /courses/search/{query}", "GET /courses/stats/overview",
            "GET /buildings", "GET /buildings/{number}", "POST /buildings/walking-time",
            "GET|PUT /users/preferences", "GET /users/usage"
        ]
    });

    HttpResponse::Ok().json(help)
}
