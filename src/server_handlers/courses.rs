use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::CourseFilter;
use crate::server::AppState;

/// Query `?term=..&year=..` común a las rutas de cursos.
#[derive(Debug, Default, Deserialize)]
pub struct TermQuery {
    pub term: Option<String>,
    pub year: Option<i32>,
}

/// GET /courses?term=&year=&department=&course_code=
pub async fn list_handler(state: web::Data<AppState>, query: web::Query<CourseFilter>) -> impl Responder {
    let courses = state.catalog.list_courses(&query);
    HttpResponse::Ok().json(json!({"count": courses.len(), "courses": courses}))
}

/// GET /courses/{code}
pub async fn get_handler(state: web::Data<AppState>, path: web::Path<String>, query: web::Query<TermQuery>) -> impl Responder {
    let code = path.into_inner();
    match state.catalog.find_course(code.trim(), query.term.as_deref(), query.year) {
        Some(course) => HttpResponse::Ok().json(json!({"course": course})),
        None => HttpResponse::NotFound().json(json!({"error": "course not found"})),
    }
}

/// GET /courses/{code}/sections: sólo secciones con cupo
pub async fn sections_handler(state: web::Data<AppState>, path: web::Path<String>, query: web::Query<TermQuery>) -> impl Responder {
    let code = path.into_inner();
    match state.catalog.available_sections(code.trim(), query.term.as_deref(), query.year) {
        Some((course, sections)) => HttpResponse::Ok().json(json!({
            "course_code": course.course_code,
            "course_name": course.course_name,
            "count": sections.len(),
            "sections": sections,
        })),
        None => HttpResponse::NotFound().json(json!({"error": "course not found"})),
    }
}

/// GET /courses/departments/list
pub async fn departments_handler(state: web::Data<AppState>, query: web::Query<TermQuery>) -> impl Responder {
    let departments = state.catalog.departments(query.term.as_deref(), query.year);
    HttpResponse::Ok().json(json!({"departments": departments}))
}

/// GET /courses/search/{query}
pub async fn search_handler(state: web::Data<AppState>, path: web::Path<String>, query: web::Query<TermQuery>) -> impl Responder {
    let q = path.into_inner();
    let courses = state.catalog.search(&q, query.term.as_deref(), query.year);
    let brief: Vec<serde_json::Value> = courses
        .iter()
        .map(|c| json!({"course_code": c.course_code, "course_name": c.course_name, "credits": c.credits, "department": c.department}))
        .collect();
    HttpResponse::Ok().json(json!({"count": brief.len(), "courses": brief, "query": q}))
}

/// GET /courses/stats/overview
pub async fn stats_handler(state: web::Data<AppState>, query: web::Query<TermQuery>) -> impl Responder {
    let stats = state.catalog.stats(query.term.as_deref(), query.year);
    HttpResponse::Ok().json(json!({
        "total_courses": stats.total_courses,
        "total_sections": stats.total_sections,
        "departments": stats.departments,
        "term": query.term,
        "year": query.year,
    }))
}
