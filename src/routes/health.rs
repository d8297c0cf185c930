use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::{error::AppError, store::TaskStore};

/// Health check endpoint
///
/// Reports liveness, the current time and how many tasks are held in memory.
#[get("/health")]
pub async fn health(tasks: web::Data<TaskStore>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "tasks": tasks.len()?,
    })))
}
