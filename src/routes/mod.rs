pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::error::AppError;

/// Routes under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Malformed or incomplete JSON bodies become a 400 with a `{message}` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// A non-numeric task id can never match a task.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| AppError::task_not_found().into())
}
