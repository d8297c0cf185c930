use crate::{
    auth::{AuthenticatedAccount, MessageResponse},
    error::AppError,
    models::{NewTask, TaskPatch},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

fn actor(account: &Option<AuthenticatedAccount>) -> &str {
    account
        .as_ref()
        .map(|AuthenticatedAccount(email)| email.as_str())
        .unwrap_or("anonymous")
}

/// Lists every task, in the order they were created.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
#[get("")]
pub async fn get_tasks(tasks: web::Data<TaskStore>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(tasks.list()?))
}

/// Creates a new task.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `status` (optional): `"To Do"`, `"In Progress"` or `"Done"`. Defaults to `"To Do"`.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with its store-assigned `id`.
/// - `400 Bad Request`: malformed body or unknown status.
/// - `422 Unprocessable Entity`: title empty or too long.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskStore>,
    task_data: web::Json<NewTask>,
    account: Option<AuthenticatedAccount>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks.create(task_data.into_inner())?;
    log::info!("task {} created by {}", task.id, actor(&account));

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: `{"message": "Task not found"}`.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(task_id.into_inner())?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Fields absent from the body are left untouched.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: `{"message": "Task not found"}`.
/// - `422 Unprocessable Entity`: title present but empty or too long.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<u64>,
    task_data: web::Json<TaskPatch>,
    account: Option<AuthenticatedAccount>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks.update(task_id.into_inner(), task_data.into_inner())?;
    log::info!("task {} updated by {}", task.id, actor(&account));

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Deleted"}`.
/// - `404 Not Found`: `{"message": "Task not found"}`.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<u64>,
    account: Option<AuthenticatedAccount>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    tasks.delete(id)?;
    log::info!("task {} deleted by {}", id, actor(&account));

    Ok(HttpResponse::Ok().json(MessageResponse::new("Deleted")))
}
