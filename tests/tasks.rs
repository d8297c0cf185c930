use actix_web::middleware::Logger;
use actix_web::{http::header, http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use taskdeck::auth::{AuthMiddleware, LoginResponse, SessionIssuer};
use taskdeck::models::{Task, TaskStatus};
use taskdeck::routes;
use taskdeck::routes::health;
use taskdeck::store::{AccountStore, TaskStore};

const SECRET: &str = "tasks-test-secret";

async fn signup_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    useremail: &str,
    password: &str,
) -> Result<String, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "name": "Tester", "useremail": useremail, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    if resp.status() != StatusCode::CREATED {
        return Err(format!("signup failed with {}", resp.status()));
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "useremail": useremail, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "login failed. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let login: LoginResponse =
        serde_json::from_slice(&body).map_err(|e| format!("bad login body: {}", e))?;
    Ok(login.token)
}

#[actix_rt::test]
async fn test_task_crud_scenario() {
    let issuer = web::Data::new(SessionIssuer::new(SECRET, Duration::from_secs(3600)));
    let app = test::init_service(
        App::new()
            .app_data(issuer.clone())
            .app_data(web::Data::new(AccountStore::new(4)))
            .app_data(web::Data::new(TaskStore::new()))
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(issuer.clone(), false))
                    .configure(routes::config),
            ),
    )
    .await;

    // 1. Create with default status
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "Write spec" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": 1, "title": "Write spec", "status": "To Do" }));

    // 2. Create with explicit status
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "Ship it", "status": "In Progress" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let second: Task = test::read_body_json(resp).await;
    assert_eq!(second.id, 2);
    assert_eq!(second.status, TaskStatus::InProgress);

    // 3. List keeps insertion order
    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![1, 2]
    );

    // 4. Partial update
    let req = test::TestRequest::put()
        .uri("/api/tasks/1")
        .set_json(json!({ "status": "Done" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "id": 1, "title": "Write spec", "status": "Done" }));

    // 5. Delete
    let req = test::TestRequest::delete().uri("/api/tasks/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Deleted" }));

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        tasks,
        vec![Task {
            id: 1,
            title: "Write spec".to_string(),
            status: TaskStatus::Done
        }]
    );

    // 6. Deleted task is gone everywhere
    for req in [
        test::TestRequest::get().uri("/api/tasks/2").to_request(),
        test::TestRequest::put()
            .uri("/api/tasks/2")
            .set_json(json!({ "title": "ghost" }))
            .to_request(),
        test::TestRequest::delete().uri("/api/tasks/2").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Task not found" }));
    }

    // 7. Ids are never reused
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "Third", "status": "" }))
        .to_request();
    let third: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(third.id, 3);
    assert_eq!(third.status, TaskStatus::Todo);

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["tasks"], 2);
}

#[actix_rt::test]
async fn test_task_routes_ignore_bearer_when_not_enforced() {
    let issuer = web::Data::new(SessionIssuer::new(SECRET, Duration::from_secs(3600)));
    let app = test::init_service(
        App::new()
            .app_data(issuer.clone())
            .app_data(web::Data::new(AccountStore::new(4)))
            .app_data(web::Data::new(TaskStore::new()))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(issuer.clone(), false))
                    .configure(routes::config),
            ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
        .set_json(json!({ "title": "Anyone can do this" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_enforced_auth_gates_task_routes() {
    let issuer = web::Data::new(SessionIssuer::new(SECRET, Duration::from_secs(3600)));
    let app = test::init_service(
        App::new()
            .app_data(issuer.clone())
            .app_data(web::Data::new(AccountStore::new(4)))
            .app_data(web::Data::new(TaskStore::new()))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(issuer.clone(), true))
                    .configure(routes::config),
            ),
    )
    .await;

    // Auth routes stay open
    let token = signup_and_login(&app, "gate@x.com", "Abcdef1!")
        .await
        .expect("signup/login should pass the gate");

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_issuer = SessionIssuer::new("some-other-secret", Duration::from_secs(3600));
    let forged = other_issuer.issue("gate@x.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", forged)))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({ "title": "Gated task", "status": "Done" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.status, TaskStatus::Done);
}
