use crate::{
    auth::{LoginRequest, LoginResponse, MessageResponse, SessionIssuer, SignupRequest},
    error::AppError,
    store::AccountStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new account.
///
/// ## Responses:
/// - `201 Created`: `{"message": "Signup successful"}`.
/// - `400 Bad Request`: malformed body, or `{"message": "User already exists"}`.
/// - `422 Unprocessable Entity`: a field failed validation.
#[post("/signup")]
pub async fn signup(
    accounts: web::Data<AccountStore>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;

    accounts.signup(
        &signup_data.name,
        &signup_data.useremail,
        &signup_data.password,
    )?;
    log::info!("signup: {}", signup_data.useremail);

    Ok(HttpResponse::Created().json(MessageResponse::new("Signup successful")))
}

/// Log in and receive a session token.
///
/// ## Responses:
/// - `200 OK`: `{"token": "...", "user": {"name": "...", "useremail": "..."}}`.
/// - `400 Bad Request`: `{"message": "Invalid credentials"}` for an unknown
///   account and for a wrong password alike.
#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountStore>,
    issuer: web::Data<SessionIssuer>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    match accounts.login(&login_data.useremail, &login_data.password, &issuer) {
        Ok((token, user)) => {
            log::info!("login: {}", user.useremail);
            Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
        }
        Err(err) => {
            log::warn!("failed login for {}", login_data.useremail);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::json_config;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::time::Duration;

    #[actix_rt::test]
    async fn test_signup_validation() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AccountStore::new(4)))
                .app_data(json_config())
                .service(signup),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({
                "name": "A",
                "useremail": "invalid-email",
                "password": "Abcdef1!"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "name": "A", "password": "Abcdef1!" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_rt::test]
    async fn test_login_unknown_account() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AccountStore::new(4)))
                .app_data(web::Data::new(SessionIssuer::new(
                    "routes-secret",
                    Duration::from_secs(3600),
                )))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "useremail": "nobody@x.com", "password": "Abcdef1!" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Invalid credentials" }));
    }
}
