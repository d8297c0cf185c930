use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The `useremail` of the account whose bearer token `AuthMiddleware` accepted.
///
/// Fails with `AppError::Unauthorized` when no claims were attached. Handlers on
/// routes that may be reached without a token take `Option<AuthenticatedAccount>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount(pub String);

impl FromRequest for AuthenticatedAccount {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedAccount(claims.useremail.clone()))),
            None => {
                let err = AppError::Unauthorized("No authenticated account on request".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
