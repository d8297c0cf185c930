use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::SessionIssuer;
use crate::error::AppError;

/// Bearer-token gate for the `/api` scope.
///
/// `/api/auth/*` always passes. With `enforce` off, every request passes and a
/// valid token only attaches its claims; with `enforce` on, a missing or bad
/// token is rejected with 401.
pub struct AuthMiddleware {
    issuer: web::Data<SessionIssuer>,
    enforce: bool,
}

impl AuthMiddleware {
    pub fn new(issuer: web::Data<SessionIssuer>, enforce: bool) -> Self {
        Self { issuer, enforce }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            issuer: self.issuer.clone(),
            enforce: self.enforce,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    issuer: web::Data<SessionIssuer>,
    enforce: bool,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.path().starts_with("/api/auth/") {
            return Box::pin(self.service.call(req));
        }

        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        let verified = bearer.as_deref().map(|token| self.issuer.verify(token));

        match (verified, self.enforce) {
            (Some(Ok(claims)), _) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            (Some(Err(err)), true) => {
                let app_err = AppError::from(err);
                Box::pin(async move { Err(app_err.into()) })
            }
            (None, true) => {
                let app_err = AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
            (Some(Err(err)), false) => {
                log::debug!("ignoring {} on {} (auth not enforced)", err, req.path());
                Box::pin(self.service.call(req))
            }
            (None, false) => Box::pin(self.service.call(req)),
        }
    }
}
