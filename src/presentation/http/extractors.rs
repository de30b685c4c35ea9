// src/presentation/http/extractors.rs
use crate::application::{
    dto::{AuditContext, AuthenticatedUser, ClientInfo},
    error::ApplicationError,
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// The caller admitted by the admin guard.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })
    }
}

/// Client address and agent as reported by the request headers.
#[derive(Debug, Clone)]
pub struct Client(pub ClientInfo);

pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let ip_address = header("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header("x-real-ip"))
        .map(ToString::to_string);
    let user_agent = header("user-agent").map(ToString::to_string);

    ClientInfo::new(ip_address, user_agent)
}

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_info(&parts.headers)))
    }
}

/// Actor plus client info, everything a command needs to audit itself.
#[derive(Debug, Clone)]
pub struct Audited(pub AuditContext);

impl<S> FromRequestParts<S> for Audited
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(actor) = Authenticated::from_request_parts(parts, state).await?;
        let Client(client) = Client::from_request_parts(parts, state).await?;
        Ok(Self(AuditContext::new(actor, client)))
    }
}

/// `Json` whose rejection renders as the standard `{ "error": ... }` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
