// src/presentation/http/middleware/require_admin.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;

/// Single authorization gate for the back office.
///
/// Resolves the bearer token, requires the admin role and stores the
/// resulting [`crate::application::dto::AuthenticatedUser`] in the request
/// extensions for the [`crate::presentation::http::extractors::Authenticated`]
/// extractor. Missing, invalid and non-admin tokens all answer 401.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
        .into_response();
    };

    let Some(header) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return HttpError::from_error(ApplicationError::unauthorized(
            "missing Authorization header",
        ))
        .into_response();
    };

    match state.services.authenticate_admin(header.token()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            debug!(error = %err, path = %req.uri().path(), "admin authorization rejected");
            HttpError::from_error(err).into_response()
        }
    }
}
