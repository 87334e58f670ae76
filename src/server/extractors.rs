//! Custom extractors for the HTTP server.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ErrorResponse;

/// Rejection type for `JsonBody`
#[derive(Debug)]
pub struct JsonBodyRejection {
    message: String,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("DESERIALIZATION_ERROR", self.message);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Extractor for JSON request bodies.
///
/// Behaves like [`axum::Json`], but a missing content type, unreadable body
/// or malformed document is answered with the usual failure envelope rather
/// than axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(|rejection| JsonBodyRejection {
                message: format!("Invalid request body: {}", rejection.body_text()),
            })
    }
}
