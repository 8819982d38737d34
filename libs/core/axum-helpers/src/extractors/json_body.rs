//! JSON extractor whose rejections use the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] as an extractor.
///
/// Every rejection (missing content type, unparseable JSON, wrong shape)
/// becomes `400 {"error": "..."}`, where axum would answer some of them
/// with 415 or 422 and a plain-text body.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateTaskRequest>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(JsonBody(data))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::warn!("JSON extraction error: {}", rejection.body_text());
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected application/json body".to_string(),
        JsonRejection::JsonSyntaxError(_) => "malformed JSON body".to_string(),
        other => format!("invalid JSON body: {}", other.body_text()),
    };
    AppError::BadRequest(message)
}
