//! JSON body extractor with the standard error body on rejection.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for `axum::Json` on the request side.
///
/// A malformed body or wrong content type is rejected with an
/// [`AppError::JsonExtractorRejection`], so clients always receive the
/// `{code, error, message}` shape instead of axum's plain-text rejection.
///
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn login(JsonBody(payload): JsonBody<LoginRequest>) -> impl IntoResponse { ... }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
