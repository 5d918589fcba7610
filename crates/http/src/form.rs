//! Form body extractor whose rejections go through [`AppError`].

use axum::extract::{rejection::FormRejection, FromRequest, Request};

use crate::error::AppError;

/// `application/x-www-form-urlencoded` body.
///
/// A wrong content type or an undecodable body becomes a 400 error page
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct Form<T>(pub T);

impl<T, S> FromRequest<S> for Form<T>
where
    axum::Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Form(value) = axum::Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(status = %rejection.status(), "form body rejected");
                AppError::bad_request(rejection.body_text())
            })?;
        Ok(Self(value))
    }
}
