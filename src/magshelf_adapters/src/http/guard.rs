use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use magshelf_core::AuthValidator;

use super::routes::error::ApiError;

/// Rejects the request unless `validator` accepts its credentials, and hands
/// the resolved claims to the handler as an `Extension`.
pub async fn require_authentication<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    V: AuthValidator<RequestParts = Parts>,
    ApiError: From<V::Error>,
{
    let (parts, body) = request.into_parts();
    let claims = validator.validate(&parts).await?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
