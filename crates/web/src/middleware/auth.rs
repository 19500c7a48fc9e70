use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::WebError;

/// Identity of the calling user, as asserted by the upstream token verifier.
///
/// Token validation happens before a request reaches this service; the
/// verified user id arrives in the `X-User-Id` header. A missing or
/// malformed header rejects the request.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

const USER_ID_HEADER: &str = "x-user-id";

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or(WebError::Unauthorized)?;

        Ok(AuthenticatedUser { user_id })
    }
}
