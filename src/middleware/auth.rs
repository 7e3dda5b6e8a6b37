use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the authenticated subject id. Token verification is owned
/// by the upstream auth gateway; this service only consumes the forwarded
/// identity, and rejects requests that arrive without one.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user, injected into handlers that need an identity.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Authentication("no user is signed in".to_string()))?;

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| AppError::Authentication("malformed user identity".to_string()))?;

        Ok(CurrentUser(user_id))
    }
}
