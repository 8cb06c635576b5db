use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the authenticated user's id, set by the upstream auth layer
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| CurrentUser(id.to_string()))
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_ID_HEADER)))
    }
}
