//! Identity Extractor
//!
//! Pulls the gateway-asserted identity triple out of request headers.
//! Handlers take a [`CurrentUser`] argument to opt in; requests
//! without a complete identity are rejected before the handler runs.

use axum::extract::FromRequestParts;
use http::request::Parts;

use super::{CurrentUser, Role};
use crate::utils::AppError;

/// Gateway-injected identity headers
pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_USER_ROLE: &str = "x-user-role";
pub const HEADER_COMPANY_ID: &str = "x-company-id";

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let user_id = header(HEADER_USER_ID).ok_or(AppError::Unauthorized)?;
        let role = header(HEADER_USER_ROLE)
            .as_deref()
            .and_then(Role::parse)
            .ok_or(AppError::Unauthorized)?;
        let company_id = header(HEADER_COMPANY_ID).filter(|v| !v.is_empty());

        let user = CurrentUser {
            user_id,
            role,
            company_id,
        };

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
