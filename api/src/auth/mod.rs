pub mod password;
pub mod token;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, AppState};

pub use password::CredentialManager;
pub use token::{Claims, TokenService, TokenValidation};

/// A request carrying a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedSeller {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AppError::Unauthorized)?;

        let email = state
            .tokens
            .validate(token)
            .subject()
            .ok_or(AppError::Unauthorized)?;

        Ok(Self { email })
    }
}
