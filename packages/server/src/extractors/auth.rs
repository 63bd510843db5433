use axum::{extract::FromRequestParts, http::request::Parts};
use community::entity::user::VERIFIED_ROLES;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
pub struct AuthUser {
    pub user_id: String,
    pub role: String,
}

impl AuthUser {
    /// Only `user` and `admin` accounts may take part in the community.
    pub fn require_verified(&self) -> Result<(), AppError> {
        if VERIFIED_ROLES.contains(&self.role.as_str()) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// A verified user acting on the community while the feature is enabled.
///
/// Every community handler takes this instead of [`AuthUser`].
pub struct Member(pub AuthUser);

impl Member {
    pub fn id(&self) -> &str {
        &self.0.user_id
    }
}

impl FromRequestParts<AppState> for Member {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require_verified()?;
        if !state.config.community.enabled {
            return Err(AppError::FeatureDisabled);
        }
        Ok(Member(user))
    }
}
