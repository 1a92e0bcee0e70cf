use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::data::models::user::User;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use std::convert::Infallible;

/// The verified user behind the request's bearer token. Rejects tokens for
/// unknown, deactivated, or soft-deleted accounts.
pub struct AuthenticatedUser(pub User);

/// Like [`AuthenticatedUser`] but tolerant: no (or invalid) credentials
/// yield `None` instead of a rejection. Used by the public book listing.
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                tracing::error!("Invalid authorization header");
                ApiError::Unauthorized
            })?;

        let tokenizer = JwtService::new(&state.config);

        let claims = tokenizer
            .decode_token::<AccessClaims>(bearer.token())
            .map_err(|e| {
                tracing::error!("Token decoding error: {:?}", e);
                ApiError::Unauthorized
            })?;

        let repo = UserRepo::new(state.db.clone());

        let user = repo
            .get_by_id(claims.sub)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching token user: {}", e);
                ApiError::Unauthorized
            })?
            .ok_or(ApiError::Unauthorized)?;

        if !user.active || user.deleted {
            return Err(ApiError::AccountDisabled);
        }

        Ok(AuthenticatedUser(user))
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state)
            .await
            .ok()
            .map(|authenticated| authenticated.0);

        Ok(OptionalUser(user))
    }
}
