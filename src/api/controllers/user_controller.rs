use crate::api::controllers::dto::login_dto::{LoginRequest, LoginResponse};
use crate::api::controllers::dto::user_dto::{RegisterUserRequest, UserResponse};
use crate::api::extractors::AuthenticatedUser;
use crate::api::state::AppState;
use crate::data::models::user::{NewUser, UpdateUser};
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::auth::AuthService;
use crate::security::jwt::JwtService;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Register a new user. Emails are unique; registration never grants the
/// author flag.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    let auth = AuthService::new();
    let repo = UserRepo::new(state.db.clone());

    match repo.get_by_email(&payload.email).await {
        Ok(Some(_)) => return (StatusCode::CONFLICT, "Email already registered").into_response(),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Error checking for existing user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response();
        }
    }

    let hashed_password = match auth.hash_password(&payload.password).await {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Error hashing password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process password",
            )
                .into_response();
        }
    };

    let new_user = NewUser::registration(
        &payload.name,
        &payload.surname,
        payload.birth_date,
        &payload.email,
        &hashed_password,
    );

    if let Err(e) = repo.add(new_user).await {
        tracing::error!("Error creating user: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user").into_response();
    }

    match repo.get_by_email(&payload.email).await {
        Ok(Some(user)) => {
            tracing::info!("User registered: {}", user.email);
            (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
        }
        Ok(None) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response(),
        Err(e) => {
            tracing::error!("Error fetching created user: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response()
        }
    }
}

/// Login with email and password, returning a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let auth = AuthService::new();
    let repo = UserRepo::new(state.db.clone());

    let user = match repo.get_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            tracing::error!("Error fetching user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response();
        }
    };

    if !user.active || user.deleted {
        return (StatusCode::FORBIDDEN, "Account is deactivated or deleted").into_response();
    }

    match auth
        .verify_password(&payload.password, &user.password_hash)
        .await
    {
        Ok(true) => {}
        Ok(false) => return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
        Err(e) => {
            tracing::error!("Error verifying password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to verify password",
            )
                .into_response();
        }
    }

    match JwtService::new(&state.config).generate_token(&user) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                message: "Login successful".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error generating token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token").into_response()
        }
    }
}

/// Grant the author flag to an existing user.
pub async fn activate_author(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> impl IntoResponse {
    let repo = UserRepo::new(state.db.clone());

    match repo.get_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            tracing::error!("Error fetching user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user").into_response();
        }
    }

    let update = UpdateUser {
        author: Some(true),
        ..Default::default()
    };

    match repo.update(user_id, update).await {
        Ok(_) => (StatusCode::OK, "Author activated").into_response(),
        Err(e) => {
            tracing::error!("Error activating author: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update user").into_response()
        }
    }
}
