use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, SignupRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo_types::{NewUser, User, UserStatus},
        services::{validate_login, validate_signup},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(v)| v).map_err(|e| {
        warn!(error = %e, "rejected request body");
        ApiError::validation("Invalid request body")
    })
}

/// POST /api/auth/signup
#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let req = validate_signup(body(payload)?)?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(ApiError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(&req.password)?;

    // A concurrent signup can still win the race; the unique index turns
    // that into UniqueViolation, which maps to 409 as well.
    let user = state
        .users
        .create(NewUser {
            full_name: req.full_name,
            email: req.email,
            password_hash,
            role: req.role,
            status: UserStatus::Active,
        })
        .await?;

    info!(user_id = user.id, email = %user.email, role = %user.role, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = validate_login(body(payload)?)?;

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    if user.status != UserStatus::Active {
        warn!(user_id = user.id, status = %user.status, "login for inactive account");
        return Err(ApiError::Unauthorized("Account is not active".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))
}
