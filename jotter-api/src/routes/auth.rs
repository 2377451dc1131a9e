/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
///
/// # Endpoints
///
/// - `POST /auth/register` - Register new user
/// - `POST /auth/login` - Login and get a session token
///
/// There is no logout endpoint: session tokens are stateless and simply
/// discarded by the client (drop the cookie / forget the token). A token
/// remains technically valid until it expires.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use jotter_shared::{
    auth::{middleware::SESSION_COOKIE, password, token},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// ID of the newly created user
    pub user_id: Uuid,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Signed session token; also set as an HttpOnly `session` cookie
    pub token: String,
}

/// Register a new user
///
/// Creates a new account. The password is hashed with Argon2id before
/// storage; the plaintext is never persisted or logged. Registration does
/// not log the user in — the client follows up with a login request.
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "correct horse battery staple"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    // Uniqueness is the database's unique constraint; a duplicate email
    // surfaces here as a constraint violation and maps to 409.
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id: user.id }),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns a signed session token. The token is
/// also set as an HttpOnly cookie for browser clients.
///
/// Unknown email and wrong password produce the same 401 response, and the
/// unknown-email path still performs a full Argon2 verification against a
/// decoy hash so the two cases take comparable time.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "correct horse battery staple"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "user_id": "uuid",
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email).await?;

    let valid = match &user {
        Some(user) => password::verify_password(&req.password, &user.password_hash)?,
        None => {
            // Burn a verification anyway; always false
            password::verify_password(&req.password, password::DECOY_HASH)?
        }
    };

    let user = match (user, valid) {
        (Some(user), true) => user,
        _ => {
            return Err(ApiError::Unauthenticated(
                "Invalid email or password".to_string(),
            ))
        }
    };

    let ttl = chrono::Duration::hours(state.config.auth.token_ttl_hours);
    let claims = token::Claims::new(user.id, &user.email, ttl);
    let session_token = token::issue(&claims, state.token_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        SESSION_COOKIE,
        session_token,
        ttl.num_seconds(),
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            user_id: user.id,
            token: session_token,
        }),
    ))
}
