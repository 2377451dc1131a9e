/// Request authorization gate for Axum
///
/// This middleware runs ahead of every note operation. It pulls the session
/// token from the request, validates it, and injects a [`CurrentUser`] into
/// the request extensions. Handlers extract it with `Extension<CurrentUser>`
/// and must never derive the acting user from anything client-supplied (a
/// `user_id` in a request body carries no authority).
///
/// The token is read from `Authorization: Bearer <token>` first, then from
/// a `session` cookie. Browser clients get the cookie set at login; API
/// clients send the header.
///
/// Every failure — missing credentials, malformed token, expired token,
/// bad signature — produces the same 401 response, so a caller cannot
/// probe which check failed.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use jotter_shared::auth::middleware::{create_session_gate, CurrentUser};
///
/// async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
///     user.email
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(create_session_gate("signing-secret".to_string())));
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token;

/// Name of the session cookie set at login
pub const SESSION_COOKIE: &str = "session";

/// The authenticated caller, resolved by the gate.
///
/// This is the only source of identity downstream of the gate; repository
/// calls take `user.id` and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub id: Uuid,

    /// User email, from the token's profile claims
    pub email: String,
}

/// Error produced by the gate.
///
/// The variants exist for logging; `IntoResponse` collapses them into one
/// indistinguishable 401.
#[derive(Debug)]
pub enum AuthError {
    /// No token in the Authorization header or session cookie
    MissingCredentials,

    /// Token failed validation (malformed, expired, or bad signature)
    InvalidToken(token::TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingCredentials => {
                tracing::debug!("Request rejected: no session token")
            }
            AuthError::InvalidToken(e) => {
                tracing::debug!(error = %e, "Request rejected: session token invalid")
            }
        }

        // One uniform body for every failure kind
        let body = Json(serde_json::json!({
            "error": "unauthenticated",
            "message": "Authentication required",
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Extracts the session token from a request's headers.
///
/// Checks `Authorization: Bearer <token>` first, then the `session` cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix("session="))
        })
}

/// Session gate middleware.
///
/// On success, inserts [`CurrentUser`] into the request extensions and
/// forwards the request. On any failure, short-circuits with 401 and the
/// downstream handler never runs.
pub async fn session_gate(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let raw = extract_session_token(req.headers()).ok_or(AuthError::MissingCredentials)?;

    let claims = token::validate(raw, &secret).map_err(AuthError::InvalidToken)?;

    let user = CurrentUser {
        id: claims.sub,
        email: claims.email,
    };
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Creates a session gate closure capturing the signing secret.
///
/// For use with `axum::middleware::from_fn`.
pub fn create_session_gate(
    secret: String,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    move |req, next| {
        let secret = secret.clone();
        Box::pin(session_gate(secret, req, next))
    }
}
