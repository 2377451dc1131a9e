/// Session token issuance and validation
///
/// Sessions are stateless: a signed HS256 JWT carries the user's identity
/// and an expiry, so no server-side session table exists. The trade-off is
/// that a token cannot be revoked before it expires; logout is client-side
/// token discard.
///
/// Internally the failure kinds (malformed, expired, bad signature) are
/// kept apart for logging, but callers at the HTTP boundary collapse them
/// all into a single 401.
///
/// # Example
///
/// ```
/// use jotter_shared::auth::token::{issue, validate, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, "a@example.com", Duration::hours(24));
///
/// let secret = "a-signing-secret-of-at-least-32-bytes!";
/// let token = issue(&claims, secret)?;
///
/// let validated = validate(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped into every token
const ISSUER: &str = "jotter";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign a token
    #[error("Failed to issue token: {0}")]
    IssueError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature did not verify
    #[error("Token signature mismatch")]
    BadSignature,

    /// Token was malformed or failed another validation check
    #[error("Malformed token: {0}")]
    Malformed(String),
}

/// Claims carried by a session token
///
/// Standard claims (`sub`, `iss`, `iat`, `nbf`, `exp`) plus the user's
/// email as minimal profile data, so handlers can log who is acting
/// without a user-table lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's ID
    pub sub: Uuid,

    /// User email (profile data, never used for authorization)
    pub email: String,

    /// Issuer, always "jotter"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the given time-to-live.
    pub fn new(user_id: Uuid, email: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks whether the expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs a session token from claims.
///
/// The secret is process-wide configuration, loaded once at startup; it
/// should be at least 32 bytes of random data.
///
/// # Errors
///
/// Returns `TokenError::IssueError` if encoding fails.
pub fn issue(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::IssueError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims.
///
/// Verifies the signature, expiry, not-before, and issuer.
///
/// # Errors
///
/// Returns a `TokenError` variant naming which check failed. Do not expose
/// the variant to clients; map every failure to the same 401.
pub fn validate(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::Malformed(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "a@example.com", Duration::hours(24));

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.iss, "jotter");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "a@example.com", Duration::hours(1));
        let token = issue(&claims, SECRET).expect("Should issue token");

        let validated = validate(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.email, "a@example.com");
        assert_eq!(validated.iss, "jotter");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(Uuid::new_v4(), "a@example.com", Duration::hours(1));
        let token = issue(&claims, SECRET).expect("Should issue token");

        let result = validate(&token, "another-secret-also-32-bytes-long!!");
        assert!(matches!(result, Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::new(Uuid::new_v4(), "a@example.com", Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = issue(&claims, SECRET).expect("Should issue token");
        let result = validate(&token, SECRET);

        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate("not.a.jwt", SECRET);
        assert!(result.is_err());

        let result = validate("", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_tampered_payload() {
        let claims = Claims::new(Uuid::new_v4(), "a@example.com", Duration::hours(1));
        let token = issue(&claims, SECRET).expect("Should issue token");

        // Swap the payload segment for a different token's payload
        let other = Claims::new(Uuid::new_v4(), "b@example.com", Duration::hours(1));
        let other_token = issue(&other, SECRET).expect("Should issue token");

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other_token.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(validate(&spliced, SECRET).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_issuer() {
        let mut claims = Claims::new(Uuid::new_v4(), "a@example.com", Duration::hours(1));
        claims.iss = "somebody-else".to_string();

        let token = issue(&claims, SECRET).expect("Should issue token");
        assert!(validate(&token, SECRET).is_err());
    }
}
