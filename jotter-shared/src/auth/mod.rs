/// Authentication utilities
///
/// This module provides the authentication primitives for Jotter:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Signed session token issuance and validation
/// - [`middleware`]: The request authorization gate for Axum
///
/// # Security Notes
///
/// - Passwords are stored only as Argon2id PHC strings (64 MB memory,
///   3 iterations), never in plaintext.
/// - Session tokens are stateless HS256 JWTs; there is no server-side
///   session table and therefore no pre-expiry revocation.
/// - Login failures are symmetric: a nonexistent email costs the same
///   Argon2 verification as a wrong password and produces the same error.

pub mod middleware;
pub mod password;
pub mod token;
