/// Identity token issuance and verification
///
/// Tokens are signed JWTs (HS256) carrying the user id as the subject claim.
/// A token expires exactly two days after issuance; there are no scopes or
/// roles; a valid token grants full access to its user's own projects.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC-SHA256)
/// - **Expiration**: 2 days, non-configurable
/// - **Validation**: signature, expiration, and issuer checks
///
/// Callers must treat every [`TokenError`] variant as "unauthenticated". The
/// variants exist for logging; they are never surfaced to clients.
///
/// # Example
///
/// ```
/// use draftforge_shared::auth::token::{issue, verify};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let token = issue(42, secret)?;
/// assert_eq!(verify(&token, secret)?, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token issuer claim value
const ISSUER: &str = "draftforge";

/// Returns the token lifetime (2 days).
pub fn token_ttl() -> Duration {
    Duration::days(2)
}

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token failed validation (bad signature, malformed, wrong issuer, ...)
    #[error("Failed to validate token: {0}")]
    ValidationError(String),
}

/// JWT claims structure
///
/// Standard claims only; the subject is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Issuer - always "draftforge"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the standard 2-day expiration.
    pub fn new(user_id: i64) -> Self {
        Self::with_expiration(user_id, token_ttl())
    }

    /// Creates claims with a custom expiration offset.
    ///
    /// Negative durations produce an already-expired token; tests use this
    /// to exercise expiry rejection.
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the claims have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed token for a user.
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails.
pub fn issue(user_id: i64, secret: &str) -> Result<String, TokenError> {
    issue_claims(&Claims::new(user_id), secret)
}

/// Signs pre-built claims. Split out so tests can issue expired tokens.
pub fn issue_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts the user id.
///
/// Verifies the signature, the expiration, and the issuer. Any failure
/// (malformed token, wrong secret, expiry, wrong issuer) yields an error;
/// callers map all of them to a single "unauthenticated" outcome.
///
/// # Errors
///
/// Returns `TokenError::Expired` for expired tokens and
/// `TokenError::ValidationError` for every other failure.
pub fn verify(token: &str, secret: &str) -> Result<i64, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_ttl_is_two_days() {
        assert_eq!(token_ttl(), Duration::days(2));
    }

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(7);
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.iss, "draftforge");
        assert!(!claims.is_expired());
        // Expiry lands two days out, give or take clock skew within the test.
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 2 * 24 * 3600);
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue(42, SECRET).expect("Should create token");
        let user_id = verify(&token, SECRET).expect("Should validate token");
        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = issue(1, SECRET).expect("Should create token");
        assert!(verify(&token, "some-other-secret").is_err());
    }

    #[test]
    fn test_verify_tampered_token() {
        let token = issue(1, SECRET).expect("Should create token");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(verify(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_verify_garbage() {
        assert!(verify("not-a-token", SECRET).is_err());
        assert!(verify("", SECRET).is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        // Expired an hour ago; well past the default validation leeway.
        let claims = Claims::with_expiration(42, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = issue_claims(&claims, SECRET).expect("Should create token");
        let result = verify(&token, SECRET);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), TokenError::Expired));
    }

    #[test]
    fn test_verify_wrong_issuer() {
        let mut claims = Claims::new(42);
        claims.iss = "someone-else".to_string();
        let token = issue_claims(&claims, SECRET).expect("Should create token");
        assert!(verify(&token, SECRET).is_err());
    }
}
