/// Authentication primitives
///
/// This module provides the two building blocks of DraftForge authentication:
///
/// - [`token`]: signed, time-limited identity tokens (HS256, 2-day expiry)
/// - [`password`]: Argon2id password hashing and verification
///
/// Both operate on secrets passed in by the caller; neither reads ambient
/// configuration. The API server owns the configuration object and injects
/// the signing secret per call, which keeps both modules testable with
/// substitute secrets.

pub mod password;
pub mod token;
