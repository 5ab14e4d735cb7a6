use thiserror::Error;

/// Authentication and authorization failures
///
/// Every variant surfaces as a 401, but the kinds stay distinct so a
/// structural failure (bad header, bad token) can be told apart from a pure
/// permission failure. Display text is what clients see in the error body.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,

    #[error("authorization header must be a bearer token")]
    MalformedHeader,

    #[error("unable to parse authentication token")]
    MalformedToken,

    #[error("unable to find a signing key for kid {0}")]
    UnknownKey(String),

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("invalid claims: {0}")]
    InvalidClaims(String),

    #[error("signing key set is unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("permissions not included in token")]
    PermissionsNotFound,

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}
