use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Verified token claims
///
/// Request-scoped: reconstructed from the bearer token on every request and
/// never persisted. Must not be trusted until signature, issuer, audience,
/// and expiry have all been validated by the verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    /// Permission strings granted by the identity provider. Absent when the
    /// token was issued without role-based access enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Check that this claim set grants `permission`
    ///
    /// A token with no permissions claim at all fails differently from one
    /// that carries the claim but lacks the required entry.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::PermissionsNotFound)?;

        if permissions.iter().any(|granted| granted == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(permission.to_string()))
        }
    }
}
