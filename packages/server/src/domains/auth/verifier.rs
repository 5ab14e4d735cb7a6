use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Validation};

use super::claims::Claims;
use super::errors::AuthError;
use super::jwks::VerificationKey;
use crate::kernel::BaseKeySource;

/// Verifies bearer credentials against the identity provider's key set
///
/// Checks run in order: header shape, token structure, key resolution, then
/// signature/issuer/audience/expiry. Each failure keeps its own kind so a
/// structural problem is distinguishable from an expired or mis-issued token.
pub struct TokenVerifier {
    issuer: String,
    audience: String,
    leeway: u64,
    key_source: Arc<dyn BaseKeySource>,
}

impl TokenVerifier {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        key_source: Arc<dyn BaseKeySource>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            leeway: 30,
            key_source,
        }
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Extract the raw token from an Authorization header value
    ///
    /// The value must be exactly two space-separated parts with a
    /// case-insensitive `bearer` scheme.
    pub fn token_from_header(header: Option<&str>) -> Result<&str, AuthError> {
        let value = header.ok_or(AuthError::MissingHeader)?;
        let parts: Vec<&str> = value.split_whitespace().collect();
        match parts.as_slice() {
            &[scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
            _ => Err(AuthError::MalformedHeader),
        }
    }

    /// Verify a bearer token and return its claims
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        // The provider stamps every signing key with a kid; a token without
        // one cannot have come from it.
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;

        let key = self.resolve_key(&kid).await?;

        let mut validation = Validation::new(key.alg);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.leeway = self.leeway;

        decode::<Claims>(token, &key.key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => {
                    AuthError::InvalidClaims("token is expired".to_string())
                }
                ErrorKind::ImmatureSignature => {
                    AuthError::InvalidClaims("token is not yet valid".to_string())
                }
                ErrorKind::InvalidIssuer => {
                    AuthError::InvalidClaims("issuer does not match".to_string())
                }
                ErrorKind::InvalidAudience => {
                    AuthError::InvalidClaims("audience does not match".to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    AuthError::InvalidClaims(format!("missing required claim {claim}"))
                }
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidSignature,
            })
    }

    /// Resolve a key id, refreshing the key set once on a miss
    async fn resolve_key(&self, kid: &str) -> Result<VerificationKey, AuthError> {
        let keys = self.key_source.verification_keys().await?;
        if let Some(key) = keys.into_iter().find(|key| key.kid == kid) {
            return Ok(key);
        }

        // The provider may have rotated keys since the last fetch.
        let keys = self.key_source.refresh().await?;
        keys.into_iter()
            .find(|key| key.kid == kid)
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))
    }
}
