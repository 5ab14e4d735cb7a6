use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::AuthError;
use crate::kernel::BaseKeySource;

/// Single public signing key as published by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    pub alg: String,
    #[serde(rename = "use")]
    pub use_field: String,
    pub n: String,
    pub e: String,
}

/// Key set document served at the provider's well-known URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// Decoded verification key, ready for signature checks
pub struct VerificationKey {
    pub kid: String,
    pub alg: Algorithm,
    pub key: DecodingKey,
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // DecodingKey holds opaque key material and is not Debug; omit it.
        f.debug_struct("VerificationKey")
            .field("kid", &self.kid)
            .field("alg", &self.alg)
            .finish_non_exhaustive()
    }
}

/// Convert a fetched key set into usable verification keys
///
/// Non-RSA entries are skipped; the provider publishes encryption keys in
/// the same document.
pub fn jwks_to_keys(jwks: &Jwks) -> Result<Vec<VerificationKey>, AuthError> {
    jwks.keys
        .iter()
        .filter(|jwk| jwk.kty == "RSA")
        .map(|jwk| {
            let alg = jwk
                .alg
                .parse::<Algorithm>()
                .map_err(|_| AuthError::KeySetUnavailable(format!(
                    "unsupported signing algorithm {}",
                    jwk.alg
                )))?;
            let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
                .map_err(|err| AuthError::KeySetUnavailable(err.to_string()))?;
            Ok(VerificationKey {
                kid: jwk.kid.clone(),
                alg,
                key,
            })
        })
        .collect()
}

struct CachedJwks {
    jwks: Jwks,
    expires_at: Instant,
}

/// Key source backed by the identity provider's JWKS endpoint
///
/// The key set is fetched on first use and cached process-wide. A key id
/// miss forces one refetch so rotated keys are picked up without a restart;
/// a failed fetch fails verification rather than serving stale keys.
pub struct JwksKeySource {
    url: String,
    client: reqwest::Client,
    cache: RwLock<Option<CachedJwks>>,
    ttl: Duration,
}

impl JwksKeySource {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            cache: RwLock::new(None),
            ttl: Duration::from_secs(3600),
        }
    }

    async fn fetch(&self) -> Result<Jwks, AuthError> {
        debug!(url = %self.url, "fetching signing key set");
        let jwks: Jwks = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| AuthError::KeySetUnavailable(err.to_string()))?
            .json()
            .await
            .map_err(|err| AuthError::KeySetUnavailable(err.to_string()))?;

        let mut cache = self.cache.write().await;
        *cache = Some(CachedJwks {
            jwks: jwks.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(jwks)
    }

    async fn cached(&self) -> Option<Jwks> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.jwks.clone())
    }
}

#[async_trait]
impl BaseKeySource for JwksKeySource {
    async fn verification_keys(&self) -> Result<Vec<VerificationKey>, AuthError> {
        let jwks = match self.cached().await {
            Some(jwks) => jwks,
            None => self.fetch().await?,
        };
        jwks_to_keys(&jwks)
    }

    async fn refresh(&self) -> Result<Vec<VerificationKey>, AuthError> {
        let jwks = self.fetch().await?;
        jwks_to_keys(&jwks)
    }
}
