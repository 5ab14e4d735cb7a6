// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Handler logic lives in server/routes and uses these traits.
//
// Naming convention: Base* for trait names (e.g., BaseDrinkStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::auth::{AuthError, VerificationKey};
use crate::domains::drinks::{Drink, DrinkChanges, NewDrink};

// =============================================================================
// Drink Store Trait (Infrastructure - record mapping)
// =============================================================================

#[async_trait]
pub trait BaseDrinkStore: Send + Sync {
    /// All drinks, in insertion order
    async fn list(&self) -> Result<Vec<Drink>>;

    /// Single drink by id; None when the id does not exist
    async fn find(&self, id: i64) -> Result<Option<Drink>>;

    /// Insert a new drink and return the stored row
    async fn insert(&self, drink: NewDrink) -> Result<Drink>;

    /// Apply a partial update; None when the id does not exist
    async fn update(&self, id: i64, changes: DrinkChanges) -> Result<Option<Drink>>;

    /// Delete by id
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// Signing Key Source Trait (Infrastructure - token verification)
// =============================================================================

#[async_trait]
pub trait BaseKeySource: Send + Sync {
    /// Current verification keys, fetching the key set on first use
    async fn verification_keys(&self) -> Result<Vec<VerificationKey>, AuthError>;

    /// Force a refetch of the key set (provider key rotation)
    async fn refresh(&self) -> Result<Vec<VerificationKey>, AuthError>;
}
