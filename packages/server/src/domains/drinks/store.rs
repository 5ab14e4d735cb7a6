use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Drink, DrinkChanges, NewDrink};
use crate::kernel::BaseDrinkStore;

/// Drink store backed by Postgres
///
/// Every mutation runs inside a transaction: committed on success, rolled
/// back when the statement fails, so a failed write leaves the table
/// unchanged.
#[derive(Clone)]
pub struct PostgresDrinkStore {
    pool: PgPool,
}

impl PostgresDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseDrinkStore for PostgresDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>> {
        Drink::find_all(&self.pool).await
    }

    async fn find(&self, id: i64) -> Result<Option<Drink>> {
        Drink::find_by_id(id, &self.pool).await
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink> {
        let mut tx = self.pool.begin().await?;
        let created = Drink::insert(&drink, &mut tx).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i64, changes: DrinkChanges) -> Result<Option<Drink>> {
        let mut tx = self.pool.begin().await?;
        let updated = Drink::update(id, &changes, &mut tx).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Drink::delete(id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
