use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

/// One recipe entry: ingredient name, display color, and relative quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Drink record as stored in the drinks table
///
/// The recipe is kept serialized in a single JSONB column; the short and
/// long representations below are derived on the way out, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Json<Vec<Ingredient>>,
}

/// Fields required to create a drink
#[derive(Debug, Clone, Deserialize)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// Recipe entry as shown in the short representation (no ingredient names)
#[derive(Debug, Clone, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: i64,
}

/// Drink projection for the plain listing
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Drink projection with full recipe detail
#[derive(Debug, Clone, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// Short representation: recipe entries stripped to color and parts
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .0
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// Long representation: full recipe detail
    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.0.clone(),
        }
    }
}

// =============================================================================
// Drink Queries
// =============================================================================

impl Drink {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Drink>> {
        sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Drink>> {
        sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(drink: &NewDrink, tx: &mut Transaction<'_, Postgres>) -> Result<Drink> {
        sqlx::query_as::<_, Drink>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(&drink.title)
        .bind(Json(&drink.recipe))
        .fetch_one(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// Partial update; COALESCE leaves columns untouched when the caller
    /// did not supply a replacement.
    pub async fn update(
        id: i64,
        changes: &DrinkChanges,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Drink>> {
        sqlx::query_as::<_, Drink>(
            r#"
            UPDATE drinks
            SET title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.recipe.as_ref().map(Json))
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: i64, tx: &mut Transaction<'_, Postgres>) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
