//! Food Model

use serde::{Deserialize, Serialize};

/// Food catalog entry as returned by `GET /food`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    pub food_name: String,
    /// Price in currency units
    pub price: i64,
    #[serde(default)]
    pub image: Option<String>,
    /// Category reference; some API versions return `category`, others `categoryId`
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Denormalized catalog data captured on a cart line at add-time
///
/// Lets the cart render and price items without refetching the catalog.
/// On a key merge the last-added snapshot wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSnapshot {
    pub food_name: String,
    /// Price in currency units
    pub price: i64,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<&Food> for FoodSnapshot {
    fn from(food: &Food) -> Self {
        Self {
            food_name: food.food_name.clone(),
            price: food.price,
            image: food.image.clone(),
        }
    }
}
