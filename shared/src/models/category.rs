//! Category Model

use serde::{Deserialize, Serialize};

use super::food::Food;

/// Category entry as returned by `GET /category`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub category_name: String,
    #[serde(default)]
    pub food_count: i64,
}

/// Response of `GET /category/:id/foods-tree`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFoods {
    pub category: Category,
    #[serde(default)]
    pub foods: Vec<Food>,
}
