//! Cart line types
//!
//! One `CartLine` per distinct `(food_id, selected_size)` pair. The pair is
//! the line's identity key: adding the same key again merges quantities
//! instead of duplicating the row.

use serde::{Deserialize, Serialize};

use super::food::FoodSnapshot;

/// One row of the persisted cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub food_id: String,
    /// Size variant; `None` for items without variants
    #[serde(default)]
    pub selected_size: Option<String>,
    pub quantity: i64,
    /// Catalog data frozen at add-time
    pub food: FoodSnapshot,
}

impl CartLine {
    pub fn new(
        food_id: impl Into<String>,
        selected_size: Option<String>,
        quantity: i64,
        food: FoodSnapshot,
    ) -> Self {
        Self {
            food_id: food_id.into(),
            selected_size,
            quantity,
            food,
        }
    }

    /// Identity key within the cart
    pub fn key(&self) -> (&str, Option<&str>) {
        (self.food_id.as_str(), self.selected_size.as_deref())
    }

    /// Whether this line matches the given identity key
    pub fn matches(&self, food_id: &str, selected_size: Option<&str>) -> bool {
        self.food_id == food_id && self.selected_size.as_deref() == selected_size
    }

    /// Line subtotal: snapshot price times quantity, in currency units
    pub fn line_total(&self) -> i64 {
        self.food.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: i64) -> FoodSnapshot {
        FoodSnapshot {
            food_name: "Khuushuur".to_string(),
            price,
            image: None,
        }
    }

    #[test]
    fn test_key_distinguishes_sizes() {
        let small = CartLine::new("f1", Some("S".into()), 1, snapshot(4500));
        let large = CartLine::new("f1", Some("L".into()), 1, snapshot(6500));
        let plain = CartLine::new("f1", None, 1, snapshot(5000));

        assert_ne!(small.key(), large.key());
        assert_ne!(small.key(), plain.key());
        assert!(small.matches("f1", Some("S")));
        assert!(!small.matches("f1", None));
        assert!(plain.matches("f1", None));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new("f1", None, 3, snapshot(4500));
        assert_eq!(line.line_total(), 13500);
    }

    #[test]
    fn test_serde_round_trip() {
        let line = CartLine::new("f1", Some("L".into()), 2, snapshot(6500));
        let json = serde_json::to_string(&line).unwrap();
        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
