//! Menu vocabulary types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed menu categories
///
/// The catalog is partitioned into a closed set of categories; filters on
/// `GET /menu` accept exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Breakfast,
    Meals,
    Snacks,
    Beverages,
    Desserts,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Breakfast,
        MenuCategory::Meals,
        MenuCategory::Snacks,
        MenuCategory::Beverages,
        MenuCategory::Desserts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Breakfast => "breakfast",
            MenuCategory::Meals => "meals",
            MenuCategory::Snacks => "snacks",
            MenuCategory::Beverages => "beverages",
            MenuCategory::Desserts => "desserts",
        }
    }

    /// Parse a category from its wire form
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for c in MenuCategory::ALL {
            assert_eq!(MenuCategory::parse(c.as_str()), Some(c));
        }
        assert_eq!(MenuCategory::parse("sushi"), None);
    }

    #[test]
    fn test_category_serde_form() {
        let json = serde_json::to_string(&MenuCategory::Beverages).unwrap();
        assert_eq!(json, "\"beverages\"");
    }
}
