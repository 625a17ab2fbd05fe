//! Food category.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the known categories.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown food category: {0}")]
pub struct CategoryParseError(pub String);

/// Closed set of menu categories.
///
/// Serialized in upper case (`"PIZZA"`) on the wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "menu.food_category", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Pizza,
    Burger,
    Drink,
    Dessert,
    Side,
}

impl Category {
    /// Every category, in admin form order.
    pub const ALL: [Self; 5] = [
        Self::Pizza,
        Self::Burger,
        Self::Drink,
        Self::Dessert,
        Self::Side,
    ];

    /// Wire and query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pizza => "PIZZA",
            Self::Burger => "BURGER",
            Self::Drink => "DRINK",
            Self::Dessert => "DESSERT",
            Self::Side => "SIDE",
        }
    }

    /// Turkish label shown on the menu tabs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pizza => "Pizzalar",
            Self::Burger => "Burgerler",
            Self::Drink => "İçecekler",
            Self::Dessert => "Tatlılar",
            Self::Side => "Yan Lezzetler",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryParseError(wanted.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("pizza".parse::<Category>().unwrap(), Category::Pizza);
        assert_eq!(" DESSERT ".parse::<Category>().unwrap(), Category::Dessert);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "SALAD".parse::<Category>(),
            Err(CategoryParseError("SALAD".to_owned()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Drink.label(), "İçecekler");
        assert_eq!(Category::Side.label(), "Yan Lezzetler");
    }

    #[test]
    fn test_serde_upper_case() {
        assert_eq!(serde_json::to_string(&Category::Burger).unwrap(), "\"BURGER\"");
        let parsed: Category = serde_json::from_str("\"SIDE\"").unwrap();
        assert_eq!(parsed, Category::Side);
    }
}
