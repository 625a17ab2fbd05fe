//! Spicy and vegetarian tags derived from ingredient names.
//!
//! Tags are never stored; they are recomputed from the ingredient list every
//! time an item is rendered, so editing ingredients updates them immediately.
//!
//! Matching is a lowercase substring test, so the meat keyword `et` also
//! matches ingredients that merely contain those letters ("Ketçap" counts as
//! meat). Known false positive, kept as is.

use serde::Serialize;

/// Keywords that mark an ingredient as hot.
pub const HEAT_KEYWORDS: &[&str] = &["acı", "jalapeno", "pul biber"];

/// Keywords that mark an ingredient as meat or fish.
pub const MEAT_KEYWORDS: &[&str] = &[
    "et",
    "sucuk",
    "sosis",
    "salam",
    "pastırma",
    "kavurma",
    "döner",
    "tavuk",
    "köfte",
    "kıyma",
    "ton balığı",
    "kuzu",
];

/// Display tags for a menu card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryTags {
    pub spicy: bool,
    pub vegetarian: bool,
}

impl DietaryTags {
    /// Classify an ingredient list.
    ///
    /// An empty list is vegetarian and not spicy.
    #[must_use]
    pub fn from_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Self {
        let lowered: Vec<String> = ingredients
            .iter()
            .map(|i| i.as_ref().to_lowercase())
            .collect();
        let mentions = |keywords: &[&str]| {
            lowered
                .iter()
                .any(|ingredient| keywords.iter().any(|k| ingredient.contains(k)))
        };

        Self {
            spicy: mentions(HEAT_KEYWORDS),
            vegetarian: !mentions(MEAT_KEYWORDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sucuk_is_not_vegetarian() {
        let tags = DietaryTags::from_ingredients(&["Domates Sosu", "Mozarella", "Sucuk"]);
        assert!(!tags.vegetarian);
    }

    #[test]
    fn test_spinach_is_vegetarian_and_mild() {
        let tags = DietaryTags::from_ingredients(&["Zeytinyağı", "Mozarella", "Ispanak"]);
        assert!(tags.vegetarian);
        assert!(!tags.spicy);
    }

    #[test]
    fn test_hot_peppers_are_spicy() {
        let tags = DietaryTags::from_ingredients(&["Domates Sosu", "Acı Biber", "Jalapeno"]);
        assert!(tags.spicy);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(DietaryTags::from_ingredients(&["Pul Biber"]).spicy);
        assert!(!DietaryTags::from_ingredients(&["TAVUK"]).vegetarian);
    }

    #[test]
    fn test_et_substring_counts_as_meat() {
        assert!(!DietaryTags::from_ingredients(&["Ketçap"]).vegetarian);
    }

    #[test]
    fn test_empty_ingredients() {
        let tags = DietaryTags::from_ingredients::<&str>(&[]);
        assert_eq!(
            tags,
            DietaryTags {
                spicy: false,
                vegetarian: true
            }
        );
    }
}
