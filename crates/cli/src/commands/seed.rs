//! Menu seeding.
//!
//! # Usage
//!
//! ```bash
//! # Add the items in the file to the menu
//! iolo-cli seed foods seed/menu.yaml
//!
//! # Replace the whole menu with the file
//! iolo-cli seed foods seed/menu.yaml --clear
//! ```
//!
//! The file holds a `foods` list whose entries use the same fields as the
//! admin API payload. Every entry is validated before anything is written.

use std::path::Path;

use iolo_admin::db::{FoodRepository, RepositoryError};
use iolo_core::menu::{FoodDraft, FoodInput, FoodValidationError};
use serde::Deserialize;
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An entry failed validation; `index` is zero-based.
    #[error("Entry {index} ({name}): {source}")]
    Invalid {
        index: usize,
        name: String,
        source: FoodValidationError,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    foods: Vec<FoodInput>,
}

/// Parse and validate a seed file's contents.
fn parse_foods(contents: &str) -> Result<Vec<FoodDraft>, SeedError> {
    let file: SeedFile = serde_yaml::from_str(contents)?;

    file.foods
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let name = input.name.clone().unwrap_or_else(|| "unnamed".to_owned());
            input
                .validate()
                .map_err(|source| SeedError::Invalid {
                    index,
                    name,
                    source,
                })
        })
        .collect()
}

/// Insert the menu items from `path`, optionally clearing the menu first.
///
/// The clear and the inserts share one transaction, so a failed run leaves
/// the menu as it was.
///
/// # Errors
///
/// Returns `SeedError` if the file is unreadable or invalid, or a write fails.
pub async fn foods(path: &Path, clear: bool) -> Result<(), SeedError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let drafts = parse_foods(&contents)?;
    tracing::info!("Loaded {} menu items from {}", drafts.len(), path.display());

    let pool = connect().await?;
    let repo = FoodRepository::new(&pool);

    let outcome = repo.seed(&drafts, clear).await?;
    if clear {
        tracing::info!("Removed {} existing menu items", outcome.removed);
    }
    tracing::info!("Seeded {} menu items", outcome.inserted);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use iolo_core::Category;

    use super::*;

    #[test]
    fn test_parse_foods() {
        let drafts = parse_foods(
            r"
foods:
  - name: Künefe
    price: 99.99
    category: DESSERT
    ingredients: [Kadayıf, Peynir]
  - name: Ayran
    price: '29.99'
    category: DRINK
    isAvailable: false
",
        )
        .unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Künefe");
        assert_eq!(drafts[0].category, Category::Dessert);
        assert_eq!(drafts[0].price.display(), "99.99 ₺");
        assert_eq!(drafts[1].price.display(), "29.99 ₺");
        assert!(drafts[0].is_available);
        assert_eq!(drafts[1].category, Category::Drink);
        assert!(!drafts[1].is_available);
    }

    #[test]
    fn test_invalid_entry_is_reported_with_position() {
        let err = parse_foods(
            r"
foods:
  - name: Su
    price: 14.99
    category: DRINK
  - name: Sütlaç
    price: -1
    category: DESSERT
",
        )
        .unwrap_err();

        assert!(matches!(err, SeedError::Invalid { index: 1, ref name, .. } if name == "Sütlaç"));
    }

    #[test]
    fn test_empty_file_has_no_foods() {
        assert!(parse_foods("{}").unwrap().is_empty());
    }

    #[test]
    fn test_bundled_menu_is_valid() {
        let drafts = parse_foods(include_str!("../../../../seed/menu.yaml")).unwrap();
        assert_eq!(drafts.len(), 48);
        assert!(drafts.iter().any(|d| d.category == Category::Side));
    }
}
