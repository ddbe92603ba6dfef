use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::section::duplicate_ids;
use super::Section;
use crate::{Error, Result};

/// A catalog entry (dish, product, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Content of the header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// A grouped catalog as read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Absent header means no header row
    #[serde(default)]
    pub header: Option<Hero>,
    #[serde(default)]
    pub sections: Vec<Section<CatalogItem>>,
}

impl Catalog {
    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&content)?;
        debug!(
            "Loaded catalog {:?}: {} sections, {} items",
            path,
            catalog.sections.len(),
            catalog.item_count()
        );
        Ok(catalog)
    }

    /// Parse and validate catalog TOML
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject input the engine cannot key unambiguously
    pub fn validate(&self) -> Result<()> {
        let dupes = duplicate_ids(&self.sections);
        if !dupes.is_empty() {
            return Err(Error::Catalog(format!(
                "duplicate section ids: {}",
                dupes.join(", ")
            )));
        }
        if let Some(section) = self.sections.iter().find(|s| s.id.trim().is_empty()) {
            return Err(Error::Catalog(format!(
                "section '{}' has an empty id",
                section.title
            )));
        }
        Ok(())
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.data.len()).sum()
    }

    /// Built-in restaurant menu: Popular (6), Burgers (8), Desserts (7)
    pub fn demo() -> Self {
        fn dishes(prefix: &str, label: &str, count: usize, base_price: usize) -> Vec<CatalogItem> {
            (0..count)
                .map(|i| CatalogItem {
                    id: format!("{}-{}", prefix, i),
                    name: format!("{} {}", label, i + 1),
                    price: format!("${}", base_price + i),
                    description: None,
                })
                .collect()
        }

        Self {
            header: Some(Hero {
                title: "Burger Barn".to_string(),
                subtitle: Some("Open until 22:00".to_string()),
            }),
            sections: vec![
                Section::new("popular", "Popular", dishes("popular", "Popular", 6, 9)),
                Section::new("burgers", "Burgers", dishes("burger", "Burger", 8, 10)),
                Section::new("desserts", "Desserts", dishes("dessert", "Dessert", 7, 6)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_shape() {
        let catalog = Catalog::demo();
        assert!(catalog.has_header());
        let counts: Vec<usize> = catalog.sections.iter().map(|s| s.data.len()).collect();
        assert_eq!(counts, vec![6, 8, 7]);
        assert_eq!(catalog.sections[1].data[0].price, "$10");
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::parse(
            r#"
            [header]
            title = "Cafe"

            [[sections]]
            id = "drinks"
            title = "Drinks"

            [[sections.data]]
            id = "tea"
            name = "Tea"
            price = "$3"

            [[sections]]
            id = "cakes"

            [[sections.items]]
            id = "carrot"
            name = "Carrot cake"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.header.as_ref().map(|h| h.title.as_str()), Some("Cafe"));
        assert_eq!(catalog.sections.len(), 2);
        assert_eq!(catalog.sections[0].data[0].name, "Tea");
        assert_eq!(catalog.sections[1].title, "");
        assert_eq!(catalog.sections[1].data[0].price, "");
    }

    #[test]
    fn test_parse_without_header() {
        let catalog = Catalog::parse(
            r#"
            [[sections]]
            id = "a"
            title = "A"
            "#,
        )
        .unwrap();
        assert!(!catalog.has_header());
        assert!(catalog.sections[0].data.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::parse(
            r#"
            [[sections]]
            id = "a"
            [[sections]]
            id = "a"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Catalog(ref msg) if msg.contains("a")));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Catalog::parse("[[sections]\nid = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("stickytabs-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("menu.toml");
        std::fs::write(
            &path,
            r#"
            [header]
            title = "Noodle Bar"

            [[sections]]
            id = "soups"
            title = "Soups"

            [[sections.data]]
            id = "ramen"
            name = "Ramen"
            price = "$12"
            "#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.has_header());
        assert_eq!(catalog.sections[0].id, "soups");
        assert_eq!(catalog.item_count(), 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/stickytabs-menu.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
