//! Records from a local catalog file.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OrdertrackError, Result};

use super::{ItemRecord, OrderRecord, RecordSource};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    orders: Vec<OrderRecord>,
    items: Vec<ItemRecord>,
}

/// Orders and items read once from a YAML or JSON file.
///
/// ```yaml
/// orders:
///   - id: 2
///     details: { item_id: 1 }
///     state: { matched_rows: 120, result_path: /ipfs/Qm... }
/// items:
///   - id: 1
///     details: { name: Weather, price: { PerRow: { price: "50" } } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogRecordSource {
    path: Option<PathBuf>,
    orders: BTreeMap<u64, OrderRecord>,
    items: BTreeMap<u64, ItemRecord>,
}

impl CatalogRecordSource {
    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OrdertrackError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let mut catalog = Self::parse(&content).map_err(|e| OrdertrackError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        catalog.path = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Parse catalog text (JSON is accepted as a YAML subset).
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content).map_err(|e| OrdertrackError::ConfigParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let file: CatalogFile = if content.trim().is_empty() {
            CatalogFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Ok(Self {
            path: None,
            orders: file.orders.into_iter().map(|o| (o.id, o)).collect(),
            items: file.items.into_iter().map(|i| (i.id, i)).collect(),
        })
    }

    /// File the catalog was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl RecordSource for CatalogRecordSource {
    async fn order(&self, id: u64) -> Result<OrderRecord> {
        self.orders
            .get(&id)
            .cloned()
            .ok_or(OrdertrackError::RecordNotFound { what: "order", id })
    }

    async fn item(&self, id: u64) -> Result<ItemRecord> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(OrdertrackError::RecordNotFound { what: "item", id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
orders:
  - id: 2
    details: { item_id: 1 }
    state: { matched_rows: 12 }
items:
  - id: 1
    details:
      name: Census
      price:
        PerRow:
          price: 3
"#;

    #[tokio::test]
    async fn finds_records_by_id() {
        let catalog = CatalogRecordSource::from_yaml(CATALOG).unwrap();
        assert_eq!(catalog.order_count(), 1);
        assert_eq!(catalog.item_count(), 1);

        let order = catalog.order(2).await.unwrap();
        assert_eq!(order.details.item_id, 1);
        let item = catalog.item(1).await.unwrap();
        assert_eq!(item.details.name, "Census");
        assert_eq!(item.details.price.per_row(), 3);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let catalog = CatalogRecordSource::from_yaml(CATALOG).unwrap();
        let err = catalog.order(5).await.unwrap_err();
        assert_eq!(err.to_string(), "No order record with id 5");
    }

    #[test]
    fn accepts_json() {
        let json = r#"{"items":[{"id":4,"details":{"name":"Logs","price":{"PerRow":{"price":"9"}}}}]}"#;
        let catalog = CatalogRecordSource::from_yaml(json).unwrap();
        assert_eq!(catalog.item_count(), 1);
        assert_eq!(catalog.order_count(), 0);
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = CatalogRecordSource::from_yaml("").unwrap();
        assert_eq!(catalog.order_count(), 0);
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.yml");
        fs::write(&path, CATALOG).unwrap();

        let catalog = CatalogRecordSource::load(&path).unwrap();
        assert_eq!(catalog.path(), Some(path.as_path()));
    }

    #[test]
    fn load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = CatalogRecordSource::load(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, OrdertrackError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.yml");
        fs::write(&path, "orders: {").unwrap();

        let err = CatalogRecordSource::load(&path).unwrap_err();
        assert!(matches!(err, OrdertrackError::ConfigParseError { .. }));
    }
}
