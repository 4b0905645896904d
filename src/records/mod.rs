//! Order and item records.
//!
//! An order points at the item (dataset) it queries; once the computation
//! has run, its state carries the number of matched rows and where the
//! encrypted result was stored. Items carry their price. The amount due for
//! an order is the item's per-row price times the matched rows.
//!
//! Records come from a [`RecordSource`]: a local catalog file
//! ([`CatalogRecordSource`]) or a REST endpoint ([`HttpRecordSource`]).

pub mod catalog;
pub mod http;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::RecordsConfig;
use crate::error::{OrdertrackError, Result};

pub use catalog::CatalogRecordSource;
pub use http::HttpRecordSource;

/// Smallest currency unit; wide enough for on-chain balances.
pub type Balance = u128;

/// A computation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: u64,
    pub details: OrderDetails,
    #[serde(default)]
    pub state: OrderState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Item the order queries.
    pub item_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default)]
    pub matched_rows: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
}

/// A listed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u64,
    pub details: ItemDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub name: String,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_link: Option<String>,
}

/// Pricing model of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Price {
    PerRow {
        #[serde(with = "balance")]
        price: Balance,
    },
}

impl Price {
    pub fn per_row(&self) -> Balance {
        match self {
            Price::PerRow { price } => *price,
        }
    }
}

/// Balances travel as decimal strings since they may exceed 2^53; plain
/// integers are accepted too.
mod balance {
    use super::Balance;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Balance, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Balance, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Balance::from(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid balance '{}'", s))),
        }
    }
}

/// Amount owed for `matched_rows` rows at `price_per_row` each.
pub fn amount_due(price_per_row: Balance, matched_rows: u64) -> Result<Balance> {
    price_per_row
        .checked_mul(Balance::from(matched_rows))
        .ok_or(OrdertrackError::AmountOverflow {
            price_per_row,
            rows: matched_rows,
        })
}

/// Where records are looked up.
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    /// Fetch order `id`.
    async fn order(&self, id: u64) -> Result<OrderRecord>;

    /// Fetch item `id`.
    async fn item(&self, id: u64) -> Result<ItemRecord>;
}

/// Record source selected by configuration.
#[derive(Debug)]
pub enum Records {
    Catalog(CatalogRecordSource),
    Http(HttpRecordSource),
}

impl Records {
    /// Build the configured source; `None` when no source is configured.
    pub fn from_config(config: &RecordsConfig, project_root: &Path) -> Result<Option<Self>> {
        if let Some(catalog) = &config.catalog {
            let path = if catalog.is_absolute() {
                catalog.clone()
            } else {
                project_root.join(catalog)
            };
            return Ok(Some(Records::Catalog(CatalogRecordSource::load(&path)?)));
        }
        if let Some(endpoint) = &config.endpoint {
            let source = HttpRecordSource::new(endpoint, config.timeout())?;
            return Ok(Some(Records::Http(source)));
        }
        Ok(None)
    }
}

impl RecordSource for Records {
    async fn order(&self, id: u64) -> Result<OrderRecord> {
        match self {
            Records::Catalog(source) => source.order(id).await,
            Records::Http(source) => source.order(id).await,
        }
    }

    async fn item(&self, id: u64) -> Result<ItemRecord> {
        match self {
            Records::Catalog(source) => source.item(id).await,
            Records::Http(source) => source.item(id).await,
        }
    }
}

/// What a finished order costs and where its result lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub order_id: u64,
    pub item_id: u64,
    pub item_name: String,
    pub matched_rows: u64,
    pub price_per_row: Balance,
    pub amount: Balance,
    pub result_path: Option<String>,
}

/// Fetch order `order_id` and its item, and price the order.
pub async fn fetch_payment<R: RecordSource>(source: &R, order_id: u64) -> Result<Payment> {
    let order = source.order(order_id).await?;
    let item = source.item(order.details.item_id).await?;
    let price_per_row = item.details.price.per_row();
    let amount = amount_due(price_per_row, order.state.matched_rows)?;

    Ok(Payment {
        order_id,
        item_id: item.id,
        item_name: item.details.name,
        matched_rows: order.state.matched_rows,
        price_per_row,
        amount,
        result_path: order.state.result_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_due_multiplies() {
        assert_eq!(amount_due(250, 4).unwrap(), 1000);
        assert_eq!(amount_due(250, 0).unwrap(), 0);
    }

    #[test]
    fn amount_due_handles_wide_prices() {
        let price = u64::MAX as Balance;
        assert_eq!(amount_due(price, 2).unwrap(), price * 2);
    }

    #[test]
    fn amount_due_reports_overflow() {
        let err = amount_due(Balance::MAX, 2).unwrap_err();
        assert!(matches!(
            err,
            OrdertrackError::AmountOverflow { rows: 2, .. }
        ));
    }

    #[test]
    fn price_accepts_string_and_number() {
        let from_str: Price = serde_json::from_str(r#"{"PerRow":{"price":"340282366920938463463374607431768211455"}}"#).unwrap();
        assert_eq!(from_str.per_row(), Balance::MAX);

        let from_num: Price = serde_json::from_str(r#"{"PerRow":{"price":15}}"#).unwrap();
        assert_eq!(from_num.per_row(), 15);
    }

    #[test]
    fn price_rejects_garbage() {
        let result: std::result::Result<Price, _> =
            serde_json::from_str(r#"{"PerRow":{"price":"ten"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn price_serializes_as_string() {
        let json = serde_json::to_string(&Price::PerRow { price: 7 }).unwrap();
        assert_eq!(json, r#"{"PerRow":{"price":"7"}}"#);
    }

    #[test]
    fn order_state_defaults() {
        let order: OrderRecord =
            serde_json::from_str(r#"{"id":3,"details":{"item_id":1}}"#).unwrap();
        assert_eq!(order.state.matched_rows, 0);
        assert!(order.state.result_path.is_none());
    }

    #[tokio::test]
    async fn fetch_payment_prices_order() {
        let catalog = CatalogRecordSource::from_yaml(
            r#"
orders:
  - id: 2
    details: { item_id: 1 }
    state: { matched_rows: 120, result_path: /ipfs/result }
items:
  - id: 1
    details: { name: Weather, price: { PerRow: { price: "50" } } }
"#,
        )
        .unwrap();

        let payment = fetch_payment(&catalog, 2).await.unwrap();
        assert_eq!(payment.amount, 6000);
        assert_eq!(payment.item_name, "Weather");
        assert_eq!(payment.result_path.as_deref(), Some("/ipfs/result"));
    }

    #[tokio::test]
    async fn fetch_payment_needs_item() {
        let catalog = CatalogRecordSource::from_yaml(
            "orders:\n  - id: 2\n    details: { item_id: 9 }\n",
        )
        .unwrap();

        let err = fetch_payment(&catalog, 2).await.unwrap_err();
        assert!(matches!(
            err,
            OrdertrackError::RecordNotFound { what: "item", id: 9 }
        ));
    }
}
