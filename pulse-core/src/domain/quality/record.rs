// pulse-core/src/domain/quality/record.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::{RawRecord, RawValue};
use crate::domain::error::DomainError;

/// Field names understood by the rule engine, as they appear upstream.
pub mod fields {
    pub const ORDER_ID: &str = "order_id";
    pub const PRODUCT_ID: &str = "product_id";
    pub const ORDER_TIME: &str = "order_time";
    pub const SELLING_PRICE: &str = "selling_price_aed";
    pub const QTY: &str = "qty";
    pub const CITY: &str = "city";
    pub const CHANNEL: &str = "channel";
    pub const PAYMENT_STATUS: &str = "payment_status";
    pub const UNIT_COST: &str = "unit_cost_aed";
    pub const BASE_PRICE: &str = "base_price_aed";
    pub const DISCOUNT_PCT: &str = "discount_pct";
    pub const STOCK_ON_HAND: &str = "stock_on_hand";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Sales,
    Inventory,
    Products,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Inventory => "inventory",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exact match only: "Sales" or " sales" are not kinds.
impl FromStr for DatasetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(Self::Sales),
            "inventory" => Ok(Self::Inventory),
            "products" => Ok(Self::Products),
            _ => Err(DomainError::UnsupportedDatasetKind(s.to_string())),
        }
    }
}

/// `None` means the column does not exist in the source schema; `Some(RawValue::Null)` means
/// the column exists but the cell is empty. Rules only run on `Some`.
pub type Field = Option<RawValue>;

/// Natural keys carried by a row, used to label its issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordKey {
    pub order_id: Option<String>,
    pub product_id: Option<String>,
}

impl RecordKey {
    fn from_raw(raw: &RawRecord) -> Self {
        let key = |name: &str| {
            raw.get(name)
                .filter(|v| !v.is_blank())
                .map(|v| v.to_string())
        };
        Self {
            order_id: key(fields::ORDER_ID),
            product_id: key(fields::PRODUCT_ID),
        }
    }

    /// order id, then product id, then `ROW_<index>`.
    pub fn resolve(&self, index: usize) -> String {
        self.order_id
            .clone()
            .or_else(|| self.product_id.clone())
            .unwrap_or_else(|| format!("ROW_{}", index))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesRecord {
    pub key: RecordKey,
    pub order_time: Field,
    pub selling_price_aed: Field,
    pub qty: Field,
    pub city: Field,
    pub channel: Field,
    pub payment_status: Field,
    pub unit_cost_aed: Field,
    pub base_price_aed: Field,
    pub discount_pct: Field,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryRecord {
    pub key: RecordKey,
    pub stock_on_hand: Field,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub key: RecordKey,
    pub unit_cost_aed: Field,
    pub base_price_aed: Field,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Sales(SalesRecord),
    Inventory(InventoryRecord),
    Products(ProductRecord),
}

impl Record {
    /// Projects a loosely-typed row onto the typed record for `kind`.
    /// Columns the kind does not consume are ignored.
    pub fn from_raw(kind: DatasetKind, raw: &RawRecord) -> Self {
        let field = |name: &str| raw.get(name).cloned();
        let key = RecordKey::from_raw(raw);

        match kind {
            DatasetKind::Sales => Self::Sales(SalesRecord {
                key,
                order_time: field(fields::ORDER_TIME),
                selling_price_aed: field(fields::SELLING_PRICE),
                qty: field(fields::QTY),
                city: field(fields::CITY),
                channel: field(fields::CHANNEL),
                payment_status: field(fields::PAYMENT_STATUS),
                unit_cost_aed: field(fields::UNIT_COST),
                base_price_aed: field(fields::BASE_PRICE),
                discount_pct: field(fields::DISCOUNT_PCT),
            }),
            DatasetKind::Inventory => Self::Inventory(InventoryRecord {
                key,
                stock_on_hand: field(fields::STOCK_ON_HAND),
            }),
            DatasetKind::Products => Self::Products(ProductRecord {
                key,
                unit_cost_aed: field(fields::UNIT_COST),
                base_price_aed: field(fields::BASE_PRICE),
            }),
        }
    }

    pub fn key(&self) -> &RecordKey {
        match self {
            Self::Sales(r) => &r.key,
            Self::Inventory(r) => &r.key,
            Self::Products(r) => &r.key,
        }
    }
}
