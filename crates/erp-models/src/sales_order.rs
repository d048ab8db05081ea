//! Sales order model
//!
//! Endpoint: /salesOrders

use chrono::{DateTime, NaiveDate, Utc};
use erp_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sales order header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: Option<Id>,

    /// Document number, e.g. `ZS/2024/0001`
    #[serde(default)]
    pub number: String,

    #[serde(default)]
    pub customer_code: String,

    pub customer_name: Option<String>,

    /// Workflow status code, see [`SalesOrderStatus`]
    #[serde(default)]
    pub status: i32,

    pub order_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,

    pub currency: Option<String>,

    #[serde(default)]
    pub total_net: f64,

    #[serde(default)]
    pub total_gross: f64,

    /// Present only when requested with `expand=items`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SalesOrderItem>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sales order line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItem {
    pub id: Option<Id>,

    pub order_id: Option<Id>,

    #[serde(default)]
    pub position: i32,

    #[serde(default)]
    pub product_code: String,

    pub description: Option<String>,

    #[serde(default)]
    pub quantity: f64,

    pub unit: Option<String>,

    #[serde(default)]
    pub unit_price: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Known sales order status codes
pub struct SalesOrderStatus;

impl SalesOrderStatus {
    pub const DRAFT: i32 = 0;
    pub const CONFIRMED: i32 = 1;
    pub const IN_PROGRESS: i32 = 2;
    pub const COMPLETED: i32 = 3;
    pub const CANCELLED: i32 = 9;

    pub fn name(code: i32) -> Option<&'static str> {
        match code {
            Self::DRAFT => Some("draft"),
            Self::CONFIRMED => Some("confirmed"),
            Self::IN_PROGRESS => Some("in_progress"),
            Self::COMPLETED => Some("completed"),
            Self::CANCELLED => Some("cancelled"),
            _ => None,
        }
    }
}

impl SalesOrder {
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            SalesOrderStatus::COMPLETED | SalesOrderStatus::CANCELLED
        )
    }
}

impl Identifiable for SalesOrder {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Identifiable for SalesOrderItem {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

/// Filter field names for sales orders
pub mod fields {
    pub const NUMBER: &str = "NUMBER";
    pub const CUSTOMER_CODE: &str = "CUSTOMER_CODE";
    pub const STATUS: &str = "STATUS";
    pub const ORDER_DATE: &str = "ORDER_DATE";
}
