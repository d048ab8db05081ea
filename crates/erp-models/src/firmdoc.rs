//! Firm document model (invoices, receipts, warehouse documents)
//!
//! Endpoint: /firmdocs

use chrono::{DateTime, NaiveDate, Utc};
use erp_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firmdoc {
    pub id: Option<Id>,

    /// Document code, unique per document type and year
    #[serde(default)]
    pub code: String,

    /// Secondary code assigned by the issuing department
    pub auxil_code: Option<String>,

    /// Document type symbol, e.g. `FV` or `WZ`
    #[serde(default)]
    pub doc_type: String,

    pub name: Option<String>,

    pub contractor_code: Option<String>,

    pub issue_date: Option<NaiveDate>,

    #[serde(default)]
    pub total: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<FirmdocLine>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmdocLine {
    pub id: Option<Id>,

    #[serde(default)]
    pub position: i32,

    pub item_code: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub amount: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identifiable for Firmdoc {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Identifiable for FirmdocLine {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

/// Filter field names for firm documents
pub mod fields {
    pub const CODE: &str = "CODE";
    pub const AUXIL_CODE: &str = "AUXIL_CODE";
    pub const DOC_TYPE: &str = "DOC_TYPE";
    pub const ISSUE_DATE: &str = "ISSUE_DATE";
}
