//! System endpoints: instance information and dictionaries
//!
//! Endpoint: /sys

use chrono::{DateTime, Utc};
use erp_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instance information returned by `/sys/info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SysInfo {
    #[serde(default)]
    pub version: String,

    pub database: Option<String>,

    pub company: Option<String>,

    pub server_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a system dictionary (units, currencies, document types, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub id: Option<Id>,

    #[serde(default)]
    pub code: String,

    pub name: Option<String>,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl Identifiable for DictionaryEntry {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
