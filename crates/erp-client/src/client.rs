//! Client facade
//!
//! Owns the shared transport and hands out the per-entity clients.

use std::sync::Arc;

use serde_json::Value;

use erp_core::config::ClientConfig;
use erp_core::{ErpResult, Method, Transport};
use erp_queries::{with_query, QueryOptions};

use crate::firmdocs::Firmdocs;
use crate::sales_orders::SalesOrders;
use crate::sys::SysClient;
use crate::transport::HttpTransport;

#[derive(Clone)]
pub struct ErpClient {
    transport: Arc<dyn Transport>,
}

impl ErpClient {
    /// Client over HTTP with the given settings
    pub fn new(config: &ClientConfig) -> ErpResult<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client configured from `ERP_API_*` environment variables (and `.env`)
    pub fn from_env() -> ErpResult<Self> {
        let config = ClientConfig::load()?;
        Self::new(&config)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn sales_orders(&self) -> SalesOrders {
        SalesOrders::new(Arc::clone(&self.transport))
    }

    pub fn firmdocs(&self) -> Firmdocs {
        Firmdocs::new(Arc::clone(&self.transport))
    }

    pub fn sys(&self) -> SysClient {
        SysClient::new(Arc::clone(&self.transport))
    }

    /// Call any endpoint and get the raw JSON back
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: &QueryOptions,
        body: Option<Value>,
    ) -> ErpResult<Value> {
        let path = with_query(path, options);
        self.transport.execute(method, &path, body).await
    }
}
