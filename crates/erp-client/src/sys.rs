//! System endpoints: instance info, health check and dictionaries

use std::sync::Arc;

use erp_core::{ErpResult, Method, Transport};
use erp_models::{DictionaryEntry, SysInfo};
use erp_queries::{with_query, Criterion, QueryOptions, SearchCriteria};

use crate::endpoint::Endpoint;
use crate::resource::decode;

#[derive(Clone)]
pub struct SysClient {
    transport: Arc<dyn Transport>,
}

impl SysClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn info(&self) -> ErpResult<SysInfo> {
        let value = self.transport.execute(Method::Get, "/sys/info", None).await?;
        decode(value)
    }

    /// Whether the API answers at all; a failed request is reported as `false`
    pub async fn ping(&self) -> bool {
        match self.transport.execute(Method::Get, "/sys/ping", None).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Ping failed");
                false
            }
        }
    }

    /// Entries of a named dictionary
    pub async fn dictionary(&self, name: &str, options: &QueryOptions) -> ErpResult<Vec<DictionaryEntry>> {
        let path = Endpoint::new("/sys/dictionaries/{name}").param("name", name).render()?;
        let path = with_query(&path, options);
        tracing::debug!(path = %path, "Fetching dictionary");
        let value = self.transport.execute(Method::Get, &path, None).await?;
        Ok(erp_core::Page::from_value(value)?.into_items())
    }

    pub async fn search_dictionary_by_code(
        &self,
        name: &str,
        code: &str,
        options: &QueryOptions,
    ) -> ErpResult<Vec<DictionaryEntry>> {
        let criteria = SearchCriteria::new().with("CODE", Criterion::like(code));
        let options = options.clone().with_criteria(&criteria)?;
        self.dictionary(name, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expect_call, MockTransport};
    use erp_core::ErpError;
    use serde_json::json;

    #[tokio::test]
    async fn test_info() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/sys/info", json!({"version": "2024.1", "company": "ACME"}));

        let info = SysClient::new(Arc::new(mock)).info().await.unwrap();
        assert_eq!(info.version, "2024.1");
        assert_eq!(info.company.as_deref(), Some("ACME"));
    }

    #[tokio::test]
    async fn test_ping() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/sys/ping", json!("pong"));
        assert!(SysClient::new(Arc::new(mock)).ping().await);

        let mut failing = MockTransport::new();
        failing
            .expect_execute()
            .returning(|_, _, _| Err(ErpError::Transport("connection refused".into())));
        assert!(!SysClient::new(Arc::new(failing)).ping().await);
    }

    #[tokio::test]
    async fn test_dictionary_search() {
        let mut mock = MockTransport::new();
        expect_call(
            &mut mock,
            Method::Get,
            "/sys/dictionaries/units?limit=20&q=CODE%20like%20%27K%2A%27",
            json!([{"code": "KG", "name": "Kilogram"}]),
        );

        let entries = SysClient::new(Arc::new(mock))
            .search_dictionary_by_code("units", "K", &QueryOptions::new().limit(20))
            .await
            .unwrap();
        assert_eq!(entries[0].code, "KG");
        assert!(entries[0].active);
    }
}
