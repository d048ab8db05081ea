use async_trait::async_trait;
use erp_core::{ErpResult, Method, Transport};
use mockall::mock;
use serde_json::Value;

mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ErpResult<Value>;
    }
}

/// Expect exactly one call with `method` and `path`, answered with `response`
pub fn expect_call(mock: &mut MockTransport, method: Method, path: &'static str, response: Value) {
    mock.expect_execute()
        .withf(move |m, p, _| *m == method && p == path)
        .times(1)
        .returning(move |_, _, _| Ok(response.clone()));
}
