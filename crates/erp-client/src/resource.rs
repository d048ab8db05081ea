//! Generic resource client
//!
//! A [`Resource`] names an endpoint and the entity it serves. [`ResourceClient`]
//! provides the CRUD and search operations every endpoint shares; entity
//! modules add their own helpers in inherent impls.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use erp_core::{ErpError, ErpResult, Id, Method, Page, Transport};
use erp_queries::{with_query, Criterion, Literal, QueryOptions, SearchCriteria};

use crate::endpoint::Endpoint;

/// An API collection and its entity type
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/salesOrders`
    const ENDPOINT: &'static str;

    type Entity: DeserializeOwned + Send;
}

pub struct ResourceClient<R: Resource> {
    transport: Arc<dyn Transport>,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        R::ENDPOINT
    }

    fn item_path(&self, id: Id) -> ErpResult<String> {
        Endpoint::new(format!("{}/{{id}}", R::ENDPOINT))
            .param("id", id)
            .render()
    }

    /// List entities
    pub async fn list(&self, options: &QueryOptions) -> ErpResult<Vec<R::Entity>> {
        Ok(self.list_page(options).await?.into_items())
    }

    /// List entities, keeping the total count when the server reports one
    pub async fn list_page(&self, options: &QueryOptions) -> ErpResult<Page<R::Entity>> {
        self.list_path(R::ENDPOINT, options).await
    }

    /// List entities matching `criteria`, combined with any filter already in `options`
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        options: &QueryOptions,
    ) -> ErpResult<Vec<R::Entity>> {
        let options = options.clone().with_criteria(criteria)?;
        self.list(&options).await
    }

    /// Prefix search on one field
    pub async fn search_by<V>(&self, field: &str, value: V, options: &QueryOptions) -> ErpResult<Vec<R::Entity>>
    where
        V: Into<Literal>,
    {
        let criteria = SearchCriteria::new().with(field, Criterion::like(value));
        self.search(&criteria, options).await
    }

    /// Exact match on one field
    pub async fn find_by<V>(&self, field: &str, value: V, options: &QueryOptions) -> ErpResult<Vec<R::Entity>>
    where
        V: Into<Literal>,
    {
        let criteria = SearchCriteria::new().with(field, Criterion::eq(value));
        self.search(&criteria, options).await
    }

    /// Fetch one entity; options carry expansion or field selection
    pub async fn get(&self, id: Id, options: &QueryOptions) -> ErpResult<R::Entity> {
        let path = self.item_path(id)?;
        self.get_path(&path, options).await
    }

    pub async fn create<B: Serialize + Sync>(&self, body: &B) -> ErpResult<R::Entity> {
        tracing::debug!(endpoint = R::ENDPOINT, "Creating entity");
        let value = self
            .transport
            .execute(Method::Post, R::ENDPOINT, Some(serde_json::to_value(body)?))
            .await?;
        decode(value)
    }

    /// Replace an entity
    pub async fn update<B: Serialize + Sync>(&self, id: Id, body: &B) -> ErpResult<R::Entity> {
        self.write(Method::Put, id, body).await
    }

    /// Partially update an entity
    pub async fn patch<B: Serialize + Sync>(&self, id: Id, body: &B) -> ErpResult<R::Entity> {
        self.write(Method::Patch, id, body).await
    }

    pub async fn delete(&self, id: Id) -> ErpResult<()> {
        let path = self.item_path(id)?;
        tracing::debug!(path = %path, "Deleting entity");
        self.transport.execute(Method::Delete, &path, None).await?;
        Ok(())
    }

    async fn write<B: Serialize + Sync>(&self, method: Method, id: Id, body: &B) -> ErpResult<R::Entity> {
        let path = self.item_path(id)?;
        tracing::debug!(method = %method, path = %path, "Updating entity");
        let value = self
            .transport
            .execute(method, &path, Some(serde_json::to_value(body)?))
            .await?;
        decode(value)
    }

    /// GET a list from any path, e.g. a sub-resource collection
    pub async fn list_path<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &QueryOptions,
    ) -> ErpResult<Page<T>> {
        let path = with_query(path, options);
        tracing::debug!(path = %path, "Listing");
        let value = self.transport.execute(Method::Get, &path, None).await?;
        Page::from_value(value)
    }

    /// GET a single object from any path
    pub async fn get_path<T: DeserializeOwned>(&self, path: &str, options: &QueryOptions) -> ErpResult<T> {
        let path = with_query(path, options);
        tracing::debug!(path = %path, "Fetching");
        let value = self.transport.execute(Method::Get, &path, None).await?;
        decode(value)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ErpResult<T> {
    serde_json::from_value(value).map_err(|e| ErpError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expect_call, MockTransport};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Unit {
        id: Id,
        code: String,
    }

    struct Units;

    impl Resource for Units {
        const ENDPOINT: &'static str = "/units";
        type Entity = Unit;
    }

    fn client(mock: MockTransport) -> ResourceClient<Units> {
        ResourceClient::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_list_builds_query() {
        let mut mock = MockTransport::new();
        expect_call(
            &mut mock,
            Method::Get,
            "/units?limit=10&offset=0&sort=CODE",
            json!([{"id": 1, "code": "KG"}]),
        );

        let units = client(mock)
            .list(&QueryOptions::new().limit(10).offset(0).sort_by("CODE"))
            .await
            .unwrap();
        assert_eq!(units, vec![Unit { id: 1, code: "KG".into() }]);
    }

    #[tokio::test]
    async fn test_list_page_keeps_count() {
        let mut mock = MockTransport::new();
        expect_call(
            &mut mock,
            Method::Get,
            "/units?count=true",
            json!({"items": [{"id": 1, "code": "KG"}], "count": 40}),
        );

        let page = client(mock)
            .list_page(&QueryOptions::new().with_count())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total, Some(40));
    }

    #[tokio::test]
    async fn test_search_merges_existing_filter() {
        let mut mock = MockTransport::new();
        expect_call(
            &mut mock,
            Method::Get,
            "/units?limit=5&q=ACTIVE%20eq%20true%20and%20CODE%20eq%20%27KG%27",
            json!([]),
        );

        let criteria = SearchCriteria::new().eq("code", "KG");
        let units = client(mock)
            .search(&criteria, &QueryOptions::new().limit(5).q("ACTIVE eq true"))
            .await
            .unwrap();
        assert!(units.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_and_find_by() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/units?q=CODE%20like%20%27K%2A%27", json!([]));
        expect_call(&mut mock, Method::Get, "/units?q=ID%20eq%203", json!([]));

        let units = client(mock);
        units.search_by("code", "K", &QueryOptions::new()).await.unwrap();
        units.find_by("id", 3, &QueryOptions::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_criteria_never_reaches_transport() {
        let mut mock = MockTransport::new();
        mock.expect_execute().times(0);

        let criteria = SearchCriteria::new().with("code", Criterion::any_of(Vec::<i64>::new()));
        let err = client(mock)
            .search(&criteria, &QueryOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ErpError::Query(_)));
    }

    #[tokio::test]
    async fn test_crud_paths_and_methods() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/units/4", json!({"id": 4, "code": "M"}));
        expect_call(&mut mock, Method::Post, "/units", json!({"id": 5, "code": "L"}));
        expect_call(&mut mock, Method::Put, "/units/5", json!({"id": 5, "code": "LTR"}));
        expect_call(&mut mock, Method::Patch, "/units/5", json!({"id": 5, "code": "L"}));
        expect_call(&mut mock, Method::Delete, "/units/5", Value::Null);

        let units = client(mock);
        assert_eq!(units.get(4, &QueryOptions::new()).await.unwrap().code, "M");
        assert_eq!(units.create(&json!({"code": "L"})).await.unwrap().id, 5);
        assert_eq!(units.update(5, &json!({"code": "LTR"})).await.unwrap().code, "LTR");
        assert_eq!(units.patch(5, &json!({"code": "L"})).await.unwrap().code, "L");
        units.delete(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_with_expand() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/units/4?expand=conversions", json!({"id": 4, "code": "M"}));

        let unit = client(mock)
            .get(4, &QueryOptions::new().expand("conversions"))
            .await
            .unwrap();
        assert_eq!(unit.id, 4);
    }

    #[tokio::test]
    async fn test_create_sends_body() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|_, _, body| body.as_ref() == Some(&json!({"code": "PCS"})))
            .times(1)
            .returning(|_, _, _| Ok(json!({"id": 9, "code": "PCS"})));

        let unit = client(mock).create(&json!({"code": "PCS"})).await.unwrap();
        assert_eq!(unit.id, 9);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let mut mock = MockTransport::new();
        expect_call(&mut mock, Method::Get, "/units/1", json!({"id": "one"}));

        let err = client(mock).get(1, &QueryOptions::new()).await.unwrap_err();
        assert!(matches!(err, ErpError::Decode(_)));
    }
}
