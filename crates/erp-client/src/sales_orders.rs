//! Sales orders client

use erp_core::{ErpResult, Id};
use erp_models::sales_order::fields;
use erp_models::{SalesOrder, SalesOrderItem};
use erp_queries::QueryOptions;

use crate::endpoint::Endpoint;
use crate::resource::{Resource, ResourceClient};

pub struct SalesOrderResource;

impl Resource for SalesOrderResource {
    const ENDPOINT: &'static str = "/salesOrders";
    type Entity = SalesOrder;
}

pub type SalesOrders = ResourceClient<SalesOrderResource>;

impl ResourceClient<SalesOrderResource> {
    /// Orders whose number starts with `number`
    pub async fn search_by_number(&self, number: &str, options: &QueryOptions) -> ErpResult<Vec<SalesOrder>> {
        self.search_by(fields::NUMBER, number, options).await
    }

    pub async fn search_by_customer_code(
        &self,
        customer_code: &str,
        options: &QueryOptions,
    ) -> ErpResult<Vec<SalesOrder>> {
        self.search_by(fields::CUSTOMER_CODE, customer_code, options).await
    }

    /// Orders in exactly this status, see [`erp_models::SalesOrderStatus`]
    pub async fn find_by_status(&self, status: i32, options: &QueryOptions) -> ErpResult<Vec<SalesOrder>> {
        self.find_by(fields::STATUS, status, options).await
    }

    /// Lines of one order
    pub async fn items(&self, order_id: Id, options: &QueryOptions) -> ErpResult<Vec<SalesOrderItem>> {
        let path = Endpoint::new("/salesOrders/{id}/items")
            .param("id", order_id)
            .render()?;
        Ok(self.list_path(&path, options).await?.into_items())
    }
}
