//! Firm documents client

use erp_core::{ErpResult, Id};
use erp_models::firmdoc::fields;
use erp_models::{Firmdoc, FirmdocLine};
use erp_queries::QueryOptions;

use crate::endpoint::Endpoint;
use crate::resource::{Resource, ResourceClient};

pub struct FirmdocResource;

impl Resource for FirmdocResource {
    const ENDPOINT: &'static str = "/firmdocs";
    type Entity = Firmdoc;
}

pub type Firmdocs = ResourceClient<FirmdocResource>;

impl ResourceClient<FirmdocResource> {
    pub async fn search_by_code(&self, code: &str, options: &QueryOptions) -> ErpResult<Vec<Firmdoc>> {
        self.search_by(fields::CODE, code, options).await
    }

    pub async fn search_by_auxil_code(&self, auxil_code: &str, options: &QueryOptions) -> ErpResult<Vec<Firmdoc>> {
        self.search_by(fields::AUXIL_CODE, auxil_code, options).await
    }

    pub async fn find_by_doc_type(&self, doc_type: &str, options: &QueryOptions) -> ErpResult<Vec<Firmdoc>> {
        self.find_by(fields::DOC_TYPE, doc_type, options).await
    }

    pub async fn lines(&self, id: Id, options: &QueryOptions) -> ErpResult<Vec<FirmdocLine>> {
        let path = Endpoint::new("/firmdocs/{id}/lines").param("id", id).render()?;
        Ok(self.list_path(&path, options).await?.into_items())
    }
}
