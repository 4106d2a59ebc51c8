//! Free-form JSON documents stored per site.

use serde_json::Value;

use super::expand;
use crate::client::{MamboClient, Method};
use crate::data::{DataStoreRequestData, DeleteRequestData};
use crate::error::MamboError;

const DATA_STORES_URI: &str = "/v1/data_stores";
const DATA_STORES_ID_URI: &str = "/v1/data_stores/{id}";
const DATA_STORES_CLONE_URI: &str = "/v1/data_stores/{id}/clone";
const DATA_STORES_SITE_URI: &str = "/v1/{site}/data_stores";
const DATA_STORES_TYPE_SITE_URI: &str = "/v1/{site}/data_stores/{type}";

#[derive(Debug, Clone, Copy)]
pub struct DataStores<'a> {
    client: &'a MamboClient,
}

impl<'a> DataStores<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &DataStoreRequestData) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &DataStoreRequestData) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn clone_data_store(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, DATA_STORES_URI, data)
    }

    pub fn get(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_ID_URI, &[("id", id)]);
        self.client.request(Method::Get, &path, None)
    }

    pub fn list(&self, site: &str) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_SITE_URI, &[("site", site)]);
        self.client.request(Method::Get, &path, None)
    }

    /// Data stores of one `type` on a site.
    pub fn list_by_type(&self, site: &str, store_type: &str) -> Result<Value, MamboError> {
        let path = expand(DATA_STORES_TYPE_SITE_URI, &[("site", site), ("type", store_type)]);
        self.client.request(Method::Get, &path, None)
    }
}
