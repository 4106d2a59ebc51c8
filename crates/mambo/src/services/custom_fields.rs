//! Custom field definitions attached to users.

use serde_json::Value;

use super::expand;
use crate::client::{MamboClient, Method};
use crate::data::{CustomFieldRequestData, DeleteRequestData};
use crate::error::MamboError;

const CUSTOM_FIELDS_URI: &str = "/v1/custom_fields";
const CUSTOM_FIELDS_ID_URI: &str = "/v1/custom_fields/{id}";
const CUSTOM_FIELDS_CLONE_URI: &str = "/v1/custom_fields/{id}/clone";
const CUSTOM_FIELDS_SITE_URI: &str = "/v1/{site}/custom_fields";

#[derive(Debug, Clone, Copy)]
pub struct CustomFields<'a> {
    client: &'a MamboClient,
}

impl<'a> CustomFields<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &CustomFieldRequestData) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &CustomFieldRequestData) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn clone_custom_field(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, CUSTOM_FIELDS_URI, data)
    }

    pub fn get(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_ID_URI, &[("id", id)]);
        self.client.request(Method::Get, &path, None)
    }

    pub fn list(&self, site: &str) -> Result<Value, MamboError> {
        let path = expand(CUSTOM_FIELDS_SITE_URI, &[("site", site)]);
        self.client.request(Method::Get, &path, None)
    }
}
