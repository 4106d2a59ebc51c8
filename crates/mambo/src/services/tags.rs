//! Tags used to filter and personalize site content.

use serde_json::Value;

use super::expand;
use crate::client::{MamboClient, Method};
use crate::data::{TagRequestData, DeleteRequestData};
use crate::error::MamboError;

const TAGS_URI: &str = "/v1/tags";
const TAGS_ID_URI: &str = "/v1/tags/{id}";
const TAGS_CLONE_URI: &str = "/v1/tags/{id}/clone";
const TAGS_SITE_URI: &str = "/v1/{site}/tags";

#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    client: &'a MamboClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &TagRequestData) -> Result<Value, MamboError> {
        let path = expand(TAGS_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &TagRequestData) -> Result<Value, MamboError> {
        let path = expand(TAGS_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn clone_tag(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(TAGS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(TAGS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, TAGS_URI, data)
    }

    pub fn get(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(TAGS_ID_URI, &[("id", id)]);
        self.client.request(Method::Get, &path, None)
    }

    pub fn list(&self, site: &str) -> Result<Value, MamboError> {
        let path = expand(TAGS_SITE_URI, &[("site", site)]);
        self.client.request(Method::Get, &path, None)
    }
}
