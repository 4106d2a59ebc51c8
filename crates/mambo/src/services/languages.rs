//! Languages available for translations on a site.

use serde_json::Value;

use super::expand;
use crate::client::{MamboClient, Method};
use crate::data::{LanguageRequestData, DeleteRequestData};
use crate::error::MamboError;

const LANGUAGES_URI: &str = "/v1/languages";
const LANGUAGES_ID_URI: &str = "/v1/languages/{id}";
const LANGUAGES_CLONE_URI: &str = "/v1/languages/{id}/clone";
const LANGUAGES_SITE_URI: &str = "/v1/{site}/languages";

#[derive(Debug, Clone, Copy)]
pub struct Languages<'a> {
    client: &'a MamboClient,
}

impl<'a> Languages<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &LanguageRequestData) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &LanguageRequestData) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn clone_language(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, LANGUAGES_URI, data)
    }

    pub fn get(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_ID_URI, &[("id", id)]);
        self.client.request(Method::Get, &path, None)
    }

    pub fn list(&self, site: &str) -> Result<Value, MamboError> {
        let path = expand(LANGUAGES_SITE_URI, &[("site", site)]);
        self.client.request(Method::Get, &path, None)
    }
}
