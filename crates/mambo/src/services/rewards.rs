//! Rewards: achievements, levels, missions and gifts.

use serde_json::Value;

use super::{ListOptions, expand};
use crate::client::{MamboClient, Method};
use crate::data::{CustomFieldValueRequestData, DeleteRequestData, RewardRequestData};
use crate::error::MamboError;
use crate::url_builder::ApiUrlBuilder;

const REWARDS_URI: &str = "/v1/rewards";
const REWARDS_ID_URI: &str = "/v1/rewards/{id}";
const REWARDS_IMAGE_URI: &str = "/v1/rewards/{id}/image";
const REWARDS_CLONE_URI: &str = "/v1/rewards/{id}/clone";
const REWARDS_CUSTOM_URI: &str = "/v1/rewards/{id}/custom_fields";
const REWARDS_SITE_URI: &str = "/v1/{site}/rewards";
const ACHIEVEMENTS_SITE_URI: &str = "/v1/{site}/rewards/achievements";
const LEVELS_SITE_URI: &str = "/v1/{site}/rewards/levels";
const MISSIONS_SITE_URI: &str = "/v1/{site}/rewards/missions";
const GIFTS_SITE_URI: &str = "/v1/{site}/rewards/gifts";

#[derive(Debug, Clone, Copy)]
pub struct Rewards<'a> {
    client: &'a MamboClient,
}

impl<'a> Rewards<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    fn with_points(
        template: &str,
        var: (&str, &str),
        with_internal_points: Option<bool>,
    ) -> String {
        ApiUrlBuilder::new(expand(template, &[var]))
            .with_internal_points(with_internal_points)
            .build()
    }

    pub fn create(
        &self,
        site: &str,
        data: &RewardRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_SITE_URI, ("site", site), with_internal_points);
        self.client.request_with(Method::Post, &url, data)
    }

    pub fn update(
        &self,
        id: &str,
        data: &RewardRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_ID_URI, ("id", id), with_internal_points);
        self.client.request_with(Method::Put, &url, data)
    }

    pub fn upload_image(
        &self,
        id: &str,
        image: &[u8],
        filename: &str,
        content_type: &str,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_IMAGE_URI, ("id", id), with_internal_points);
        self.client.upload(&url, image, filename, content_type)
    }

    pub fn clone_reward(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(REWARDS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(REWARDS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, REWARDS_URI, data)
    }

    pub fn get(&self, id: &str, with_internal_points: Option<bool>) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_ID_URI, ("id", id), with_internal_points);
        self.client.request(Method::Get, &url, None)
    }

    pub fn list(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(REWARDS_SITE_URI, site, options)
    }

    pub fn list_achievements(
        &self,
        site: &str,
        options: &ListOptions,
    ) -> Result<Value, MamboError> {
        self.list_at(ACHIEVEMENTS_SITE_URI, site, options)
    }

    pub fn list_levels(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(LEVELS_SITE_URI, site, options)
    }

    pub fn list_missions(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(MISSIONS_SITE_URI, site, options)
    }

    pub fn list_gifts(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(GIFTS_SITE_URI, site, options)
    }

    fn list_at(
        &self,
        template: &str,
        site: &str,
        options: &ListOptions,
    ) -> Result<Value, MamboError> {
        let url = options
            .apply(ApiUrlBuilder::new(expand(template, &[("site", site)])))
            .build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn add_custom_fields(
        &self,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_CUSTOM_URI, ("id", id), with_internal_points);
        self.client.request_with(Method::Post, &url, data)
    }

    pub fn update_custom_fields(
        &self,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_CUSTOM_URI, ("id", id), with_internal_points);
        self.client.request_with(Method::Put, &url, data)
    }

    pub fn delete_custom_fields(
        &self,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = Self::with_points(REWARDS_CUSTOM_URI, ("id", id), with_internal_points);
        self.client.request_with(Method::Delete, &url, data)
    }
}
