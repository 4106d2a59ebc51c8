//! Leaderboards ranking users by points.

use serde_json::Value;

use super::{ListOptions, expand};
use crate::client::{MamboClient, Method};
use crate::data::{DeleteRequestData, LeaderboardRequestData};
use crate::error::MamboError;
use crate::url_builder::{ApiUrlBuilder, Period};

const LEADERBOARDS_SITE_URI: &str = "/v1/{site}/leaderboards";
const LEADERBOARDS_SYSTEM_URI: &str = "/v1/{site}/leaderboards/system";
const LEADERBOARDS_URI: &str = "/v1/leaderboards";
const LEADERBOARDS_ID_URI: &str = "/v1/leaderboards/{id}";
const LEADERBOARDS_CLONE_URI: &str = "/v1/leaderboards/{id}/clone";
const LEADERBOARDS_REGENERATE_URI: &str = "/v1/leaderboards/{id}/regenerate";
const BEHAVIOUR_LEADERBOARDS_URI: &str = "/v1/leaderboards/behaviour/{id}";

/// Ranking filters shared by leaderboard reads.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardOptions {
    pub period: Option<Period>,
    pub tag: Option<String>,
    /// Users endpoints only: center the page on the user.
    pub contextual: Option<bool>,
    pub with_internal_points: Option<bool>,
    pub page: Option<u32>,
    pub count: Option<u32>,
    /// Site leaderboards only: embed user details.
    pub with_users: Option<bool>,
}

impl LeaderboardOptions {
    pub(crate) fn apply(&self, builder: ApiUrlBuilder) -> ApiUrlBuilder {
        builder
            .tag(self.tag.as_deref())
            .period(self.period)
            .page(self.page)
            .count(self.count)
            .contextual(self.contextual)
            .with_users(self.with_users)
            .with_internal_points(self.with_internal_points)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Leaderboards<'a> {
    client: &'a MamboClient,
}

impl<'a> Leaderboards<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &LeaderboardRequestData) -> Result<Value, MamboError> {
        let path = expand(LEADERBOARDS_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &LeaderboardRequestData) -> Result<Value, MamboError> {
        let path = expand(LEADERBOARDS_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn clone_leaderboard(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LEADERBOARDS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    /// Recompute the leaderboard's rankings.
    pub fn regenerate(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LEADERBOARDS_REGENERATE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(LEADERBOARDS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, LEADERBOARDS_URI, data)
    }

    pub fn list(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(LEADERBOARDS_SITE_URI, &[("site", site)]))
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .tag_uuid(options.tag_uuid.as_deref())
            .build();
        self.client.request(Method::Get, &url, None)
    }

    /// Ranking by all points on the site.
    pub fn system_leaderboard(
        &self,
        site: &str,
        options: &LeaderboardOptions,
    ) -> Result<Value, MamboError> {
        let base = expand(LEADERBOARDS_SYSTEM_URI, &[("site", site)]);
        self.ranking(base, options)
    }

    pub fn leaderboard(&self, id: &str, options: &LeaderboardOptions) -> Result<Value, MamboError> {
        let base = expand(LEADERBOARDS_ID_URI, &[("id", id)]);
        self.ranking(base, options)
    }

    /// Ranking by how often users performed a behaviour. Ignores `with_users`.
    pub fn behaviour_leaderboard(
        &self,
        behaviour_id: &str,
        options: &LeaderboardOptions,
    ) -> Result<Value, MamboError> {
        let base = expand(BEHAVIOUR_LEADERBOARDS_URI, &[("id", behaviour_id)]);
        let options = LeaderboardOptions {
            with_users: None,
            contextual: None,
            ..options.clone()
        };
        self.ranking(base, &options)
    }

    fn ranking(&self, base: String, options: &LeaderboardOptions) -> Result<Value, MamboError> {
        let url = options.apply(ApiUrlBuilder::new(base)).build();
        self.client.request(Method::Get, &url, None)
    }
}
