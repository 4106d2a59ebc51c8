//! Site analytics reports.

use serde_json::Value;

use super::expand;
use crate::client::{MamboClient, Method};
use crate::error::MamboError;
use crate::url_builder::ApiUrlBuilder;

const ANALYTICS_SITE_URI: &str = "/v1/{site}/analytics";
const ANALYTICS_REGENERATE_URI: &str = "/v1/{site}/analytics/regenerate";

/// Report selection for [`Analytics::get_analytics`].
#[derive(Debug, Clone, Default)]
pub struct AnalyticsQuery {
    pub data_type: String,
    pub report_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Hourly breakdown, daily reports only.
    pub with_hours: Option<bool>,
    pub page: Option<u32>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    client: &'a MamboClient,
}

impl<'a> Analytics<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    /// Rebuild the site's analytics. Runs asynchronously on the server.
    pub fn regenerate(&self, site: &str) -> Result<Value, MamboError> {
        let path = expand(ANALYTICS_REGENERATE_URI, &[("site", site)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn get_analytics(&self, site: &str, query: &AnalyticsQuery) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(ANALYTICS_SITE_URI, &[("site", site)]))
            .data_type(Some(query.data_type.as_str()))
            .report_type(Some(query.report_type.as_str()))
            .start_date(query.start_date.as_deref())
            .end_date(query.end_date.as_deref())
            .with_hours(query.with_hours)
            .page(query.page)
            .count(query.count)
            .build();
        self.client.request(Method::Get, &url, None)
    }
}
