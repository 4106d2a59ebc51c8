//! Coupons redeemable by users.

use serde_json::Value;

use super::{ListOptions, expand};
use crate::client::{MamboClient, Method};
use crate::data::{CouponRequestData, CouponUserRequestData, DeleteRequestData};
use crate::error::MamboError;
use crate::url_builder::ApiUrlBuilder;

const COUPONS_URI: &str = "/v1/coupons";
const COUPONS_ID_URI: &str = "/v1/coupons/{id}";
const COUPONS_IMAGE_URI: &str = "/v1/coupons/{id}/image";
const COUPONS_CLONE_URI: &str = "/v1/coupons/{id}/clone";
const COUPONS_SITE_URI: &str = "/v1/{site}/coupons";
const COUPONS_BUYABLE_URI: &str = "/v1/{site}/coupons/buyable";
const COUPONS_REGULAR_URI: &str = "/v1/{site}/coupons/regular";
const VALIDATE_COUPON_URI: &str = "/v1/{site}/coupons/validate";

#[derive(Debug, Clone, Copy)]
pub struct Coupons<'a> {
    client: &'a MamboClient,
}

impl<'a> Coupons<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(&self, site: &str, data: &CouponRequestData) -> Result<Value, MamboError> {
        let path = expand(COUPONS_SITE_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, data)
    }

    pub fn update(&self, id: &str, data: &CouponRequestData) -> Result<Value, MamboError> {
        let path = expand(COUPONS_ID_URI, &[("id", id)]);
        self.client.request_with(Method::Put, &path, data)
    }

    pub fn upload_image(
        &self,
        id: &str,
        image: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<Value, MamboError> {
        let path = expand(COUPONS_IMAGE_URI, &[("id", id)]);
        self.client.upload(&path, image, filename, content_type)
    }

    pub fn clone_coupon(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(COUPONS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(COUPONS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, COUPONS_URI, data)
    }

    pub fn get(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(COUPONS_ID_URI, &[("id", id)]);
        self.client.request(Method::Get, &path, None)
    }

    /// Check whether `coupon_code` can be used by the user `uuid`.
    pub fn validate(&self, site: &str, uuid: &str, coupon_code: &str) -> Result<Value, MamboError> {
        let data = CouponUserRequestData {
            uuid: uuid.to_owned(),
            coupon_code: coupon_code.to_owned(),
        };
        let path = expand(VALIDATE_COUPON_URI, &[("site", site)]);
        self.client.request_with(Method::Post, &path, &data)
    }

    pub fn list(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(COUPONS_SITE_URI, site, options)
    }

    /// Coupons users can buy with points.
    pub fn list_buyable(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(COUPONS_BUYABLE_URI, site, options)
    }

    pub fn list_regular(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(COUPONS_REGULAR_URI, site, options)
    }

    fn list_at(
        &self,
        template: &str,
        site: &str,
        options: &ListOptions,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(template, &[("site", site)]))
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .tag_uuid(options.tag_uuid.as_deref())
            .build();
        self.client.request(Method::Get, &url, None)
    }
}
