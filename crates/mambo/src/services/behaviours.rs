//! Behaviours: the actions users perform on a site.

use serde_json::Value;

use super::{ListOptions, expand};
use crate::client::{MamboClient, Method};
use crate::data::{BehaviourRequestData, CustomFieldValueRequestData, DeleteRequestData};
use crate::error::MamboError;
use crate::url_builder::ApiUrlBuilder;

const BEHAVIOURS_URI: &str = "/v1/behaviours";
const BEHAVIOURS_ID_URI: &str = "/v1/behaviours/{id}";
const BEHAVIOURS_IMAGE_URI: &str = "/v1/behaviours/{id}/image";
const BEHAVIOURS_CLONE_URI: &str = "/v1/behaviours/{id}/clone";
const BEHAVIOURS_CUSTOM_URI: &str = "/v1/behaviours/{id}/custom_fields";
const BEHAVIOURS_SITE_URI: &str = "/v1/{site}/behaviours";
const SIMPLE_BEHAVIOURS_SITE_URI: &str = "/v1/{site}/behaviours/simple";
const FLEXIBLE_BEHAVIOURS_SITE_URI: &str = "/v1/{site}/behaviours/flexible";

#[derive(Debug, Clone, Copy)]
pub struct Behaviours<'a> {
    client: &'a MamboClient,
}

impl<'a> Behaviours<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(
        &self,
        site: &str,
        data: &BehaviourRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(BEHAVIOURS_SITE_URI, &[("site", site)]))
            .with_internal_points(with_internal_points)
            .build();
        self.client.request_with(Method::Post, &url, data)
    }

    pub fn update(
        &self,
        id: &str,
        data: &BehaviourRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(BEHAVIOURS_ID_URI, &[("id", id)]))
            .with_internal_points(with_internal_points)
            .build();
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
        let url = ApiUrlBuilder::new(expand(BEHAVIOURS_IMAGE_URI, &[("id", id)]))
            .with_internal_points(with_internal_points)
            .build();
        self.client.upload(&url, image, filename, content_type)
    }

    pub fn clone_behaviour(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(BEHAVIOURS_CLONE_URI, &[("id", id)]);
        self.client.request(Method::Post, &path, None)
    }

    pub fn delete(&self, id: &str) -> Result<Value, MamboError> {
        let path = expand(BEHAVIOURS_ID_URI, &[("id", id)]);
        self.client.request(Method::Delete, &path, None)
    }

    pub fn delete_many(&self, data: &DeleteRequestData) -> Result<Value, MamboError> {
        self.client.request_with(Method::Delete, BEHAVIOURS_URI, data)
    }

    pub fn get(&self, id: &str, with_internal_points: Option<bool>) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(BEHAVIOURS_ID_URI, &[("id", id)]))
            .with_internal_points(with_internal_points)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    /// All behaviours of a site.
    pub fn list(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(BEHAVIOURS_SITE_URI, site, options)
    }

    pub fn list_simple(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(SIMPLE_BEHAVIOURS_SITE_URI, site, options)
    }

    pub fn list_flexible(&self, site: &str, options: &ListOptions) -> Result<Value, MamboError> {
        self.list_at(FLEXIBLE_BEHAVIOURS_SITE_URI, site, options)
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
        self.custom_fields(Method::Post, id, data, with_internal_points)
    }

    pub fn update_custom_fields(
        &self,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        self.custom_fields(Method::Put, id, data, with_internal_points)
    }

    pub fn delete_custom_fields(
        &self,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        self.custom_fields(Method::Delete, id, data, with_internal_points)
    }

    fn custom_fields(
        &self,
        method: Method,
        id: &str,
        data: &CustomFieldValueRequestData,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(BEHAVIOURS_CUSTOM_URI, &[("id", id)]))
            .with_internal_points(with_internal_points)
            .build();
        self.client.request_with(method, &url, data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::client::tests::{assert_signed, test_client};
    use crate::data::{Attrs, CustomFieldValue};

    #[test]
    fn test_create_posts_to_site() {
        let (client, transport) = test_client();
        let data = BehaviourRequestData {
            name: Some("Buy".to_owned()),
            verb: Some("buy".to_owned()),
            attrs: Some(Attrs::Simple),
            ..BehaviourRequestData::default()
        };
        client.behaviours().create("acme.com", &data, Some(true)).unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.url,
            "https://api.mambo.io/v1/acme.com/behaviours?withInternalPoints=true"
        );
        let body: Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"name": "Buy", "verb": "buy", "attrs": {"type": "simple"}})
        );
        assert_signed(&sent);
    }

    #[test]
    fn test_list_variants() {
        let (client, transport) = test_client();
        let options = ListOptions {
            tags: vec!["vip".to_owned()],
            tag_uuid: Some("t1".to_owned()),
            ..ListOptions::default()
        };
        let behaviours = client.behaviours();
        behaviours.list("acme", &options).unwrap();
        behaviours.list_simple("acme", &ListOptions::default()).unwrap();
        behaviours.list_flexible("acme", &ListOptions::default()).unwrap();

        let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.mambo.io/v1/acme/behaviours?tags=vip&tagUuid=t1",
                "https://api.mambo.io/v1/acme/behaviours/simple",
                "https://api.mambo.io/v1/acme/behaviours/flexible",
            ]
        );
        transport.sent().iter().for_each(assert_signed);
    }

    #[test]
    fn test_delete_many_sends_ids() {
        let (client, transport) = test_client();
        client
            .behaviours()
            .delete_many(&DeleteRequestData::new(["b1", "b2"]))
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "https://api.mambo.io/v1/behaviours");
        assert_eq!(sent.body.unwrap(), br#"{"ids":["b1","b2"]}"#.to_vec());
    }

    #[test]
    fn test_custom_field_methods() {
        let (client, transport) = test_client();
        let data = CustomFieldValueRequestData {
            custom_fields: vec![CustomFieldValue::new("sku", "TEE-1")],
        };
        let behaviours = client.behaviours();
        behaviours.add_custom_fields("b1", &data, None).unwrap();
        behaviours.update_custom_fields("b1", &data, None).unwrap();
        behaviours.delete_custom_fields("b1", &data, None).unwrap();

        let methods: Vec<Method> = transport.sent().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Post, Method::Put, Method::Delete]);
        assert!(
            transport
                .sent()
                .iter()
                .all(|r| r.url == "https://api.mambo.io/v1/behaviours/b1/custom_fields")
        );
    }

    #[test]
    fn test_clone_and_image() {
        let (client, transport) = test_client();
        let behaviours = client.behaviours();
        behaviours.clone_behaviour("b 1").unwrap();
        behaviours
            .upload_image("b1", b"GIF89a", "icon.gif", "image/gif", None)
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].url, "https://api.mambo.io/v1/behaviours/b%201/clone");
        assert_eq!(sent[1].url, "https://api.mambo.io/v1/behaviours/b1/image");
        assert_signed(&sent[0]);
    }
}
