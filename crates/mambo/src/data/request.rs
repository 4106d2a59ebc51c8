//! Request bodies for create and update calls.
//!
//! Unset fields are left out of the JSON so updates only touch what was set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::attrs::Attrs;
use super::nested::{CustomFieldValue, Limit, Prize, Scarcity};
use super::translation::{
    BehaviourTranslation, CouponTranslation, LeaderboardTranslation, RewardTranslation,
    TagTranslation,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviourRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Verb used when tracking activities for this behaviour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    /// Activity stream text settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Value>,
    /// Seconds before the behaviour counts again for the same user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cool_off: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prizes: Option<Prize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_widgets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js_trackable: Option<bool>,
    /// Personalization tag ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_filter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_image: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<BehaviourTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Levels only: user keeps at least this level once reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_at_least: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prizes: Option<Prize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scarcity: Option<Scarcity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_widgets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_image: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<RewardTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Value matched by `tags=` filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Personalization tags narrow what users with the tag can see.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_widgets: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<TagTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderboardRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub point_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filterable_by_tag_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_one_tag_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_ranking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<LeaderboardTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO 639-1 code, e.g. `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,
}

/// Definition of a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomFieldRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// `string` or `int`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Currently only `user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

/// Custom field values to add, update or remove on an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomFieldValueRequestData {
    pub custom_fields: Vec<CustomFieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataStoreRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Coupon definition. Fields not modelled here go in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CouponRequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// `percent`, `fixed` or `shipping`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub coupon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<CouponTranslation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a coupon validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CouponUserRequestData {
    pub uuid: String,
    pub coupon_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// User profile. Fields not modelled here go in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRequestData {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<UserDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_member: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ids for a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequestData {
    pub ids: Vec<String>,
}

impl DeleteRequestData {
    pub fn new<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}
