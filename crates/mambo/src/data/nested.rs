//! Values embedded in request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::recurrence::Recurrence;

/// Points of a single point type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePoint {
    pub point_id: String,
    pub points: i64,
}

impl SimplePoint {
    pub fn new(point_id: impl Into<String>, points: i64) -> Self {
        Self {
            point_id: point_id.into(),
            points,
        }
    }
}

/// Points that lapse according to `expiration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpiringPoint {
    pub point_id: String,
    pub points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Recurrence>,
}

/// Repetitions allowed per user for a behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Metadata name the count applies to, e.g. `product_sku`. Flexible
    /// behaviours only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// When the count resets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Recurrence>,
}

/// Tags referenced by id or by tag value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrizeTags {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_tags: Vec<String>,
}

/// What a user receives for a behaviour or reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Prize {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<ExpiringPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_tags: Option<PrizeTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_tags: Option<PrizeTags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_coupon: Option<bool>,
}

/// Limited-series rewards: `limit` unlocks overall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scarcity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Unlocks so far; only set on responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementBehaviour {
    pub behaviour_id: String,
    pub times: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub name: String,
    pub value: Value,
}

impl CustomFieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
