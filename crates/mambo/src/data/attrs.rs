//! Type-specific attributes of behaviours and rewards.

use serde::{Deserialize, Serialize};

use super::metadata::MetadataCondition;
use super::nested::{AchievementBehaviour, SimplePoint};
use super::recurrence::Recurrence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attrs {
    /// Behaviour tracked by verb only.
    Simple,
    /// Behaviour tracked by verb and matching metadata.
    Flexible(FlexibleAttrs),
    Achievement(AchievementAttrs),
    Level(LevelAttrs),
    /// Reward gifted from one user to another.
    Gifted(GiftedAttrs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexibleAttrs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MetadataCondition>,
}

/// Unlocked by repeating behaviours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AchievementAttrs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub behaviours: Vec<AchievementBehaviour>,
    /// Times a user may unlock the achievement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Recurrence>,
}

/// Unlocked at a points total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelAttrs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<SimplePoint>,
    /// Reputation levels are lost again when the user's points drop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GiftedAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uuid: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<SimplePoint>,
}
