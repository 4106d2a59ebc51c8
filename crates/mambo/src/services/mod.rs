//! Typed wrappers over the Mambo REST endpoints.
//!
//! Each service borrows a [`MamboClient`](crate::MamboClient) and returns the
//! decoded JSON response.

mod analytics;
mod behaviours;
mod coupons;
mod custom_fields;
mod data_stores;
mod languages;
mod leaderboards;
mod rewards;
mod tags;
mod users;

use mambo_oauth::encode;

pub use self::analytics::{Analytics, AnalyticsQuery};
pub use self::behaviours::Behaviours;
pub use self::coupons::Coupons;
pub use self::custom_fields::CustomFields;
pub use self::data_stores::DataStores;
pub use self::languages::Languages;
pub use self::leaderboards::{LeaderboardOptions, Leaderboards};
pub use self::rewards::Rewards;
pub use self::tags::Tags;
pub use self::users::{ActivityOptions, NotificationOptions, UserListOptions, Users};
use crate::url_builder::ApiUrlBuilder;

/// Substitute `{name}` placeholders with percent-encoded path segments.
pub(crate) fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_owned(), |path, (name, value)| {
        path.replace(&format!("{{{name}}}"), &encode(value))
    })
}

/// Filters shared by the catalogue list endpoints (behaviours, coupons,
/// rewards, leaderboards).
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub tags: Vec<String>,
    /// `hasAnyOf` or `hasAllOf`.
    pub tags_join: Option<String>,
    /// Only objects visible to this tag.
    pub tag_uuid: Option<String>,
    pub with_internal_points: Option<bool>,
    /// Rewards only: restrict to rewards granting these points.
    pub point_ids: Vec<String>,
}

impl ListOptions {
    pub(crate) fn apply(&self, builder: ApiUrlBuilder) -> ApiUrlBuilder {
        builder
            .tags(&self.tags)
            .tags_join(self.tags_join.as_deref())
            .tag_uuid(self.tag_uuid.as_deref())
            .with_internal_points(self.with_internal_points)
            .point_ids(&self.point_ids)
    }
}

/// Tag and personalization filters for a user's rewards and coupons.
#[derive(Debug, Clone, Default)]
pub struct UserRewardOptions {
    pub tags: Vec<String>,
    pub tags_join: Option<String>,
    pub with_personalization: Option<bool>,
    /// Ignored by the coupon endpoints.
    pub with_internal_points: Option<bool>,
}

impl UserRewardOptions {
    pub(crate) fn apply(&self, builder: ApiUrlBuilder) -> ApiUrlBuilder {
        builder
            .tags(&self.tags)
            .tags_join(self.tags_join.as_deref())
            .with_personalization(self.with_personalization)
            .with_internal_points(self.with_internal_points)
    }
}
