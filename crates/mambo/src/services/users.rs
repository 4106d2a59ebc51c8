//! Users of a site: profiles, rewards, rankings and activity history.

use serde_json::Value;

use super::{LeaderboardOptions, UserRewardOptions, expand};
use crate::client::{MamboClient, Method};
use crate::data::{CustomFieldValueRequestData, UserRequestData};
use crate::error::MamboError;
use crate::url_builder::{ApiUrlBuilder, Order, OrderBy};

const USER_ID_URI: &str = "/v1/users/{id}";
const USER_SITE_URI: &str = "/v1/{site}/users";
const USER_UUID_URI: &str = "/v1/{site}/users/{uuid}";
const USER_SEARCH_URI: &str = "/v1/{site}/users/search";
const USER_BLACKLIST_URI: &str = "/v1/{site}/users/blacklist";
const USER_BLACKLIST_UUID_URI: &str = "/v1/{site}/users/blacklist/{uuid}";
const USER_RESET_URI: &str = "/v1/{site}/users/{uuid}/reset";
const USER_CUSTOM_URI: &str = "/v1/{site}/users/{uuid}/custom_fields";
const USER_REWARDS_URI: &str = "/v1/{site}/users/{uuid}/rewards";
const USER_ALL_REWARDS_URI: &str = "/v1/{site}/users/{uuid}/rewards/all";
const USER_LEVELS_URI: &str = "/v1/{site}/users/{uuid}/rewards/levels";
const USER_ALL_LEVELS_URI: &str = "/v1/{site}/users/{uuid}/rewards/levels/all";
const USER_ACHIEVEMENTS_URI: &str = "/v1/{site}/users/{uuid}/rewards/achievements";
const USER_ALL_ACHIEVEMENTS_URI: &str = "/v1/{site}/users/{uuid}/rewards/achievements/all";
const USER_MISSIONS_URI: &str = "/v1/{site}/users/{uuid}/rewards/missions";
const USER_ALL_MISSIONS_URI: &str = "/v1/{site}/users/{uuid}/rewards/missions/all";
const USER_GIFTS_URI: &str = "/v1/{site}/users/{uuid}/rewards/gifts";
const USER_ALL_GIFTS_URI: &str = "/v1/{site}/users/{uuid}/rewards/gifts/all";
const USER_COUPONS_URI: &str = "/v1/{site}/users/{uuid}/coupons";
const USER_ALL_COUPONS_URI: &str = "/v1/{site}/users/{uuid}/coupons/all";
const USER_PURCHASES_URI: &str = "/v1/{site}/users/{uuid}/purchases";
const USER_ACTIVITIES_URI: &str = "/v1/{site}/users/{uuid}/activities";
const USER_NOTIFICATIONS_URI: &str = "/v1/{site}/users/{uuid}/notifications";
const USER_CLEAR_NOTIFICATIONS_URI: &str = "/v1/{site}/users/{uuid}/notifications/clear";
const USER_LEADERBOARD_URI: &str = "/v1/{site}/users/{uuid}/leaderboards/{id}";
const USER_SYSTEM_LEADERBOARD_URI: &str = "/v1/{site}/users/{uuid}/leaderboards/system";

/// Filters for user lists, search and the blacklist.
#[derive(Debug, Clone, Default)]
pub struct UserListOptions {
    pub tags: Vec<String>,
    pub tags_join: Option<String>,
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub order_by: Option<OrderBy>,
    pub order: Option<Order>,
    pub with_internal_points: Option<bool>,
    /// Only users who unlocked one of these rewards.
    pub reward_ids: Vec<String>,
    /// Only users who performed one of these behaviours.
    pub behaviour_ids: Vec<String>,
}

impl UserListOptions {
    fn apply(&self, builder: ApiUrlBuilder) -> ApiUrlBuilder {
        builder
            .tags(&self.tags)
            .tags_join(self.tags_join.as_deref())
            .page(self.page)
            .count(self.count)
            .order_by(self.order_by)
            .order(self.order)
    }

    fn apply_id_filters(&self, builder: ApiUrlBuilder) -> ApiUrlBuilder {
        builder
            .with_internal_points(self.with_internal_points)
            .reward_ids(&self.reward_ids)
            .behaviour_ids(&self.behaviour_ids)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationOptions {
    pub tags: Vec<String>,
    pub tags_join: Option<String>,
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub with_personalization: Option<bool>,
    pub with_activities: Option<bool>,
    /// Include notifications already marked as read.
    pub with_read: Option<bool>,
}

/// Filters for a user's activity stream.
///
/// The `*_only` flags narrow the stream to one kind of activity.
#[derive(Debug, Clone, Default)]
pub struct ActivityOptions {
    pub tags: Vec<String>,
    pub tags_join: Option<String>,
    pub with_personalization: Option<bool>,
    pub with_behaviours_only: Option<bool>,
    pub with_rewards_only: Option<bool>,
    pub with_missions_only: Option<bool>,
    pub with_levels_only: Option<bool>,
    pub with_achievements_only: Option<bool>,
    pub with_gifts_only: Option<bool>,
    /// Include activities where the user is the target, e.g. received gifts.
    pub with_target_user: Option<bool>,
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub with_internal_points: Option<bool>,
    pub point_ids: Vec<String>,
    pub reward_ids: Vec<String>,
    pub behaviour_ids: Vec<String>,
    /// Include behaviours rejected with an exception status.
    pub with_exceptions: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a MamboClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a MamboClient) -> Self {
        Self { client }
    }

    pub fn create(
        &self,
        site: &str,
        data: &UserRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(USER_SITE_URI, &[("site", site)]))
            .with_personalization(with_personalization)
            .with_internal_points(with_internal_points)
            .build();
        self.client.request_with(Method::Post, &url, data)
    }

    pub fn update(
        &self,
        site: &str,
        uuid: &str,
        data: &UserRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_UUID_URI, site, uuid))
            .with_personalization(with_personalization)
            .with_internal_points(with_internal_points)
            .build();
        self.client.request_with(Method::Put, &url, data)
    }

    pub fn get(
        &self,
        site: &str,
        uuid: &str,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_UUID_URI, site, uuid))
            .with_personalization(with_personalization)
            .with_internal_points(with_internal_points)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    /// Look a user up by platform id rather than site uuid.
    pub fn get_by_id(
        &self,
        id: &str,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(USER_ID_URI, &[("id", id)]))
            .with_internal_points(with_internal_points)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn delete(&self, site: &str, uuid: &str) -> Result<Value, MamboError> {
        self.client
            .request(Method::Delete, &user_path(USER_UUID_URI, site, uuid), None)
    }

    /// Wipe the user's points, rewards and activities.
    pub fn reset(&self, site: &str, uuid: &str) -> Result<Value, MamboError> {
        self.client
            .request(Method::Post, &user_path(USER_RESET_URI, site, uuid), None)
    }

    pub fn add_to_blacklist(&self, site: &str, uuid: &str) -> Result<Value, MamboError> {
        let path = user_path(USER_BLACKLIST_UUID_URI, site, uuid);
        self.client.request(Method::Post, &path, None)
    }

    pub fn remove_from_blacklist(&self, site: &str, uuid: &str) -> Result<Value, MamboError> {
        let path = user_path(USER_BLACKLIST_UUID_URI, site, uuid);
        self.client.request(Method::Delete, &path, None)
    }

    /// Blacklisted users. Ordering and id filters are not sent.
    pub fn blacklisted(&self, site: &str, options: &UserListOptions) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(expand(USER_BLACKLIST_URI, &[("site", site)]))
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .page(options.page)
            .count(options.count)
            .with_internal_points(options.with_internal_points)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn rewards(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_REWARDS_URI, site, uuid, options)
    }

    /// Every reward, including those the user has not unlocked yet.
    pub fn all_rewards(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ALL_REWARDS_URI, site, uuid, options)
    }

    pub fn levels(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_LEVELS_URI, site, uuid, options)
    }

    pub fn all_levels(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ALL_LEVELS_URI, site, uuid, options)
    }

    pub fn achievements(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ACHIEVEMENTS_URI, site, uuid, options)
    }

    pub fn all_achievements(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ALL_ACHIEVEMENTS_URI, site, uuid, options)
    }

    pub fn missions(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_MISSIONS_URI, site, uuid, options)
    }

    pub fn all_missions(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ALL_MISSIONS_URI, site, uuid, options)
    }

    pub fn gifts(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_GIFTS_URI, site, uuid, options)
    }

    pub fn all_gifts(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_rewards(USER_ALL_GIFTS_URI, site, uuid, options)
    }

    pub fn coupons(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_coupons(USER_COUPONS_URI, site, uuid, options)
    }

    pub fn all_coupons(
        &self,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        self.user_coupons(USER_ALL_COUPONS_URI, site, uuid, options)
    }

    fn user_rewards(
        &self,
        template: &str,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        let url = options
            .apply(ApiUrlBuilder::new(user_path(template, site, uuid)))
            .build();
        self.client.request(Method::Get, &url, None)
    }

    fn user_coupons(
        &self,
        template: &str,
        site: &str,
        uuid: &str,
        options: &UserRewardOptions,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(template, site, uuid))
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .with_personalization(options.with_personalization)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    /// The system leaderboard as seen by the user.
    pub fn system_leaderboard(
        &self,
        site: &str,
        uuid: &str,
        options: &LeaderboardOptions,
    ) -> Result<Value, MamboError> {
        let base = user_path(USER_SYSTEM_LEADERBOARD_URI, site, uuid);
        self.user_leaderboard(base, options)
    }

    pub fn leaderboard(
        &self,
        site: &str,
        id: &str,
        uuid: &str,
        options: &LeaderboardOptions,
    ) -> Result<Value, MamboError> {
        let base = expand(
            USER_LEADERBOARD_URI,
            &[("site", site), ("uuid", uuid), ("id", id)],
        );
        self.user_leaderboard(base, options)
    }

    fn user_leaderboard(
        &self,
        base: String,
        options: &LeaderboardOptions,
    ) -> Result<Value, MamboError> {
        let options = LeaderboardOptions {
            with_users: None,
            ..options.clone()
        };
        let url = options.apply(ApiUrlBuilder::new(base)).build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn notifications(
        &self,
        site: &str,
        uuid: &str,
        options: &NotificationOptions,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_NOTIFICATIONS_URI, site, uuid))
            .page(options.page)
            .count(options.count)
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .with_personalization(options.with_personalization)
            .with_activities(options.with_activities)
            .with_read(options.with_read)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    /// Mark every notification of the user as read.
    pub fn clear_notifications(&self, site: &str, uuid: &str) -> Result<Value, MamboError> {
        let path = user_path(USER_CLEAR_NOTIFICATIONS_URI, site, uuid);
        self.client.request(Method::Post, &path, None)
    }

    pub fn purchases(
        &self,
        site: &str,
        uuid: &str,
        page: Option<u32>,
        count: Option<u32>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_PURCHASES_URI, site, uuid))
            .page(page)
            .count(count)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn activities(
        &self,
        site: &str,
        uuid: &str,
        options: &ActivityOptions,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_ACTIVITIES_URI, site, uuid))
            .tags(&options.tags)
            .tags_join(options.tags_join.as_deref())
            .with_personalization(options.with_personalization)
            .with_behaviours_only(options.with_behaviours_only)
            .with_rewards_only(options.with_rewards_only)
            .with_missions_only(options.with_missions_only)
            .with_levels_only(options.with_levels_only)
            .with_achievements_only(options.with_achievements_only)
            .with_gifts_only(options.with_gifts_only)
            .with_target_user(options.with_target_user)
            .page(options.page)
            .count(options.count)
            .with_internal_points(options.with_internal_points)
            .point_ids(&options.point_ids)
            .reward_ids(&options.reward_ids)
            .behaviour_ids(&options.behaviour_ids)
            .with_exceptions(options.with_exceptions)
            .build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn list(&self, site: &str, options: &UserListOptions) -> Result<Value, MamboError> {
        let builder = options.apply(ApiUrlBuilder::new(expand(USER_SITE_URI, &[("site", site)])));
        let url = options.apply_id_filters(builder).build();
        self.client.request(Method::Get, &url, None)
    }

    /// Free-text user search.
    ///
    /// # Errors
    ///
    /// Returns [`MamboError::InvalidArgument`] if `query` is blank.
    pub fn search(
        &self,
        site: &str,
        query: &str,
        options: &UserListOptions,
    ) -> Result<Value, MamboError> {
        if query.trim().is_empty() {
            return Err(MamboError::InvalidArgument(
                "search query must not be empty".to_owned(),
            ));
        }
        let builder = options
            .apply(ApiUrlBuilder::new(expand(USER_SEARCH_URI, &[("site", site)])))
            .query(Some(query));
        let url = options.apply_id_filters(builder).build();
        self.client.request(Method::Get, &url, None)
    }

    pub fn add_custom_fields(
        &self,
        site: &str,
        uuid: &str,
        data: &CustomFieldValueRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        self.custom_fields(
            Method::Post,
            site,
            uuid,
            data,
            with_personalization,
            with_internal_points,
        )
    }

    pub fn update_custom_fields(
        &self,
        site: &str,
        uuid: &str,
        data: &CustomFieldValueRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        self.custom_fields(
            Method::Put,
            site,
            uuid,
            data,
            with_personalization,
            with_internal_points,
        )
    }

    pub fn delete_custom_fields(
        &self,
        site: &str,
        uuid: &str,
        data: &CustomFieldValueRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        self.custom_fields(
            Method::Delete,
            site,
            uuid,
            data,
            with_personalization,
            with_internal_points,
        )
    }

    fn custom_fields(
        &self,
        method: Method,
        site: &str,
        uuid: &str,
        data: &CustomFieldValueRequestData,
        with_personalization: Option<bool>,
        with_internal_points: Option<bool>,
    ) -> Result<Value, MamboError> {
        let url = ApiUrlBuilder::new(user_path(USER_CUSTOM_URI, site, uuid))
            .with_internal_points(with_internal_points)
            .with_personalization(with_personalization)
            .build();
        self.client.request_with(method, &url, data)
    }
}

fn user_path(template: &str, site: &str, uuid: &str) -> String {
    expand(template, &[("site", site), ("uuid", uuid)])
}
