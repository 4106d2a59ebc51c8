//! JSON request data for the Mambo API.

mod attrs;
mod metadata;
mod nested;
mod recurrence;
mod request;
mod translation;

pub use self::attrs::{AchievementAttrs, Attrs, FlexibleAttrs, GiftedAttrs, LevelAttrs};
pub use self::metadata::{MetadataCondition, MetadataOperator};
pub use self::nested::{
    AchievementBehaviour, CustomFieldValue, ExpiringPoint, Limit, Prize, PrizeTags, Scarcity,
    SimplePoint,
};
pub use self::recurrence::{
    Criteria, Daily, FixedPeriod, Recurrence, TimeUnit, VariablePeriod, Yearly,
};
pub use self::request::{
    BehaviourRequestData, CouponRequestData, CouponUserRequestData, CustomFieldRequestData,
    CustomFieldValueRequestData, DataStoreRequestData, DeleteRequestData, LanguageRequestData,
    LeaderboardRequestData, RewardRequestData, TagRequestData, UserDetails, UserRequestData,
};
pub use self::translation::{
    BehaviourTranslation, CouponTranslation, LeaderboardTranslation, PointTranslation,
    RewardTranslation, TagTranslation,
};
