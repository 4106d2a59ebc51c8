//! Per-language text overrides.
//!
//! Every translation carries a `languageCode` matching a language configured
//! for the site.

use serde::{Deserialize, Serialize};

macro_rules! translation {
    ($(#[$doc:meta])* $name:ident { $($field:ident),* $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            pub language_code: String,
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )*
        }

        impl $name {
            pub fn new(language_code: impl Into<String>) -> Self {
                Self {
                    language_code: language_code.into(),
                    ..Self::default()
                }
            }
        }
    };
}

translation!(BehaviourTranslation {
    name,
    message,
    hint,
    target_prefix,
    content_prefix,
});

translation!(CouponTranslation {
    name,
    help_message,
    custom,
});

translation!(
    /// Leaderboard display name.
    LeaderboardTranslation { name }
);

translation!(PointTranslation {
    name,
    description,
    singular,
    plural,
    abbr_singular,
    abbr_plural,
});

translation!(RewardTranslation { name, message, hint });

translation!(TagTranslation { name });
