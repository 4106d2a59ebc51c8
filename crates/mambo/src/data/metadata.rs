//! Metadata conditions matched against flexible behaviour activities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataCondition {
    /// Compare one metadata value.
    Leaf {
        name: String,
        operator: MetadataOperator,
        value: String,
    },
    /// Any nested condition matches.
    Or { conditions: Vec<MetadataCondition> },
    /// Every nested condition matches.
    And { conditions: Vec<MetadataCondition> },
}

impl MetadataCondition {
    pub fn leaf(
        name: impl Into<String>,
        operator: MetadataOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::Leaf {
            name: name.into(),
            operator,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataOperator {
    #[serde(rename = "$gt")]
    GreaterThan,
    #[serde(rename = "$gte")]
    GreaterThanOrEqual,
    #[serde(rename = "$lt")]
    LessThan,
    #[serde(rename = "$lte")]
    LessThanOrEqual,
    #[serde(rename = "$on")]
    On,
    #[serde(rename = "$non")]
    NotOn,
    #[serde(rename = "$after")]
    After,
    #[serde(rename = "$onafter")]
    OnOrAfter,
    #[serde(rename = "$before")]
    Before,
    #[serde(rename = "$onbefore")]
    OnOrBefore,
    #[serde(rename = "$eq")]
    Equal,
    #[serde(rename = "$neq")]
    NotEqual,
    #[serde(rename = "$in")]
    Contains,
    #[serde(rename = "$nin")]
    NotContains,
    #[serde(rename = "$sw")]
    StartsWith,
    #[serde(rename = "$nsw")]
    NotStartsWith,
    #[serde(rename = "$ew")]
    EndsWith,
    #[serde(rename = "$new")]
    NotEndsWith,
}
