//! Recurrence rules for expirations and limits.

use serde::{Deserialize, Serialize};

/// When an object recurs or expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Recurrence {
    /// Recurs on fixed calendar dates, e.g. every Monday at 9am.
    #[serde(rename = "fixed_period")]
    FixedPeriod { period: FixedPeriod },
    /// Recurs a set time after creation, e.g. 4 weeks after.
    #[serde(rename = "variable_period")]
    VariablePeriod { period: VariablePeriod },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FixedPeriod {
    Daily(Daily),
    Yearly(Yearly),
}

/// Every `day_interval` days at `hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Daily {
    /// 0 to 23, 0 is midnight.
    pub hour: u8,
    /// 1 to 30.
    pub day_interval: u8,
    /// ISO 8601 UTC timestamp; only the date part is used.
    pub period_start: String,
}

/// Every `year_interval` years in `months`, narrowed by `criteria`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Yearly {
    pub hour: u8,
    /// 1 (January) to 12. Ignored with [`Criteria::WeeksOfYear`].
    pub months: Vec<u8>,
    /// 1 to 10.
    pub year_interval: u8,
    pub criteria: Criteria,
    pub period_start: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Criteria {
    #[serde(rename_all = "camelCase")]
    DaysOfMonth { days_of_month: Vec<u8> },
    #[serde(rename_all = "camelCase")]
    WeeksOfMonth {
        weeks_of_month: Vec<u8>,
        days_of_week: Vec<u8>,
    },
    #[serde(rename_all = "camelCase")]
    WeeksOfYear {
        weeks_of_year: Vec<u8>,
        days_of_week: Vec<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Offset from the object's creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariablePeriod {
    pub unit: TimeUnit,
    pub value: u32,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fixed_yearly_shape() {
        let recurrence = Recurrence::FixedPeriod {
            period: FixedPeriod::Yearly(Yearly {
                hour: 9,
                months: vec![1, 6],
                year_interval: 1,
                criteria: Criteria::WeeksOfMonth {
                    weeks_of_month: vec![1],
                    days_of_week: vec![2],
                },
                period_start: "2024-01-01T00:00:00.000Z".to_owned(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&recurrence).unwrap(),
            json!({
                "type": "fixed_period",
                "period": {
                    "type": "yearly",
                    "hour": 9,
                    "months": [1, 6],
                    "yearInterval": 1,
                    "criteria": {
                        "type": "weeksOfMonth",
                        "weeksOfMonth": [1],
                        "daysOfWeek": [2]
                    },
                    "periodStart": "2024-01-01T00:00:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_variable_period_parses() {
        let recurrence: Recurrence = serde_json::from_value(json!({
            "type": "variable_period",
            "period": {"unit": "week", "value": 4}
        }))
        .unwrap();
        assert_eq!(
            recurrence,
            Recurrence::VariablePeriod {
                period: VariablePeriod {
                    unit: TimeUnit::Week,
                    value: 4
                }
            }
        );
    }

    #[test]
    fn test_daily_shape() {
        let period = FixedPeriod::Daily(Daily {
            hour: 0,
            day_interval: 2,
            period_start: "2024-03-01T00:00:00.000Z".to_owned(),
        });
        assert_eq!(
            serde_json::to_value(&period).unwrap(),
            json!({
                "type": "daily",
                "hour": 0,
                "dayInterval": 2,
                "periodStart": "2024-03-01T00:00:00.000Z"
            })
        );
    }
}
