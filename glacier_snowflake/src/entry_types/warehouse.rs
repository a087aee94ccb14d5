use serde::Deserialize;

use super::{deserialize_opt_bool, deserialize_opt_float, deserialize_opt_int};

/// Snowflake Warehouse entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Warehouse {
    /// The warehouse name in Snowflake.
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, rename = "type")]
    pub warehouse_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub min_cluster_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub max_cluster_count: Option<i64>,
    #[serde(default)]
    pub scaling_policy: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub auto_suspend: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub auto_resume: Option<bool>,
    #[serde(default)]
    pub resource_monitor: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub enable_query_acceleration: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub query_acceleration_max_scale_factor: Option<i64>,
}

/// Snowflake Resource Monitor entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct ResourceMonitor {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_opt_float")]
    pub credit_quota: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_float")]
    pub used_credits: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_float")]
    pub remaining_credits: Option<f64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub notify_at: Option<String>,
    #[serde(default)]
    pub suspend_at: Option<String>,
    #[serde(default)]
    pub suspend_immediately_at: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ResourceMonitor {
    /// Parse a threshold column such as `90%` into its percentage.
    pub fn thresholds(raw: Option<&str>) -> Vec<u32> {
        raw.unwrap_or_default()
            .split(',')
            .filter_map(|t| t.trim().trim_end_matches('%').parse().ok())
            .collect()
    }
}
