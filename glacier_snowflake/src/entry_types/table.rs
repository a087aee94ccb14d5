use serde::Deserialize;

use super::{deserialize_opt_bool, deserialize_opt_int};

/// Snowflake Table entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Table {
    /// The table name in Snowflake.
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub cluster_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub rows: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub retention_time: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub change_tracking: Option<bool>,
}

/// Snowflake View entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct View {
    /// The view name in Snowflake.
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_secure: Option<bool>,
}

/// Snowflake Materialized View entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct MaterializedView {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub reserved: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_database_name: Option<String>,
    #[serde(default)]
    pub source_schema_name: Option<String>,
    #[serde(default)]
    pub source_table_name: Option<String>,
    #[serde(default)]
    pub cluster_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub invalid: Option<bool>,
    #[serde(default)]
    pub invalid_reason: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_secure: Option<bool>,
}

/// Snowflake External Table entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct ExternalTable {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub file_format_name: Option<String>,
    #[serde(default)]
    pub file_format_type: Option<String>,
    #[serde(default)]
    pub notification_channel: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Snowflake Sequence entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Sequence {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub next_value: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub interval: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Snowflake Stream entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Stream {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default, rename = "type")]
    pub stream_type: Option<String>,
    #[serde(default)]
    pub stale: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl Stream {
    pub fn is_append_only(&self) -> bool {
        self.mode.as_deref() == Some("APPEND_ONLY")
    }
}
