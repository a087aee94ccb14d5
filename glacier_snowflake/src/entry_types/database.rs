use serde::Deserialize;

use super::{deserialize_opt_bool, deserialize_opt_int};

/// Snowflake Database entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Database {
    /// The database name in Snowflake.
    pub name: String,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_default: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_current: Option<bool>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub retention_time: Option<i64>,
}

impl Database {
    pub fn is_transient(&self) -> bool {
        self.options
            .as_deref()
            .map(|o| o.contains("TRANSIENT"))
            .unwrap_or_default()
    }
}

/// Snowflake Schema entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub database_name: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub retention_time: Option<i64>,
}

impl Schema {
    pub fn is_transient(&self) -> bool {
        self.has_option("TRANSIENT")
    }

    pub fn is_managed(&self) -> bool {
        self.has_option("MANAGED ACCESS")
    }

    fn has_option(&self, option: &str) -> bool {
        self.options
            .as_deref()
            .map(|o| o.contains(option))
            .unwrap_or_default()
    }
}
