use serde::Deserialize;

use super::{deserialize_opt_bool, strip_quotes_and_deserialize};

/// One row of `SHOW GRANTS ON|TO ...`.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Grant {
    #[serde(default)]
    pub created_on: Option<String>,
    pub privilege: String,
    pub granted_on: String,
    /// The fully-qualified name of the object the grant is on.
    pub name: String,
    #[serde(default)]
    pub granted_to: Option<String>,
    #[serde(deserialize_with = "strip_quotes_and_deserialize")]
    pub grantee_name: String,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub grant_option: Option<bool>,
    #[serde(default)]
    pub granted_by: Option<String>,
}

/// Snowflake future grant entry.
///
/// Future grants apply to objects that will be created later in a schema or
/// database. `name` looks like `DB.<SCHEMA>` or `DB.SCHEMA.<TABLE>`.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct FutureGrant {
    #[serde(default)]
    pub created_on: Option<String>,
    pub privilege: String,
    /// This would be SCHEMA, TABLE, VIEW, etc.
    pub grant_on: String,
    pub name: String,
    #[serde(default)]
    pub grant_to: Option<String>,
    #[serde(deserialize_with = "strip_quotes_and_deserialize")]
    pub grantee_name: String,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub grant_option: Option<bool>,
}

/// Snowflake entry for `SHOW GRANTS OF ROLE`.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct RoleGrant {
    #[serde(default)]
    pub created_on: Option<String>,
    /// The role name in Snowflake.
    #[serde(deserialize_with = "strip_quotes_and_deserialize")]
    pub role: String,
    #[serde(default)]
    pub granted_to: Option<String>,
    #[serde(deserialize_with = "strip_quotes_and_deserialize")]
    pub grantee_name: String,
    #[serde(default)]
    pub granted_by: Option<String>,
}
