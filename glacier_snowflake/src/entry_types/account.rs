use serde::{Deserialize, Serialize};

use super::{deserialize_opt_bool, deserialize_opt_int, strip_quotes_and_deserialize};

/// Snowflake User entry.
#[derive(Clone, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub login_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub disabled: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub must_change_password: Option<bool>,
    #[serde(default)]
    pub default_warehouse: Option<String>,
    #[serde(default)]
    pub default_namespace: Option<String>,
    #[serde(default)]
    pub default_role: Option<String>,
    #[serde(default)]
    pub default_secondary_roles: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub has_rsa_public_key: Option<bool>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Wrapper struct for role names.
///
/// These are globally unique within a Snowflake account.
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RoleName(#[serde(deserialize_with = "strip_quotes_and_deserialize")] pub String);

/// Snowflake Role entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct Role {
    /// The role name in Snowflake.
    pub name: RoleName,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub assigned_to_users: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub granted_to_roles: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub granted_roles: Option<i64>,
}

/// Snowflake Share entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct Share {
    pub name: String,
    /// INBOUND or OUTBOUND.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub database_name: Option<String>,
    /// Comma-separated consumer accounts.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Share {
    /// The consumer accounts in [`Share::to`].
    pub fn accounts(&self) -> Vec<String> {
        self.to
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect()
    }
}

/// Snowflake Integration entry, for every integration category.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct Integration {
    pub name: String,
    #[serde(default, rename = "type")]
    pub integration_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
}

/// Snowflake Managed (reader) Account entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct ManagedAccount {
    pub name: String,
    #[serde(default)]
    pub cloud: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub locator: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub account_owner_role: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Snowflake organization Account entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct Account {
    pub account_name: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub region_group: Option<String>,
    #[serde(default)]
    pub snowflake_region: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub account_url: Option<String>,
    #[serde(default)]
    pub account_locator: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_org_admin: Option<bool>,
}

/// Snowflake Failover Group entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct FailoverGroup {
    pub name: String,
    #[serde(default)]
    pub region_group: Option<String>,
    #[serde(default)]
    pub snowflake_region: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub object_types: Option<String>,
    #[serde(default)]
    pub allowed_integration_types: Option<String>,
    #[serde(default)]
    pub allowed_accounts: Option<String>,
    #[serde(default)]
    pub replication_schedule: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}
