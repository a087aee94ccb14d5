use serde::Deserialize;

use super::deserialize_opt_int;

/// Snowflake Masking Policy entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct MaskingPolicy {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Snowflake Row Access Policy entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct RowAccessPolicy {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Snowflake Tag entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// JSON array of allowed values, absent when any value is allowed.
    #[serde(default)]
    pub allowed_values: Option<String>,
}

impl Tag {
    pub fn allowed_value_list(&self) -> Vec<String> {
        self.allowed_values
            .as_deref()
            .and_then(|v| serde_json::from_str(v).ok())
            .unwrap_or_default()
    }
}

/// Snowflake Network Policy entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct NetworkPolicy {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub entries_in_allowed_ip_list: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub entries_in_blocked_ip_list: Option<i64>,
}

/// One row of `DESCRIBE NETWORK POLICY`.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct NetworkPolicyDescription {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl NetworkPolicyDescription {
    /// The comma-separated IP list in [`NetworkPolicyDescription::value`].
    pub fn ips(&self) -> Vec<String> {
        self.value
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|ip| ip.trim().to_owned())
            .filter(|ip| !ip.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_value_list_works() {
        let tag = Tag {
            name: "t".to_owned(),
            allowed_values: Some(r#"["a","b"]"#.to_owned()),
            ..Default::default()
        };
        assert_eq!(tag.allowed_value_list(), vec!["a", "b"]);
        assert!(Tag::default().allowed_value_list().is_empty());
    }

    #[test]
    fn network_policy_ips_works() {
        let d = NetworkPolicyDescription {
            name: "ALLOWED_IP_LIST".to_owned(),
            value: Some("192.168.0.100,192.168.0.101".to_owned()),
        };
        assert_eq!(d.ips(), vec!["192.168.0.100", "192.168.0.101"]);
    }
}
