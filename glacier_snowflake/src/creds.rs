use std::fmt;

use anyhow::{bail, Result};
use glacier_core::config::{connections_cfg_path, fetch_connection};
use glacier_core::ConnectionConfig;
use serde::Deserialize;

/// Credentials for authenticating to Snowflake with a key pair.
#[derive(Deserialize, Default, Clone)]
pub struct SnowflakeCredentials {
    pub account: String,
    pub role: String,
    pub user: String,
    pub warehouse: String,
    pub private_key: String,
    pub public_key_fp: String,
    pub url: Option<String>,
}

impl SnowflakeCredentials {
    /// Perform simple field validation to catch bad input.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("account", &self.account),
            ("role", &self.role),
            ("user", &self.user),
            ("warehouse", &self.warehouse),
            ("private_key", &self.private_key),
            ("public_key_fp", &self.public_key_fp),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            bail!(
                "Credentials are missing. Please make sure your connections.yaml file is correct. Missing: {}",
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Load a named connection from `~/.glacier/connections.yaml`.
    pub fn from_default_connections(name: &str) -> Result<Self> {
        let path = connections_cfg_path()?;
        let creds = Self::from(fetch_connection(path, name)?);
        creds.validate()?;
        Ok(creds)
    }
}

impl From<ConnectionConfig> for SnowflakeCredentials {
    fn from(config: ConnectionConfig) -> Self {
        Self {
            account: config.account,
            role: config.role,
            user: config.user,
            warehouse: config.warehouse,
            private_key: config.private_key,
            public_key_fp: config.public_key_fp,
            url: config.url,
        }
    }
}

// Keep the private key out of logs.
impl fmt::Debug for SnowflakeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeCredentials")
            .field("account", &self.account)
            .field("role", &self.role)
            .field("user", &self.user)
            .field("warehouse", &self.warehouse)
            .field("public_key_fp", &self.public_key_fp)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_connection_config_works() -> Result<()> {
        let creds = SnowflakeCredentials::from(ConnectionConfig {
            account: "acct".to_owned(),
            role: "role".to_owned(),
            user: "user".to_owned(),
            warehouse: "wh".to_owned(),
            private_key: "key".to_owned(),
            public_key_fp: "fp".to_owned(),
            url: None,
        });
        creds.validate()?;
        assert_eq!(creds.account, "acct");
        Ok(())
    }

    #[test]
    fn validate_names_missing_fields() {
        let creds = SnowflakeCredentials {
            account: "acct".to_owned(),
            ..Default::default()
        };
        let err = creds.validate().unwrap_err().to_string();
        assert!(err.contains("role, user, warehouse, private_key, public_key_fp"));
        assert!(!err.contains("account,"));
    }

    #[test]
    fn debug_hides_private_key() {
        let creds = SnowflakeCredentials {
            private_key: "SECRET".to_owned(),
            ..Default::default()
        };
        assert!(!format!("{creds:?}").contains("SECRET"));
    }
}
