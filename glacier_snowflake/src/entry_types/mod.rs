//! Records for the rows returned by `SHOW` and `DESCRIBE` statements.
//!
//! Every column comes back from Snowflake as a nullable string, so typed
//! fields go through the deserializers in this module.

mod account;
mod database;
mod describe;
mod grant;
mod policy;
mod routine;
mod stage;
mod table;
mod warehouse;

pub use account::{Account, FailoverGroup, Integration, ManagedAccount, Role, RoleName, Share, User};
pub use database::{Database, Schema};
pub use describe::PropertyRow;
pub use grant::{FutureGrant, Grant, RoleGrant};
pub use policy::{
    MaskingPolicy, NetworkPolicy, NetworkPolicyDescription, RowAccessPolicy, Tag,
};
pub use routine::{ExternalFunction, Function, Procedure, Task};
pub use stage::{FileFormat, Pipe, Stage, StageDescription, StageProperty};
pub use table::{ExternalTable, MaterializedView, Sequence, Stream, Table, View};
pub use warehouse::{ResourceMonitor, Warehouse};

use serde::{de, Deserialize, Deserializer};

/// Parse `true`/`false` or `Y`/`N`, case-insensitively.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "y" | "yes" => Some(true),
        "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

pub(crate) fn deserialize_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_bool(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("not a boolean: {s}"))),
    }
}

pub(crate) fn deserialize_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("not an integer: {s}"))),
    }
}

pub(crate) fn deserialize_opt_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("not a number: {s}"))),
    }
}

/// Snowflake quotes role names that need it. Strip one layer of quotes.
pub(crate) fn strip_quotes_and_deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(strip_quotes(&s))
}

pub(crate) fn strip_quotes(s: &str) -> String {
    match s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => s.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_both_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("Y"), Some(true));
        assert_eq!(parse_bool("n"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_quotes("\"my role\""), "my role");
        assert_eq!(strip_quotes("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(strip_quotes("PLAIN"), "PLAIN");
    }
}
