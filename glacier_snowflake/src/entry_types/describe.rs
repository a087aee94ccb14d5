use serde::Deserialize;

/// One row of a generic `DESCRIBE` result.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct PropertyRow {
    pub property: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
