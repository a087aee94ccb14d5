use std::collections::HashMap;

use serde::Deserialize;

use super::{deserialize_opt_bool, deserialize_opt_int};

/// Snowflake Stage entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Stage {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub has_credentials: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub has_encryption_key: Option<bool>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub storage_integration: Option<String>,
}

/// One row of `DESCRIBE STAGE`.
#[derive(Clone, Default, Deserialize, Debug, PartialEq, Eq)]
pub struct StageProperty {
    pub parent_property: String,
    pub property: String,
    #[serde(default)]
    pub property_value: Option<String>,
}

/// `DESCRIBE STAGE` output folded into the clauses a stage is created with.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct StageDescription {
    pub url: Option<String>,
    pub aws_external_id: Option<String>,
    pub snowflake_iam_user: Option<String>,
    /// `KEY = VALUE` pairs from the STAGE_FILE_FORMAT group.
    pub file_format: Option<String>,
    /// `KEY = VALUE` pairs from the STAGE_COPY_OPTIONS group.
    pub copy_options: Option<String>,
    pub directory: Option<String>,
}

impl StageDescription {
    pub fn from_rows(rows: &[StageProperty]) -> Self {
        let mut groups: HashMap<&str, Vec<String>> = HashMap::new();
        let mut description = StageDescription::default();

        for row in rows {
            let value = row.property_value.clone().unwrap_or_default();
            match (row.parent_property.as_str(), row.property.as_str()) {
                ("STAGE_LOCATION", "URL") => {
                    description.url = Some(
                        value
                            .trim_start_matches(['[', '"'])
                            .trim_end_matches([']', '"'])
                            .to_owned(),
                    )
                }
                ("STAGE_INTEGRATION", "AWS_EXTERNAL_ID")
                | ("STAGE_CREDENTIALS", "AWS_EXTERNAL_ID") => {
                    description.aws_external_id = Some(value)
                }
                ("STAGE_INTEGRATION", "SNOWFLAKE_IAM_USER")
                | ("STAGE_CREDENTIALS", "SNOWFLAKE_IAM_USER") => {
                    description.snowflake_iam_user = Some(value)
                }
                (group @ ("STAGE_FILE_FORMAT" | "STAGE_COPY_OPTIONS" | "DIRECTORY"), key) => {
                    // An empty list means the option is unset.
                    if value.is_empty() || value == "[]" {
                        continue;
                    }
                    let value = match value.as_str() {
                        "true" | "false" => value.to_uppercase(),
                        v if v.parse::<f64>().is_ok() => value,
                        v if v.starts_with('[') => v.replace('[', "(").replace(']', ")"),
                        _ => format!("'{value}'"),
                    };
                    groups.entry(group).or_default().push(format!("{key} = {value}"));
                }
                _ => (),
            }
        }

        description.file_format = groups.remove("STAGE_FILE_FORMAT").map(|g| g.join(" "));
        description.copy_options = groups.remove("STAGE_COPY_OPTIONS").map(|g| g.join(" "));
        description.directory = groups.remove("DIRECTORY").map(|g| g.join(" "));
        description
    }
}

/// Snowflake File Format entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct FileFormat {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default, rename = "type")]
    pub format_type: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// JSON document holding every format option.
    #[serde(default)]
    pub format_options: Option<String>,
}

/// Snowflake Pipe entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Pipe {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub notification_channel: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub integration: Option<String>,
    #[serde(default)]
    pub error_integration: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub pattern_count: Option<i64>,
}
