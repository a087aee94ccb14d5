use serde::Deserialize;

use super::{deserialize_opt_bool, deserialize_opt_int};

/// Snowflake user-defined Function entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub catalog_name: Option<String>,
    /// Signature and return type, e.g. `ADD(NUMBER, NUMBER) RETURN NUMBER`.
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_secure: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_external_function: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub min_num_arguments: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub max_num_arguments: Option<i64>,
}

impl Function {
    /// The argument types from [`Function::arguments`].
    pub fn argument_types(&self) -> Vec<String> {
        argument_types(self.arguments.as_deref())
    }
}

/// Snowflake Stored Procedure entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Procedure {
    pub name: String,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub catalog_name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_secure: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub min_num_arguments: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub max_num_arguments: Option<i64>,
}

impl Procedure {
    pub fn argument_types(&self) -> Vec<String> {
        argument_types(self.arguments.as_deref())
    }
}

/// Snowflake External Function entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct ExternalFunction {
    pub name: String,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub catalog_name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_secure: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_external_function: Option<bool>,
}

/// Pull the argument types out of `NAME(T1, T2) RETURN R`.
fn argument_types(arguments: Option<&str>) -> Vec<String> {
    let Some(arguments) = arguments else {
        return vec![];
    };
    let start = arguments.find('(').map(|i| i + 1).unwrap_or_default();
    let end = arguments.rfind(')').unwrap_or(arguments.len());
    if start >= end {
        return vec![];
    }
    arguments[start..end]
        .split(',')
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Snowflake Task entry.
#[derive(Clone, Default, Deserialize, Debug, PartialEq)]
pub struct Task {
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    /// JSON array of predecessor task names.
    #[serde(default)]
    pub predecessors: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub allow_overlapping_execution: Option<bool>,
}

impl Task {
    pub fn is_started(&self) -> bool {
        self.state.as_deref() == Some("started")
    }

    /// Predecessor names, with the surrounding JSON array and quotes removed.
    pub fn predecessor_names(&self) -> Vec<String> {
        let Some(raw) = self.predecessors.as_deref() else {
            return vec![];
        };
        serde_json::from_str::<Vec<String>>(raw)
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.rsplit('.').next().unwrap_or(p.as_str()).trim_matches('"').to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_types_works() {
        let f = Function {
            name: "ADD".to_owned(),
            arguments: Some("ADD(NUMBER, VARCHAR) RETURN NUMBER".to_owned()),
            ..Default::default()
        };
        assert_eq!(f.argument_types(), vec!["NUMBER", "VARCHAR"]);
    }

    #[test]
    fn argument_types_without_arguments_is_empty() {
        let p = Procedure {
            name: "P".to_owned(),
            arguments: Some("P() RETURN VARCHAR".to_owned()),
            ..Default::default()
        };
        assert!(p.argument_types().is_empty());
    }

    #[test]
    fn predecessor_names_works() {
        let t = Task {
            name: "child".to_owned(),
            predecessors: Some(r#"["\"DB\".\"S\".\"PARENT\""]"#.to_owned()),
            ..Default::default()
        };
        assert_eq!(t.predecessor_names(), vec!["PARENT"]);
    }
}
