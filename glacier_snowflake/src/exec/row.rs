use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// One result row, keyed by column name.
///
/// Every Snowflake value arrives as a nullable string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    columns: HashMap<String, Option<String>>,
}

impl Row {
    pub fn new(columns: HashMap<String, Option<String>>) -> Self {
        Self { columns }
    }

    /// Build a row by zipping column names with values.
    pub fn from_parts(names: &[String], values: Vec<Option<String>>) -> Self {
        Self {
            columns: names.iter().cloned().zip(values).collect(),
        }
    }

    /// The value of a column. Missing columns and NULLs are both `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Deserialize the row into a record. Columns the record does not name
    /// are ignored.
    pub fn scan<T: DeserializeOwned>(&self) -> Result<T> {
        let object: Map<String, JsonValue> = self
            .columns
            .iter()
            .map(|(k, v)| {
                (
                    k.to_owned(),
                    v.as_ref()
                        .map(|s| JsonValue::String(s.to_owned()))
                        .unwrap_or(JsonValue::Null),
                )
            })
            .collect();
        serde_json::from_value(JsonValue::Object(object)).context("failed to scan row")
    }
}

/// Every row of a result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rows(Vec<Row>);

impl Rows {
    pub fn new(rows: Vec<Row>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.0.iter()
    }

    /// Deserialize every row into a record.
    pub fn scan_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.0.iter().map(Row::scan).collect()
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::*;
    use crate::entry_types::{Grant, PropertyRow, Role, Schema};

    #[test]
    fn scan_ignores_unknown_columns() -> Result<()> {
        let row = Row::new(hashmap! {
            "name".to_owned() => Some("ANALYTICS".to_owned()),
            "database_name".to_owned() => Some("DB".to_owned()),
            "options".to_owned() => Some("MANAGED ACCESS".to_owned()),
            "retention_time".to_owned() => Some("1".to_owned()),
            "something_else".to_owned() => Some("x".to_owned()),
        });
        let schema: Schema = row.scan()?;
        assert_eq!(schema.name, "ANALYTICS");
        assert!(schema.is_managed());
        assert!(!schema.is_transient());
        assert_eq!(schema.retention_time, Some(1));
        Ok(())
    }

    #[test]
    fn scan_unquotes_role_names() -> Result<()> {
        let row = Row::from_parts(
            &["name".to_owned(), "comment".to_owned()],
            vec![Some("\"my role\"".to_owned()), None],
        );
        let role: Role = row.scan()?;
        assert_eq!(role.name.0, "my role");
        assert_eq!(role.comment, None);
        Ok(())
    }

    #[test]
    fn scan_accepts_yes_no_booleans() -> Result<()> {
        let row = Row::new(hashmap! {
            "privilege".to_owned() => Some("USAGE".to_owned()),
            "granted_on".to_owned() => Some("DATABASE".to_owned()),
            "name".to_owned() => Some("DB".to_owned()),
            "grantee_name".to_owned() => Some("ANALYST".to_owned()),
            "grant_option".to_owned() => Some("N".to_owned()),
        });
        let grant: Grant = row.scan()?;
        assert_eq!(grant.grant_option, Some(false));
        Ok(())
    }

    #[test]
    fn scan_rejects_garbage_booleans() {
        let row = Row::new(hashmap! {
            "privilege".to_owned() => Some("USAGE".to_owned()),
            "granted_on".to_owned() => Some("DATABASE".to_owned()),
            "name".to_owned() => Some("DB".to_owned()),
            "grantee_name".to_owned() => Some("ANALYST".to_owned()),
            "grant_option".to_owned() => Some("perhaps".to_owned()),
        });
        assert!(row.scan::<Grant>().is_err());
    }

    #[test]
    fn scan_all_works() -> Result<()> {
        let names = vec!["property".to_owned(), "value".to_owned()];
        let rows = Rows::new(vec![
            Row::from_parts(&names, vec![Some("A".to_owned()), Some("1".to_owned())]),
            Row::from_parts(&names, vec![Some("B".to_owned()), None]),
        ]);
        let props: Vec<PropertyRow> = rows.scan_all()?;
        assert_eq!(props.len(), 2);
        assert_eq!(props[1].property, "B");
        assert_eq!(props[1].value, None);
        Ok(())
    }

    #[test]
    fn get_works() {
        let row = Row::new(hashmap! {
            "status".to_owned() => Some("ok".to_owned()),
            "missing".to_owned() => None,
        });
        assert_eq!(row.get("status"), Some("ok"));
        assert_eq!(row.get("missing"), None);
        assert!(row.contains("missing"));
        assert_eq!(row.get("nope"), None);
    }
}
