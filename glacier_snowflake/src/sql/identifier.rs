//! Typed identifiers and identifier validation.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use super::escape::quote_ident;

/// Problems found by [`validate_identifier`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier must be between 1 and 256 characters, got {0}")]
    Length(usize),
    #[error("'{0}' can only start with an alphabetic character, an underscore or a dash")]
    InvalidStart(String),
    #[error("'{identifier}' contains invalid character '{character}'")]
    InvalidCharacter { identifier: String, character: char },
}

/// Check a bare identifier against Snowflake's naming rules.
///
/// Identifiers are 1 to 256 characters long, start with a letter, `_` or `-`,
/// and continue with alphanumerics, `_`, `-`, `$` or any character listed in
/// `exclusions`. Quoted identifiers in rendered SQL are not held to this.
pub fn validate_identifier(s: &str, exclusions: &[char]) -> Vec<IdentifierError> {
    let length = s.chars().count();
    if length == 0 || length > 256 {
        return vec![IdentifierError::Length(length)];
    }

    let mut errors = vec![];
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        if !(first.is_alphabetic() || first == '_' || first == '-') {
            errors.push(IdentifierError::InvalidStart(s.to_owned()));
        }
    }
    for c in chars {
        if !(c.is_alphanumeric() || matches!(c, '_' | '-' | '$') || exclusions.contains(&c)) {
            errors.push(IdentifierError::InvalidCharacter {
                identifier: s.to_owned(),
                character: c,
            });
        }
    }
    errors
}

/// Common behavior of the typed identifiers.
pub trait ObjectIdentifier {
    /// The last (object) part of the identifier.
    fn name(&self) -> &str;
    /// Every part double-quoted and joined by `.`.
    fn full_name(&self) -> String;
}

/// An object that lives directly in the account (warehouse, role, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccountObjectIdentifier {
    pub name: String,
}

/// An object that lives inside a database (schema, database role).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DatabaseObjectIdentifier {
    pub database: String,
    pub name: String,
}

/// An object that lives inside a schema (table, view, policy, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaObjectIdentifier {
    pub database: String,
    pub schema: String,
    pub name: String,
}

/// A column on a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableColumnIdentifier {
    pub database: String,
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl DatabaseObjectIdentifier {
    pub fn new(database: &str, name: &str) -> Self {
        Self {
            database: database.to_owned(),
            name: name.to_owned(),
        }
    }
}

impl SchemaObjectIdentifier {
    pub fn new(database: &str, schema: &str, name: &str) -> Self {
        Self {
            database: database.to_owned(),
            schema: schema.to_owned(),
            name: name.to_owned(),
        }
    }

    /// The parts joined by `.` without any quoting.
    pub fn bare_name(&self) -> String {
        format!("{}.{}.{}", self.database, self.schema, self.name)
    }

    /// The identifier of the schema holding this object.
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database, &self.schema)
    }
}

impl TableColumnIdentifier {
    pub fn new(database: &str, schema: &str, table: &str, column: &str) -> Self {
        Self {
            database: database.to_owned(),
            schema: schema.to_owned(),
            table: table.to_owned(),
            column: column.to_owned(),
        }
    }

    /// The identifier of the table holding this column.
    pub fn table_id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database, &self.schema, &self.table)
    }
}

/// Quote and join parts, keeping empty parts as positional gaps.
fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| if p.is_empty() { String::new() } else { quote_ident(p) })
        .collect::<Vec<_>>()
        .join(".")
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> String {
        join_parts(&[&self.name])
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> String {
        join_parts(&[&self.database, &self.name])
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> String {
        join_parts(&[&self.database, &self.schema, &self.name])
    }
}

impl ObjectIdentifier for TableColumnIdentifier {
    fn name(&self) -> &str {
        &self.column
    }

    fn full_name(&self) -> String {
        join_parts(&[&self.database, &self.schema, &self.table, &self.column])
    }
}

/// Split a dotted identifier, honoring double-quoted parts.
///
/// `"my.db".PUBLIC."t"` splits into `my.db`, `PUBLIC`, `t`. Doubled quotes
/// inside a quoted part collapse to one.
fn split_parts(s: &str) -> anyhow::Result<Vec<String>> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    if in_quotes {
        anyhow::bail!("unterminated quote in identifier {s}");
    }
    parts.push(current);
    Ok(parts)
}

macro_rules! impl_from_str {
    ($id:ident, $count:literal, |$parts:ident| $build:expr) => {
        impl FromStr for $id {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let $parts = split_parts(s)?;
                if $parts.len() != $count {
                    anyhow::bail!(
                        "expected {} dot-separated parts in {}, found {}",
                        $count,
                        s,
                        $parts.len()
                    );
                }
                Ok($build)
            }
        }

        impl Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.full_name())
            }
        }
    };
}

impl_from_str!(AccountObjectIdentifier, 1, |parts| AccountObjectIdentifier::new(
    &parts[0]
));
impl_from_str!(DatabaseObjectIdentifier, 2, |parts| {
    DatabaseObjectIdentifier::new(&parts[0], &parts[1])
});
impl_from_str!(SchemaObjectIdentifier, 3, |parts| {
    SchemaObjectIdentifier::new(&parts[0], &parts[1], &parts[2])
});
impl_from_str!(TableColumnIdentifier, 4, |parts| {
    TableColumnIdentifier::new(&parts[0], &parts[1], &parts[2], &parts[3])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers_pass() {
        let long = "x".repeat(256);
        for id in ["a", "_private", "-dash", "Table_1$", "ünïcode", long.as_str()] {
            assert_eq!(validate_identifier(id, &[]), vec![], "{id}");
        }
    }

    #[test]
    fn length_is_enforced() {
        assert_eq!(validate_identifier("", &[]), vec![IdentifierError::Length(0)]);
        assert_eq!(
            validate_identifier(&"x".repeat(257), &[]),
            vec![IdentifierError::Length(257)]
        );
    }

    #[test]
    fn bad_start_is_rejected() {
        assert_eq!(
            validate_identifier("1abc", &[]),
            vec![IdentifierError::InvalidStart("1abc".to_owned())]
        );
        assert_eq!(validate_identifier("$abc", &[]).len(), 1);
    }

    #[test]
    fn exclusions_allow_extra_characters() {
        assert_eq!(validate_identifier("a.b", &[]).len(), 1);
        assert_eq!(validate_identifier("a.b", &['.']), vec![]);
        assert_eq!(
            validate_identifier("a b", &['.']),
            vec![IdentifierError::InvalidCharacter {
                identifier: "a b".to_owned(),
                character: ' '
            }]
        );
    }

    #[test]
    fn parse_schema_object_identifier() -> anyhow::Result<()> {
        let id: SchemaObjectIdentifier = r#""my.db".PUBLIC."ta""ble""#.parse()?;
        assert_eq!(id, SchemaObjectIdentifier::new("my.db", "PUBLIC", r#"ta"ble"#));
        assert_eq!(id.full_name(), r#""my.db"."PUBLIC"."ta""ble""#);
        Ok(())
    }

    #[test]
    fn parse_rejects_wrong_part_count() {
        assert!("a.b".parse::<SchemaObjectIdentifier>().is_err());
        assert!(r#""unterminated"#.parse::<AccountObjectIdentifier>().is_err());
    }

    #[test]
    fn empty_parts_keep_position() {
        let id = SchemaObjectIdentifier::new("db", "", "t");
        assert_eq!(id.full_name(), r#""db".."t""#);
        let col = TableColumnIdentifier::new("db", "s", "t", "c");
        assert_eq!(col.to_string(), r#""db"."s"."t"."c""#);
        assert_eq!(col.table_id().bare_name(), "db.s.t");
    }
}
