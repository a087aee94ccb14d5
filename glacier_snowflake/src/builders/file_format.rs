//! Named file formats.
//!
//! Each option is only valid for some format types; the table below drives
//! both emission order and validation.

use std::collections::HashMap;
use std::fmt::Display;

use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, format_string_list, sorted_keys};

use super::schema_object;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    Csv,
    Json,
    Avro,
    Orc,
    Parquet,
    Xml,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = match self {
            FormatType::Csv => "CSV",
            FormatType::Json => "JSON",
            FormatType::Avro => "AVRO",
            FormatType::Orc => "ORC",
            FormatType::Parquet => "PARQUET",
            FormatType::Xml => "XML",
        };
        write!(f, "{t}")
    }
}

impl std::str::FromStr for FormatType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "CSV" => FormatType::Csv,
            "JSON" => FormatType::Json,
            "AVRO" => FormatType::Avro,
            "ORC" => FormatType::Orc,
            "PARQUET" => FormatType::Parquet,
            "XML" => FormatType::Xml,
            _ => {
                return Err(BuilderError::InvalidField {
                    field: "TYPE".to_owned(),
                    value: s.to_owned(),
                })
            }
        })
    }
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOption {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

impl Display for FormatOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatOption::Str(s) => write!(f, "'{}'", escape_string(s)),
            FormatOption::Bool(b) => write!(f, "{}", b.to_string().to_uppercase()),
            FormatOption::Int(i) => write!(f, "{i}"),
            FormatOption::List(l) => write!(f, "{}", format_string_list(l)),
        }
    }
}

use FormatType::*;

/// Options in emission order, with the types that accept them.
const OPTIONS: &[(&str, &[FormatType])] = &[
    ("COMPRESSION", &[Csv, Json, Avro, Parquet, Xml]),
    ("RECORD_DELIMITER", &[Csv]),
    ("FIELD_DELIMITER", &[Csv]),
    ("FILE_EXTENSION", &[Csv, Json]),
    ("SKIP_HEADER", &[Csv]),
    ("SKIP_BLANK_LINES", &[Csv]),
    ("DATE_FORMAT", &[Csv, Json]),
    ("TIME_FORMAT", &[Csv, Json]),
    ("TIMESTAMP_FORMAT", &[Csv, Json]),
    ("BINARY_FORMAT", &[Csv, Json]),
    ("ESCAPE", &[Csv]),
    ("ESCAPE_UNENCLOSED_FIELD", &[Csv]),
    ("TRIM_SPACE", &[Csv, Avro, Orc, Parquet]),
    ("FIELD_OPTIONALLY_ENCLOSED_BY", &[Csv]),
    ("NULL_IF", &[Csv, Json, Avro, Orc, Parquet]),
    ("ERROR_ON_COLUMN_COUNT_MISMATCH", &[Csv]),
    ("REPLACE_INVALID_CHARACTERS", &[Csv, Json, Avro, Orc, Parquet]),
    ("EMPTY_FIELD_AS_NULL", &[Csv]),
    ("SKIP_BYTE_ORDER_MARK", &[Csv, Xml]),
    ("ENCODING", &[Csv]),
    ("ENABLE_OCTAL", &[Json]),
    ("ALLOW_DUPLICATE", &[Json]),
    ("STRIP_OUTER_ARRAY", &[Json]),
    ("STRIP_NULL_VALUES", &[Json]),
    ("IGNORE_UTF8_ERRORS", &[Json, Xml]),
    ("BINARY_AS_TEXT", &[Parquet]),
    ("PRESERVE_SPACE", &[Xml]),
    ("STRIP_OUTER_ELEMENT", &[Xml]),
    ("DISABLE_SNOWFLAKE_DATA", &[Xml]),
    ("DISABLE_AUTO_CONVERT", &[Xml]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFormatBuilder {
    name: String,
    db: String,
    schema: String,
    format_type: FormatType,
    options: HashMap<String, FormatOption>,
    comment: Option<String>,
}

schema_object!(FileFormatBuilder, "FILE FORMAT", "FILE FORMATS");

impl FileFormatBuilder {
    pub fn new(name: &str, db: &str, schema: &str, format_type: FormatType) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            format_type,
            options: HashMap::new(),
            comment: None,
        }
    }

    /// Set any option from the table by its uppercase key.
    pub fn with_option(mut self, key: &str, value: FormatOption) -> Self {
        self.options.insert(key.to_uppercase(), value);
        self
    }

    pub fn with_compression(self, compression: &str) -> Self {
        self.with_option("COMPRESSION", FormatOption::Str(compression.to_owned()))
    }

    pub fn with_field_delimiter(self, delimiter: &str) -> Self {
        self.with_option("FIELD_DELIMITER", FormatOption::Str(delimiter.to_owned()))
    }

    pub fn with_record_delimiter(self, delimiter: &str) -> Self {
        self.with_option("RECORD_DELIMITER", FormatOption::Str(delimiter.to_owned()))
    }

    pub fn with_skip_header(self, rows: i64) -> Self {
        self.with_option("SKIP_HEADER", FormatOption::Int(rows))
    }

    pub fn with_null_if(self, values: Vec<String>) -> Self {
        self.with_option("NULL_IF", FormatOption::List(values))
    }

    pub fn with_strip_outer_array(self, strip: bool) -> Self {
        self.with_option("STRIP_OUTER_ARRAY", FormatOption::Bool(strip))
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> BuildResult<String> {
        if let Some(key) = sorted_keys(&self.options)
            .into_iter()
            .find(|k| !self.supports(k))
        {
            return Err(BuilderError::InvalidField {
                field: key.clone(),
                value: self.format_type.to_string(),
            });
        }

        let mut q = format!(
            "CREATE FILE FORMAT {} TYPE = '{}'",
            self.qualified_name(),
            self.format_type
        );
        for (key, _) in OPTIONS {
            if let Some(value) = self.options.get(*key) {
                q.push_str(&format!(" {key} = {value}"));
            } else if *key == "NULL_IF" && self.format_type != Xml {
                q.push_str(" NULL_IF = ()");
            }
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        Ok(q)
    }

    fn supports(&self, key: &str) -> bool {
        OPTIONS
            .iter()
            .any(|(k, types)| *k == key && types.contains(&self.format_type))
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE FILE FORMAT {}", self.qualified_name())
    }

    pub fn change_option(&self, key: &str, value: &FormatOption) -> BuildResult<String> {
        let key = key.to_uppercase();
        if !self.supports(&key) {
            return Err(BuilderError::InvalidField {
                field: key,
                value: self.format_type.to_string(),
            });
        }
        Ok(format!(
            "ALTER FILE FORMAT {} SET {key} = {value}",
            self.qualified_name()
        ))
    }

    pub fn remove_option(&self, key: &str) -> String {
        format!(
            "ALTER FILE FORMAT {} UNSET {}",
            self.qualified_name(),
            key.to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn csv_create_works() -> Result<()> {
        let ff = FileFormatBuilder::new("ff", "db", "s", Csv)
            .with_compression("GZIP")
            .with_field_delimiter("|")
            .with_skip_header(1)
            .with_option("EMPTY_FIELD_AS_NULL", FormatOption::Bool(true))
            .with_option("ESCAPE", FormatOption::Str("\\".into()))
            .with_comment("pipes");
        assert_eq!(
            ff.create()?,
            r#"CREATE FILE FORMAT "db"."s"."ff" TYPE = 'CSV' COMPRESSION = 'GZIP' FIELD_DELIMITER = '|' SKIP_HEADER = 1 ESCAPE = '\\' NULL_IF = () EMPTY_FIELD_AS_NULL = TRUE COMMENT = 'pipes'"#
        );
        Ok(())
    }

    #[test]
    fn json_null_if_works() -> Result<()> {
        let ff = FileFormatBuilder::new("ff", "db", "s", Json)
            .with_null_if(vec!["NULL".into(), "".into()])
            .with_strip_outer_array(true);
        assert_eq!(
            ff.create()?,
            r#"CREATE FILE FORMAT "db"."s"."ff" TYPE = 'JSON' NULL_IF = ('NULL', '') STRIP_OUTER_ARRAY = TRUE"#
        );
        Ok(())
    }

    #[test]
    fn xml_has_no_default_null_if() -> Result<()> {
        let ff = FileFormatBuilder::new("ff", "db", "s", Xml);
        assert_eq!(ff.create()?, r#"CREATE FILE FORMAT "db"."s"."ff" TYPE = 'XML'"#);
        Ok(())
    }

    #[test]
    fn unsupported_option_is_rejected() {
        let ff = FileFormatBuilder::new("ff", "db", "s", Parquet).with_skip_header(1);
        assert_eq!(
            ff.create(),
            Err(BuilderError::InvalidField {
                field: "SKIP_HEADER".into(),
                value: "PARQUET".into()
            })
        );
    }

    #[test]
    fn first_unsupported_option_is_reported_in_key_order() {
        let ff = FileFormatBuilder::new("ff", "db", "s", Parquet)
            .with_skip_header(1)
            .with_record_delimiter("\\n")
            .with_field_delimiter(",");
        assert_eq!(
            ff.create(),
            Err(BuilderError::InvalidField {
                field: "FIELD_DELIMITER".into(),
                value: "PARQUET".into()
            })
        );
    }

    #[test]
    fn alters_work() -> Result<()> {
        let ff = FileFormatBuilder::new("ff", "db", "s", Csv);
        assert_eq!(
            ff.change_option("skip_header", &FormatOption::Int(2))?,
            r#"ALTER FILE FORMAT "db"."s"."ff" SET SKIP_HEADER = 2"#
        );
        assert_eq!(
            ff.remove_option("skip_header"),
            r#"ALTER FILE FORMAT "db"."s"."ff" UNSET SKIP_HEADER"#
        );
        assert!(ff
            .change_option("BINARY_AS_TEXT", &FormatOption::Bool(true))
            .is_err());
        assert_eq!(
            ff.show(),
            r#"SHOW FILE FORMATS LIKE 'ff' IN SCHEMA "db"."s""#
        );
        Ok(())
    }

    #[test]
    fn format_type_parses() {
        assert_eq!("parquet".parse::<FormatType>(), Ok(Parquet));
        assert!("yaml".parse::<FormatType>().is_err());
    }
}
