use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, ObjectIdentifier, SchemaObjectIdentifier};

use super::schema_object;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamBuilder {
    name: String,
    db: String,
    schema: String,
    on_table: Option<String>,
    append_only: bool,
    show_initial_rows: bool,
    comment: Option<String>,
}

schema_object!(StreamBuilder, "STREAM", "STREAMS");

impl StreamBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    /// The source table as `db.schema.table`; quoted parts are accepted.
    pub fn with_on_table(mut self, table: &str) -> Self {
        self.on_table = Some(table.to_owned());
        self
    }

    pub fn with_append_only(mut self, append_only: bool) -> Self {
        self.append_only = append_only;
        self
    }

    pub fn with_show_initial_rows(mut self, show: bool) -> Self {
        self.show_initial_rows = show;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> BuildResult<String> {
        let table = self.on_table.as_ref().ok_or(BuilderError::MissingClause {
            kind: "stream",
            clause: "ON TABLE",
        })?;
        let table = table
            .parse::<SchemaObjectIdentifier>()
            .map(|id| id.full_name())
            .unwrap_or_else(|_| table.clone());

        let mut q = format!("CREATE STREAM {} ON TABLE {table}", self.qualified_name());
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&format!(
            " APPEND_ONLY = {} SHOW_INITIAL_ROWS = {}",
            self.append_only, self.show_initial_rows
        ));
        Ok(q)
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE STREAM {}", self.qualified_name())
    }
}
