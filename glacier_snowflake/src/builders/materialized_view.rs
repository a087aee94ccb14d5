use crate::sql::{escape_string, quote_ident};

use super::{schema_object, with_tag_clause, TagValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializedViewBuilder {
    name: String,
    db: String,
    schema: String,
    warehouse: String,
    secure: bool,
    replace: bool,
    comment: Option<String>,
    statement: String,
    tags: Vec<TagValue>,
}

schema_object!(
    MaterializedViewBuilder,
    "MATERIALIZED VIEW",
    "MATERIALIZED VIEWS"
);

impl MaterializedViewBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_db(mut self, db: &str) -> Self {
        self.db = db.to_owned();
        self
    }

    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_owned();
        self
    }

    pub fn with_warehouse(mut self, warehouse: &str) -> Self {
        self.warehouse = warehouse.to_owned();
        self
    }

    pub fn with_secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn with_replace(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_statement(mut self, statement: &str) -> Self {
        self.statement = statement.to_owned();
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagValue>) -> Self {
        self.tags = tags;
        self
    }

    /// The warehouse switch followed by the CREATE. Run them in order in
    /// the same session.
    pub fn create(&self) -> Vec<String> {
        let mut q = String::from("CREATE");
        if self.replace {
            q.push_str(" OR REPLACE");
        }
        if self.secure {
            q.push_str(" SECURE");
        }
        q.push_str(&format!(" MATERIALIZED VIEW {}", self.qualified_name()));
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q.push_str(&format!(" AS {}", self.statement));

        vec![format!("USE WAREHOUSE {}", quote_ident(&self.warehouse)), q]
    }

    pub fn secure(&self) -> String {
        format!("ALTER MATERIALIZED VIEW {} SET SECURE", self.qualified_name())
    }

    pub fn unsecure(&self) -> String {
        format!("ALTER MATERIALIZED VIEW {} UNSET SECURE", self.qualified_name())
    }

    pub fn suspend(&self) -> String {
        format!("ALTER MATERIALIZED VIEW {} SUSPEND", self.qualified_name())
    }

    pub fn resume(&self) -> String {
        format!("ALTER MATERIALIZED VIEW {} RESUME", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE MATERIALIZED VIEW {}", self.qualified_name())
    }
}
