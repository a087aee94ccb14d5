use derive_new::new;

use crate::sql::{escape_string, quote_ident};

use super::{schema_object, with_tag_clause, TagValue};

/// A virtual column computed from the staged file's `VALUE`.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct ExternalTableColumn {
    pub name: String,
    pub column_type: String,
    pub expression: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalTableBuilder {
    name: String,
    db: String,
    schema: String,
    columns: Vec<ExternalTableColumn>,
    partition_by: Vec<String>,
    location: String,
    refresh_on_create: bool,
    auto_refresh: bool,
    pattern: Option<String>,
    file_format: String,
    aws_sns_topic: Option<String>,
    comment: Option<String>,
    tags: Vec<TagValue>,
}

schema_object!(ExternalTableBuilder, "EXTERNAL TABLE", "EXTERNAL TABLES");

impl ExternalTableBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            refresh_on_create: true,
            auto_refresh: true,
            ..Default::default()
        }
    }

    pub fn with_columns(mut self, columns: Vec<ExternalTableColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_partition_by(mut self, partition_by: Vec<String>) -> Self {
        self.partition_by = partition_by;
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_owned();
        self
    }

    pub fn with_refresh_on_create(mut self, refresh: bool) -> Self {
        self.refresh_on_create = refresh;
        self
    }

    pub fn with_auto_refresh(mut self, refresh: bool) -> Self {
        self.auto_refresh = refresh;
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_owned());
        self
    }

    /// The body of `FILE_FORMAT = ( ... )`.
    pub fn with_file_format(mut self, file_format: &str) -> Self {
        self.file_format = file_format.to_owned();
        self
    }

    pub fn with_aws_sns_topic(mut self, topic: &str) -> Self {
        self.aws_sns_topic = Some(topic.to_owned());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagValue>) -> Self {
        self.tags = tags;
        self
    }

    pub fn create(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {} AS {}", quote_ident(&c.name), c.column_type, c.expression))
            .collect::<Vec<_>>()
            .join(", ");
        let mut q = format!("CREATE EXTERNAL TABLE {} ({columns})", self.qualified_name());
        if !self.partition_by.is_empty() {
            q.push_str(&format!(" PARTITION BY ({})", self.partition_by.join(", ")));
        }
        q.push_str(&format!(" WITH LOCATION = {}", self.location));
        q.push_str(&format!(
            " REFRESH_ON_CREATE = {}",
            self.refresh_on_create.to_string().to_uppercase()
        ));
        q.push_str(&format!(
            " AUTO_REFRESH = {}",
            self.auto_refresh.to_string().to_uppercase()
        ));
        if let Some(pattern) = &self.pattern {
            q.push_str(&format!(" PATTERN = '{}'", escape_string(pattern)));
        }
        q.push_str(&format!(" FILE_FORMAT = ( {} )", self.file_format));
        if let Some(topic) = &self.aws_sns_topic {
            q.push_str(&format!(" AWS_SNS_TOPIC = '{}'", escape_string(topic)));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q
    }

    pub fn refresh(&self) -> String {
        format!("ALTER EXTERNAL TABLE {} REFRESH", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE EXTERNAL TABLE {}", self.qualified_name())
    }
}
