use crate::sql::{escape_string, format_string_list};

use super::{schema_object, system_functions, TagValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBuilder {
    name: String,
    db: String,
    schema: String,
    allowed_values: Vec<String>,
    comment: Option<String>,
}

schema_object!(TagBuilder, "TAG", "TAGS");

fn value_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", escape_string(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TagBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values = values;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> String {
        let mut q = format!("CREATE TAG {}", self.qualified_name());
        if !self.allowed_values.is_empty() {
            q.push_str(&format!(" ALLOWED_VALUES {}", value_list(&self.allowed_values)));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn undrop(&self) -> String {
        format!("UNDROP TAG {}", self.qualified_name())
    }

    pub fn add_allowed_values(&self, values: &[String]) -> String {
        format!(
            "ALTER TAG {} ADD ALLOWED_VALUES {}",
            self.qualified_name(),
            value_list(values)
        )
    }

    pub fn drop_allowed_values(&self, values: &[String]) -> String {
        format!(
            "ALTER TAG {} DROP ALLOWED_VALUES {}",
            self.qualified_name(),
            value_list(values)
        )
    }

    pub fn remove_allowed_values(&self) -> String {
        format!("ALTER TAG {} UNSET ALLOWED_VALUES", self.qualified_name())
    }

    pub fn add_masking_policy(&self, policy: &str) -> String {
        format!(
            "ALTER TAG {} SET MASKING POLICY {policy}",
            self.qualified_name()
        )
    }

    pub fn remove_masking_policy(&self, policy: &str) -> String {
        format!(
            "ALTER TAG {} UNSET MASKING POLICY {policy}",
            self.qualified_name()
        )
    }

    /// Allowed values as a literal list, as shown by `SHOW TAGS`.
    pub fn allowed_values_literal(&self) -> String {
        format_string_list(&self.allowed_values)
    }
}

/// Attaches a tag value to an arbitrary object, or to a column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssociationBuilder {
    tag: TagValue,
    object_type: String,
    object_identifier: String,
    column: Option<String>,
}

impl TagAssociationBuilder {
    /// `object_type` is the ALTER keyword (`TABLE`, `WAREHOUSE`, ...) and
    /// `object_identifier` the already-quoted target.
    pub fn new(tag: TagValue, object_type: &str, object_identifier: &str) -> Self {
        Self {
            tag,
            object_type: object_type.to_uppercase(),
            object_identifier: object_identifier.to_owned(),
            column: None,
        }
    }

    /// Target a column of the table given as the object identifier.
    pub fn on_column(mut self, column: &str) -> Self {
        self.column = Some(column.to_owned());
        self
    }

    fn target(&self) -> String {
        match &self.column {
            Some(column) => format!(
                "ALTER TABLE {} MODIFY COLUMN {column}",
                self.object_identifier
            ),
            None => format!("ALTER {} {}", self.object_type, self.object_identifier),
        }
    }

    pub fn create(&self) -> String {
        format!("{} SET TAG {}", self.target(), self.tag.assignment())
    }

    pub fn change_value(&self, value: &str) -> String {
        let mut tag = self.tag.clone();
        tag.value = value.to_owned();
        format!("{} SET TAG {}", self.target(), tag.assignment())
    }

    pub fn drop(&self) -> String {
        format!("{} UNSET TAG {}", self.target(), self.tag.qualified_name())
    }

    pub fn show(&self) -> String {
        let (object, domain) = match &self.column {
            Some(column) => (
                format!("{}.{column}", self.object_identifier),
                "COLUMN".to_owned(),
            ),
            None => (self.object_identifier.clone(), self.object_type.clone()),
        };
        system_functions::get_tag(&self.tag.qualified_name(), &object, &domain)
    }
}
