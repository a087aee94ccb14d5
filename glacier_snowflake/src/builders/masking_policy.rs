use crate::sql::escape_string;

use super::schema_object;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskingPolicyBuilder {
    name: String,
    db: String,
    schema: String,
    replace: bool,
    value_data_type: String,
    masking_expression: String,
    return_data_type: String,
    comment: Option<String>,
}

schema_object!(MaskingPolicyBuilder, "MASKING POLICY", "MASKING POLICIES");

impl MaskingPolicyBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_or_replace(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn with_value_data_type(mut self, data_type: &str) -> Self {
        self.value_data_type = data_type.to_owned();
        self
    }

    /// The policy body. Newlines are kept as given.
    pub fn with_masking_expression(mut self, expression: &str) -> Self {
        self.masking_expression = expression.to_owned();
        self
    }

    pub fn with_return_data_type(mut self, data_type: &str) -> Self {
        self.return_data_type = data_type.to_owned();
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> String {
        let mut q = String::from("CREATE");
        if self.replace {
            q.push_str(" OR REPLACE");
        }
        q.push_str(&format!(
            " MASKING POLICY {} AS (VAL {}) RETURNS {} -> {}",
            self.qualified_name(),
            self.value_data_type,
            self.return_data_type,
            self.masking_expression
        ));
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn change_masking_expression(&self, expression: &str) -> String {
        format!(
            "ALTER MASKING POLICY {} SET BODY -> {expression}",
            self.qualified_name()
        )
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE MASKING POLICY {}", self.qualified_name())
    }
}
