use std::collections::HashMap;

use crate::sql::{escape_string, sorted_keys};

use super::schema_object;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAccessPolicyBuilder {
    name: String,
    db: String,
    schema: String,
    signature: HashMap<String, String>,
    expression: String,
    comment: Option<String>,
}

schema_object!(
    RowAccessPolicyBuilder,
    "ROW ACCESS POLICY",
    "ROW ACCESS POLICIES"
);

impl RowAccessPolicyBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    /// Argument name to type.
    pub fn with_signature(mut self, signature: HashMap<String, String>) -> Self {
        self.signature = signature;
        self
    }

    pub fn with_row_access_expression(mut self, expression: &str) -> Self {
        self.expression = expression.to_owned();
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> String {
        let signature = sorted_keys(&self.signature)
            .into_iter()
            .map(|k| format!("{k} {}", self.signature[k]))
            .collect::<Vec<_>>();
        let mut q = format!(
            "CREATE ROW ACCESS POLICY {} AS ({}) RETURNS BOOLEAN -> {}",
            self.qualified_name(),
            signature.join(", "),
            self.expression
        );
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn change_row_access_expression(&self, expression: &str) -> String {
        format!(
            "ALTER ROW ACCESS POLICY {} SET BODY -> {expression}",
            self.qualified_name()
        )
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE ROW ACCESS POLICY {}", self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn create_sorts_signature() {
        let p = RowAccessPolicyBuilder::new("rap", "db", "s")
            .with_signature(hashmap! {
                "region".to_owned() => "VARCHAR".to_owned(),
                "amount".to_owned() => "NUMBER".to_owned(),
            })
            .with_row_access_expression("current_role() = 'ADMIN'")
            .with_comment("only admins");
        assert_eq!(
            p.create(),
            r#"CREATE ROW ACCESS POLICY "db"."s"."rap" AS (amount NUMBER, region VARCHAR) RETURNS BOOLEAN -> current_role() = 'ADMIN' COMMENT = 'only admins'"#
        );
    }

    #[test]
    fn alters_work() {
        let p = RowAccessPolicyBuilder::new("rap", "db", "s");
        assert_eq!(
            p.change_row_access_expression("false"),
            r#"ALTER ROW ACCESS POLICY "db"."s"."rap" SET BODY -> false"#
        );
        assert_eq!(p.drop(), r#"DROP ROW ACCESS POLICY "db"."s"."rap""#);
        assert_eq!(
            p.show(),
            r#"SHOW ROW ACCESS POLICIES LIKE 'rap' IN SCHEMA "db"."s""#
        );
    }
}
