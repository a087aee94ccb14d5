use crate::sql::escape_string;

use super::{schema_object, with_tag_clause, TagValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewBuilder {
    name: String,
    db: String,
    schema: String,
    secure: bool,
    replace: bool,
    comment: Option<String>,
    statement: String,
    tags: Vec<TagValue>,
}

schema_object!(ViewBuilder, "VIEW", "VIEWS");

impl ViewBuilder {
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

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn create(&self) -> String {
        let mut q = String::from("CREATE");
        if self.replace {
            q.push_str(" OR REPLACE");
        }
        if self.secure {
            q.push_str(" SECURE");
        }
        q.push_str(&format!(" VIEW {}", self.qualified_name()));
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q.push_str(&format!(" AS {}", self.statement));
        q
    }

    pub fn secure(&self) -> String {
        format!("ALTER VIEW {} SET SECURE", self.qualified_name())
    }

    pub fn unsecure(&self) -> String {
        format!("ALTER VIEW {} UNSET SECURE", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE VIEW {}", self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewBuilder {
        ViewBuilder::new("test").with_db("db").with_schema("schema")
    }

    #[test]
    fn create_works() {
        let v = view()
            .with_replace()
            .with_secure()
            .with_comment("great' comment")
            .with_statement("SELECT * FROM DUAL WHERE a = 'b'");
        assert_eq!(
            v.create(),
            r#"CREATE OR REPLACE SECURE VIEW "db"."schema"."test" COMMENT = 'great\' comment' AS SELECT * FROM DUAL WHERE a = 'b'"#
        );
        assert!(v.is_secure());
    }

    #[test]
    fn create_minimal_works() {
        let v = view().with_statement("SELECT 1");
        assert_eq!(v.create(), r#"CREATE VIEW "db"."schema"."test" AS SELECT 1"#);
    }

    #[test]
    fn alters_work() {
        let v = view();
        assert_eq!(
            v.rename("test2"),
            r#"ALTER VIEW "db"."schema"."test" RENAME TO "db"."schema"."test2""#
        );
        assert_eq!(v.secure(), r#"ALTER VIEW "db"."schema"."test" SET SECURE"#);
        assert_eq!(v.unsecure(), r#"ALTER VIEW "db"."schema"."test" UNSET SECURE"#);
        assert_eq!(
            v.change_comment("bob"),
            r#"ALTER VIEW "db"."schema"."test" SET COMMENT = 'bob'"#
        );
        assert_eq!(
            v.remove_comment(),
            r#"ALTER VIEW "db"."schema"."test" UNSET COMMENT"#
        );
    }

    #[test]
    fn drop_and_show_work() {
        let v = view();
        assert_eq!(v.drop(), r#"DROP VIEW "db"."schema"."test""#);
        assert_eq!(
            v.show(),
            r#"SHOW VIEWS LIKE 'test' IN SCHEMA "db"."schema""#
        );
    }

    #[test]
    fn tags_work() {
        let v = view();
        let tag = TagValue::new("db".into(), "schema".into(), "pii".into(), "yes".into());
        assert_eq!(
            v.add_tag(&tag),
            r#"ALTER VIEW "db"."schema"."test" SET TAG "db"."schema"."pii" = 'yes'"#
        );
        assert_eq!(
            v.unset_tag(&tag),
            r#"ALTER VIEW "db"."schema"."test" UNSET TAG "db"."schema"."pii""#
        );
    }
}
