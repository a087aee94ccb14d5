use crate::sql::{escape_string, qualified_name, quote_ident};

use super::{show_like, with_tag_clause, TagValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaBuilder {
    name: String,
    db: String,
    transient: bool,
    managed_access: bool,
    data_retention_days: Option<i32>,
    comment: Option<String>,
    tags: Vec<TagValue>,
}

impl SchemaBuilder {
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

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn managed(mut self) -> Self {
        self.managed_access = true;
        self
    }

    pub fn with_data_retention_days(mut self, days: i32) -> Self {
        self.data_retention_days = Some(days);
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

    /// `"db"."schema"`, or just `"schema"` without a database.
    pub fn qualified_name(&self) -> String {
        if self.db.is_empty() {
            quote_ident(&self.name)
        } else {
            format!("{}.{}", quote_ident(&self.db), quote_ident(&self.name))
        }
    }

    pub fn create(&self) -> String {
        let mut q = String::from("CREATE");
        if self.transient {
            q.push_str(" TRANSIENT");
        }
        q.push_str(&format!(" SCHEMA {}", self.qualified_name()));
        if self.managed_access {
            q.push_str(" WITH MANAGED ACCESS");
        }
        if let Some(days) = self.data_retention_days {
            q.push_str(&format!(" DATA_RETENTION_TIME_IN_DAYS = {days}"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q
    }

    pub fn drop(&self) -> String {
        format!("DROP SCHEMA {}", self.qualified_name())
    }

    pub fn undrop(&self) -> String {
        format!("UNDROP SCHEMA {}", self.qualified_name())
    }

    pub fn use_schema(&self) -> String {
        format!("USE SCHEMA {}", self.qualified_name())
    }

    pub fn show(&self) -> String {
        show_like("SCHEMAS", &self.name, &self.db, "")
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE SCHEMA {}", self.qualified_name())
    }

    pub fn rename(&self, new_name: &str) -> String {
        let renamed = Self::new(new_name).with_db(&self.db);
        format!(
            "ALTER SCHEMA {} RENAME TO {}",
            self.qualified_name(),
            renamed.qualified_name()
        )
    }

    pub fn swap(&self, target: &str) -> String {
        let other = Self::new(target).with_db(&self.db);
        format!(
            "ALTER SCHEMA {} SWAP WITH {}",
            self.qualified_name(),
            other.qualified_name()
        )
    }

    pub fn change_comment(&self, comment: &str) -> String {
        format!(
            "ALTER SCHEMA {} SET COMMENT = '{}'",
            self.qualified_name(),
            escape_string(comment)
        )
    }

    pub fn remove_comment(&self) -> String {
        format!("ALTER SCHEMA {} UNSET COMMENT", self.qualified_name())
    }

    pub fn change_data_retention_days(&self, days: i32) -> String {
        format!(
            "ALTER SCHEMA {} SET DATA_RETENTION_TIME_IN_DAYS = {days}",
            self.qualified_name()
        )
    }

    pub fn remove_data_retention_days(&self) -> String {
        format!(
            "ALTER SCHEMA {} UNSET DATA_RETENTION_TIME_IN_DAYS",
            self.qualified_name()
        )
    }

    pub fn enable_managed_access(&self) -> String {
        format!("ALTER SCHEMA {} ENABLE MANAGED ACCESS", self.qualified_name())
    }

    pub fn disable_managed_access(&self) -> String {
        format!("ALTER SCHEMA {} DISABLE MANAGED ACCESS", self.qualified_name())
    }

    pub fn add_tag(&self, tag: &TagValue) -> String {
        format!(
            "ALTER SCHEMA {} SET TAG {}",
            self.qualified_name(),
            tag.assignment()
        )
    }

    pub fn unset_tag(&self, tag: &TagValue) -> String {
        format!(
            "ALTER SCHEMA {} UNSET TAG {}",
            self.qualified_name(),
            tag.qualified_name()
        )
    }

    /// Three-part name of an object inside this schema.
    pub fn object_name(&self, object: &str) -> String {
        qualified_name(&self.db, &self.name, object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_works() {
        let s = SchemaBuilder::new("test")
            .with_db("db")
            .transient()
            .managed()
            .with_data_retention_days(7)
            .with_comment("Yeehaw");
        assert_eq!(
            s.create(),
            r#"CREATE TRANSIENT SCHEMA "db"."test" WITH MANAGED ACCESS DATA_RETENTION_TIME_IN_DAYS = 7 COMMENT = 'Yeehaw'"#
        );
    }

    #[test]
    fn create_with_tags_works() {
        let s = SchemaBuilder::new("test").with_db("db").with_tags(vec![TagValue::new(
            "db".into(),
            "PUBLIC".into(),
            "env".into(),
            "prod".into(),
        )]);
        assert_eq!(
            s.create(),
            r#"CREATE SCHEMA "db"."test" WITH TAG ("db"."PUBLIC"."env" = 'prod')"#
        );
    }

    #[test]
    fn alters_work() {
        let s = SchemaBuilder::new("test").with_db("db");
        assert_eq!(s.rename("bob"), r#"ALTER SCHEMA "db"."test" RENAME TO "db"."bob""#);
        assert_eq!(s.swap("other"), r#"ALTER SCHEMA "db"."test" SWAP WITH "db"."other""#);
        assert_eq!(
            s.enable_managed_access(),
            r#"ALTER SCHEMA "db"."test" ENABLE MANAGED ACCESS"#
        );
        assert_eq!(
            s.disable_managed_access(),
            r#"ALTER SCHEMA "db"."test" DISABLE MANAGED ACCESS"#
        );
        assert_eq!(
            s.change_data_retention_days(1),
            r#"ALTER SCHEMA "db"."test" SET DATA_RETENTION_TIME_IN_DAYS = 1"#
        );
        assert_eq!(s.remove_comment(), r#"ALTER SCHEMA "db"."test" UNSET COMMENT"#);
    }

    #[test]
    fn lifecycle_works() {
        let s = SchemaBuilder::new("test").with_db("db");
        assert_eq!(s.drop(), r#"DROP SCHEMA "db"."test""#);
        assert_eq!(s.undrop(), r#"UNDROP SCHEMA "db"."test""#);
        assert_eq!(s.use_schema(), r#"USE SCHEMA "db"."test""#);
        assert_eq!(s.show(), r#"SHOW SCHEMAS LIKE 'test' IN DATABASE "db""#);
        assert_eq!(s.object_name("t"), r#""db"."test"."t""#);
    }
}
