//! Tables and their columns.

use crate::sql::{escape_string, quote_ident};

use super::{schema_object, with_tag_clause, TagValue};

/// How a column gets its value when an insert omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDefault {
    /// A literal. Quoted when the column holds text.
    Constant(String),
    /// A SQL expression, emitted as-is.
    Expression(String),
    /// `<sequence>.NEXTVAL`
    Sequence(String),
}

impl ColumnDefault {
    fn render(&self, column_type: &str) -> String {
        match self {
            ColumnDefault::Constant(v) if is_text_type(column_type) => {
                format!("'{}'", escape_string(v))
            }
            ColumnDefault::Constant(v) | ColumnDefault::Expression(v) => v.clone(),
            ColumnDefault::Sequence(seq) => format!("{seq}.NEXTVAL"),
        }
    }
}

fn is_text_type(column_type: &str) -> bool {
    let upper = column_type.to_uppercase();
    ["VARCHAR", "STRING", "TEXT", "CHAR", "CHARACTER"]
        .iter()
        .any(|t| upper.starts_with(t))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIdentity {
    pub start: i64,
    pub step: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: String,
    nullable: bool,
    default: Option<ColumnDefault>,
    identity: Option<ColumnIdentity>,
    comment: Option<String>,
    masking_policy: Option<String>,
    tags: Vec<TagValue>,
}

impl Column {
    pub fn new(name: &str, column_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            column_type: column_type.to_owned(),
            nullable: true,
            default: None,
            identity: None,
            comment: None,
            masking_policy: None,
            tags: vec![],
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_identity(mut self, start: i64, step: i64) -> Self {
        self.identity = Some(ColumnIdentity { start, step });
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_masking_policy(mut self, policy: &str) -> Self {
        self.masking_policy = Some(policy.to_owned());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagValue>) -> Self {
        self.tags = tags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column definition used in CREATE TABLE and ADD COLUMN.
    pub fn definition(&self) -> String {
        let mut q = format!("{} {}", quote_ident(&self.name), self.column_type);
        if let Some(default) = &self.default {
            q.push_str(&format!(" DEFAULT {}", default.render(&self.column_type)));
        }
        if let Some(identity) = &self.identity {
            q.push_str(&format!(" IDENTITY({}, {})", identity.start, identity.step));
        }
        if !self.nullable {
            q.push_str(" NOT NULL");
        }
        if let Some(policy) = &self.masking_policy {
            q.push_str(&format!(" WITH MASKING POLICY {policy}"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryKey {
    pub name: String,
    pub keys: Vec<String>,
}

impl PrimaryKey {
    fn render(&self) -> String {
        let keys = self
            .keys
            .iter()
            .map(|k| quote_ident(k))
            .collect::<Vec<_>>()
            .join(", ");
        if self.name.is_empty() {
            format!("PRIMARY KEY({keys})")
        } else {
            format!("CONSTRAINT {} PRIMARY KEY({keys})", quote_ident(&self.name))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBuilder {
    name: String,
    db: String,
    schema: String,
    columns: Vec<Column>,
    comment: Option<String>,
    cluster_by: Vec<String>,
    primary_key: Option<PrimaryKey>,
    data_retention_days: Option<i32>,
    change_tracking: Option<bool>,
    row_access_policy: Option<(String, Vec<String>)>,
    tags: Vec<TagValue>,
}

schema_object!(TableBuilder, "TABLE", "TABLES");

impl TableBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_cluster_by(mut self, keys: Vec<String>) -> Self {
        self.cluster_by = keys;
        self
    }

    pub fn with_primary_key(mut self, key: PrimaryKey) -> Self {
        self.primary_key = Some(key);
        self
    }

    pub fn with_data_retention_days(mut self, days: i32) -> Self {
        self.data_retention_days = Some(days);
        self
    }

    pub fn with_change_tracking(mut self, enabled: bool) -> Self {
        self.change_tracking = Some(enabled);
        self
    }

    pub fn with_row_access_policy(mut self, policy: &str, on: Vec<String>) -> Self {
        self.row_access_policy = Some((policy.to_owned(), on));
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagValue>) -> Self {
        self.tags = tags;
        self
    }

    pub fn create(&self) -> String {
        let mut defs = self
            .columns
            .iter()
            .map(Column::definition)
            .collect::<Vec<_>>();
        if let Some(pk) = &self.primary_key {
            defs.push(pk.render());
        }
        let mut q = format!("CREATE TABLE {} ({})", self.qualified_name(), defs.join(", "));
        if !self.cluster_by.is_empty() {
            q.push_str(&format!(" CLUSTER BY LINEAR({})", self.cluster_by.join(", ")));
        }
        if let Some(days) = self.data_retention_days {
            q.push_str(&format!(" DATA_RETENTION_TIME_IN_DAYS = {days}"));
        }
        if let Some(ct) = self.change_tracking {
            q.push_str(&format!(" CHANGE_TRACKING = {}", ct.to_string().to_uppercase()));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        if let Some((policy, on)) = &self.row_access_policy {
            q.push_str(&format!(
                " WITH ROW ACCESS POLICY {policy} ON ({})",
                on.join(", ")
            ));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q
    }

    pub fn undrop(&self) -> String {
        format!("UNDROP TABLE {}", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESC TABLE {}", self.qualified_name())
    }

    pub fn show_primary_key(&self) -> String {
        format!("SHOW PRIMARY KEYS IN TABLE {}", self.qualified_name())
    }

    fn alter(&self, action: &str) -> String {
        format!("ALTER TABLE {} {action}", self.qualified_name())
    }

    pub fn add_column(&self, column: &Column) -> String {
        self.alter(&format!("ADD COLUMN {}", column.definition()))
    }

    pub fn drop_column(&self, name: &str) -> String {
        self.alter(&format!("DROP COLUMN {}", quote_ident(name)))
    }

    pub fn change_column_type(&self, name: &str, column_type: &str) -> String {
        self.alter(&format!("MODIFY COLUMN {} {column_type}", quote_ident(name)))
    }

    pub fn change_column_comment(&self, name: &str, comment: &str) -> String {
        self.alter(&format!(
            "MODIFY COLUMN {} COMMENT '{}'",
            quote_ident(name),
            escape_string(comment)
        ))
    }

    pub fn remove_column_comment(&self, name: &str) -> String {
        self.alter(&format!("MODIFY COLUMN {} UNSET COMMENT", quote_ident(name)))
    }

    pub fn change_nullable(&self, name: &str, nullable: bool) -> String {
        let verb = if nullable { "DROP" } else { "SET" };
        self.alter(&format!("MODIFY COLUMN {} {verb} NOT NULL", quote_ident(name)))
    }

    pub fn drop_column_default(&self, name: &str) -> String {
        self.alter(&format!("MODIFY COLUMN {} DROP DEFAULT", quote_ident(name)))
    }

    pub fn change_column_masking_policy(&self, name: &str, policy: &str) -> String {
        self.alter(&format!(
            "MODIFY COLUMN {} SET MASKING POLICY {policy}",
            quote_ident(name)
        ))
    }

    pub fn remove_column_masking_policy(&self, name: &str) -> String {
        self.alter(&format!(
            "MODIFY COLUMN {} UNSET MASKING POLICY",
            quote_ident(name)
        ))
    }

    pub fn add_column_tag(&self, column: &str, tag: &TagValue) -> String {
        self.alter(&format!(
            "MODIFY COLUMN {} SET TAG {}",
            quote_ident(column),
            tag.assignment()
        ))
    }

    pub fn unset_column_tag(&self, column: &str, tag: &TagValue) -> String {
        self.alter(&format!(
            "MODIFY COLUMN {} UNSET TAG {}",
            quote_ident(column),
            tag.qualified_name()
        ))
    }

    pub fn change_cluster_by(&self, keys: &[String]) -> String {
        self.alter(&format!("CLUSTER BY LINEAR({})", keys.join(", ")))
    }

    pub fn drop_clustering_key(&self) -> String {
        self.alter("DROP CLUSTERING KEY")
    }

    pub fn change_primary_key(&self, key: &PrimaryKey) -> String {
        self.alter(&format!("ADD {}", key.render()))
    }

    pub fn drop_primary_key(&self) -> String {
        self.alter("DROP PRIMARY KEY")
    }

    pub fn change_data_retention_days(&self, days: i32) -> String {
        self.alter(&format!("SET DATA_RETENTION_TIME_IN_DAYS = {days}"))
    }

    pub fn change_change_tracking(&self, enabled: bool) -> String {
        self.alter(&format!(
            "SET CHANGE_TRACKING = {}",
            enabled.to_string().to_uppercase()
        ))
    }

    pub fn add_row_access_policy(&self, policy: &str, on: &[String]) -> String {
        self.alter(&format!("ADD ROW ACCESS POLICY {policy} ON ({})", on.join(", ")))
    }

    pub fn drop_row_access_policy(&self, policy: &str) -> String {
        self.alter(&format!("DROP ROW ACCESS POLICY {policy}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableBuilder {
        TableBuilder::new("t", "db", "s")
    }

    #[test]
    fn column_definition_works() {
        let c = Column::new("name", "VARCHAR(16)")
            .with_default(ColumnDefault::Constant("it's".to_owned()))
            .not_null()
            .with_masking_policy("\"db\".\"s\".\"mask\"")
            .with_comment("who");
        assert_eq!(
            c.definition(),
            r#""name" VARCHAR(16) DEFAULT 'it\'s' NOT NULL WITH MASKING POLICY "db"."s"."mask" COMMENT 'who'"#
        );
        let c = Column::new("id", "NUMBER(38,0)").with_identity(1, 1);
        assert_eq!(c.definition(), r#""id" NUMBER(38,0) IDENTITY(1, 1)"#);
        let c = Column::new("n", "NUMBER").with_default(ColumnDefault::Constant("7".into()));
        assert_eq!(c.definition(), r#""n" NUMBER DEFAULT 7"#);
        let c = Column::new("n", "NUMBER").with_default(ColumnDefault::Sequence(
            "\"db\".\"s\".\"seq\"".into(),
        ));
        assert_eq!(c.definition(), r#""n" NUMBER DEFAULT "db"."s"."seq".NEXTVAL"#);
        let c = Column::new("at", "TIMESTAMP_NTZ")
            .with_default(ColumnDefault::Expression("CURRENT_TIMESTAMP()".into()));
        assert_eq!(c.definition(), r#""at" TIMESTAMP_NTZ DEFAULT CURRENT_TIMESTAMP()"#);
    }

    #[test]
    fn create_works() {
        let t = table()
            .with_columns(vec![
                Column::new("a", "NUMBER").not_null(),
                Column::new("b", "VARCHAR"),
            ])
            .with_primary_key(PrimaryKey {
                name: "pk".into(),
                keys: vec!["a".into(), "b".into()],
            })
            .with_cluster_by(vec!["a".into(), "b".into()])
            .with_data_retention_days(1)
            .with_change_tracking(true)
            .with_comment("table'")
            .with_row_access_policy("\"db\".\"s\".\"rap\"", vec!["a".into()]);
        assert_eq!(
            t.create(),
            r#"CREATE TABLE "db"."s"."t" ("a" NUMBER NOT NULL, "b" VARCHAR, CONSTRAINT "pk" PRIMARY KEY("a", "b")) CLUSTER BY LINEAR(a, b) DATA_RETENTION_TIME_IN_DAYS = 1 CHANGE_TRACKING = TRUE COMMENT = 'table\'' WITH ROW ACCESS POLICY "db"."s"."rap" ON (a)"#
        );
    }

    #[test]
    fn column_alters_work() {
        let t = table();
        assert_eq!(
            t.add_column(&Column::new("c", "BOOLEAN")),
            r#"ALTER TABLE "db"."s"."t" ADD COLUMN "c" BOOLEAN"#
        );
        assert_eq!(t.drop_column("c"), r#"ALTER TABLE "db"."s"."t" DROP COLUMN "c""#);
        assert_eq!(
            t.change_column_type("c", "VARCHAR(10)"),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" VARCHAR(10)"#
        );
        assert_eq!(
            t.change_column_comment("c", "x"),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" COMMENT 'x'"#
        );
        assert_eq!(
            t.change_nullable("c", false),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" SET NOT NULL"#
        );
        assert_eq!(
            t.change_nullable("c", true),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" DROP NOT NULL"#
        );
        assert_eq!(
            t.drop_column_default("c"),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" DROP DEFAULT"#
        );
        let tag = TagValue::new("db".into(), "s".into(), "pii".into(), "email".into());
        assert_eq!(
            t.add_column_tag("c", &tag),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" SET TAG "db"."s"."pii" = 'email'"#
        );
        assert_eq!(
            t.unset_column_tag("c", &tag),
            r#"ALTER TABLE "db"."s"."t" MODIFY COLUMN "c" UNSET TAG "db"."s"."pii""#
        );
    }

    #[test]
    fn table_alters_work() {
        let t = table();
        assert_eq!(
            t.change_cluster_by(&["x".into()]),
            r#"ALTER TABLE "db"."s"."t" CLUSTER BY LINEAR(x)"#
        );
        assert_eq!(t.drop_clustering_key(), r#"ALTER TABLE "db"."s"."t" DROP CLUSTERING KEY"#);
        assert_eq!(
            t.change_primary_key(&PrimaryKey {
                name: String::new(),
                keys: vec!["id".into()]
            }),
            r#"ALTER TABLE "db"."s"."t" ADD PRIMARY KEY("id")"#
        );
        assert_eq!(t.drop_primary_key(), r#"ALTER TABLE "db"."s"."t" DROP PRIMARY KEY"#);
        assert_eq!(
            t.change_change_tracking(false),
            r#"ALTER TABLE "db"."s"."t" SET CHANGE_TRACKING = FALSE"#
        );
        assert_eq!(
            t.drop_row_access_policy("p"),
            r#"ALTER TABLE "db"."s"."t" DROP ROW ACCESS POLICY p"#
        );
        assert_eq!(t.undrop(), r#"UNDROP TABLE "db"."s"."t""#);
        assert_eq!(t.describe(), r#"DESC TABLE "db"."s"."t""#);
        assert_eq!(
            t.show_primary_key(),
            r#"SHOW PRIMARY KEYS IN TABLE "db"."s"."t""#
        );
        assert_eq!(t.drop(), r#"DROP TABLE "db"."s"."t""#);
    }
}
