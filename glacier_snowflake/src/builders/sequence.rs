use crate::sql::escape_string;

use super::schema_object;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceBuilder {
    name: String,
    db: String,
    schema: String,
    start: i64,
    increment: i64,
    comment: Option<String>,
}

schema_object!(SequenceBuilder, "SEQUENCE", "SEQUENCES");

impl SequenceBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            start: 1,
            increment: 1,
            comment: None,
        }
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn create(&self) -> String {
        let mut q = format!("CREATE SEQUENCE {}", self.qualified_name());
        if self.start != 1 {
            q.push_str(&format!(" START = {}", self.start));
        }
        if self.increment != 1 {
            q.push_str(&format!(" INCREMENT = {}", self.increment));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn change_increment(&self, increment: i64) -> String {
        format!(
            "ALTER SEQUENCE {} SET INCREMENT = {increment}",
            self.qualified_name()
        )
    }

    /// The expression that draws the next value, for column defaults.
    pub fn next_value(&self) -> String {
        format!("{}.NEXTVAL", self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_skips_defaults() {
        let s = SequenceBuilder::new("seq", "db", "s");
        assert_eq!(s.create(), r#"CREATE SEQUENCE "db"."s"."seq""#);
        let s = s.with_start(10).with_increment(5).with_comment("ids");
        assert_eq!(
            s.create(),
            r#"CREATE SEQUENCE "db"."s"."seq" START = 10 INCREMENT = 5 COMMENT = 'ids'"#
        );
    }

    #[test]
    fn alters_work() {
        let s = SequenceBuilder::new("seq", "db", "s");
        assert_eq!(
            s.change_increment(2),
            r#"ALTER SEQUENCE "db"."s"."seq" SET INCREMENT = 2"#
        );
        assert_eq!(s.drop(), r#"DROP SEQUENCE "db"."s"."seq""#);
        assert_eq!(s.next_value(), r#""db"."s"."seq".NEXTVAL"#);
    }
}
