use crate::sql::escape_string;

use super::{schema_object, system_functions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeBuilder {
    name: String,
    db: String,
    schema: String,
    auto_ingest: bool,
    aws_sns_topic_arn: Option<String>,
    integration: Option<String>,
    error_integration: Option<String>,
    comment: Option<String>,
    copy_statement: String,
}

schema_object!(PipeBuilder, "PIPE", "PIPES");

impl PipeBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_auto_ingest(mut self) -> Self {
        self.auto_ingest = true;
        self
    }

    pub fn with_aws_sns_topic_arn(mut self, arn: &str) -> Self {
        self.aws_sns_topic_arn = Some(arn.to_owned());
        self
    }

    pub fn with_integration(mut self, integration: &str) -> Self {
        self.integration = Some(integration.to_owned());
        self
    }

    pub fn with_error_integration(mut self, integration: &str) -> Self {
        self.error_integration = Some(integration.to_owned());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_copy_statement(mut self, statement: &str) -> Self {
        self.copy_statement = statement.to_owned();
        self
    }

    pub fn create(&self) -> String {
        let mut q = format!("CREATE PIPE {}", self.qualified_name());
        if self.auto_ingest {
            q.push_str(" AUTO_INGEST = TRUE");
        }
        if let Some(arn) = &self.aws_sns_topic_arn {
            q.push_str(&format!(" AWS_SNS_TOPIC = '{}'", escape_string(arn)));
        }
        if let Some(integration) = &self.integration {
            q.push_str(&format!(" INTEGRATION = '{}'", escape_string(integration)));
        }
        if let Some(integration) = &self.error_integration {
            q.push_str(&format!(" ERROR_INTEGRATION = {integration}"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&format!(" AS {}", self.copy_statement));
        q
    }

    pub fn change_error_integration(&self, integration: &str) -> String {
        format!(
            "ALTER PIPE {} SET ERROR_INTEGRATION = {integration}",
            self.qualified_name()
        )
    }

    pub fn refresh(&self) -> String {
        format!("ALTER PIPE {} REFRESH", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE PIPE {}", self.qualified_name())
    }

    pub fn status(&self) -> String {
        system_functions::pipe_status(&self.db, &self.schema, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_works() {
        let p = PipeBuilder::new("p", "db", "s")
            .with_auto_ingest()
            .with_aws_sns_topic_arn("arn:aws:sns:us-east-1:1:t")
            .with_comment("ingest")
            .with_copy_statement("COPY INTO t FROM @stage");
        assert_eq!(
            p.create(),
            r#"CREATE PIPE "db"."s"."p" AUTO_INGEST = TRUE AWS_SNS_TOPIC = 'arn:aws:sns:us-east-1:1:t' COMMENT = 'ingest' AS COPY INTO t FROM @stage"#
        );
    }

    #[test]
    fn lifecycle_works() {
        let p = PipeBuilder::new("p", "db", "s");
        assert_eq!(p.drop(), r#"DROP PIPE "db"."s"."p""#);
        assert_eq!(p.refresh(), r#"ALTER PIPE "db"."s"."p" REFRESH"#);
        assert_eq!(
            p.change_comment("c"),
            r#"ALTER PIPE "db"."s"."p" SET COMMENT = 'c'"#
        );
        assert_eq!(p.status(), r#"SELECT SYSTEM$PIPE_STATUS('"db"."s"."p"')"#);
    }
}
