//! `SYSTEM$...` calls issued as SELECT statements.

use crate::sql::{escape_string, qualified_name};

/// `SELECT SYSTEM$GET_TAG('"db"."s"."tag"', '<object>', '<domain>') TAG_VALUE WHERE TAG_VALUE IS NOT NULL`
pub fn get_tag(tag: &str, object: &str, domain: &str) -> String {
    format!(
        "SELECT SYSTEM$GET_TAG('{}', '{}', '{}') TAG_VALUE WHERE TAG_VALUE IS NOT NULL",
        escape_string(tag),
        escape_string(object),
        escape_string(domain)
    )
}

pub fn pipe_status(db: &str, schema: &str, pipe: &str) -> String {
    format!(
        "SELECT SYSTEM$PIPE_STATUS('{}')",
        escape_string(&qualified_name(db, schema, pipe))
    )
}

/// The function takes the bare dotted name of the root task.
pub fn task_dependents_enable(db: &str, schema: &str, task: &str) -> String {
    format!(
        "SELECT SYSTEM$TASK_DEPENDENTS_ENABLE('{}')",
        escape_string(&format!("{db}.{schema}.{task}"))
    )
}

pub fn get_aws_sns_iam_policy(sns_topic_arn: &str) -> String {
    format!(
        "SELECT SYSTEM$GET_AWS_SNS_IAM_POLICY('{}') AS policy",
        escape_string(sns_topic_arn)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_functions_work() {
        assert_eq!(
            get_tag(r#""db"."s"."t""#, r#""db"."s"."tbl""#, "TABLE"),
            r#"SELECT SYSTEM$GET_TAG('"db"."s"."t"', '"db"."s"."tbl"', 'TABLE') TAG_VALUE WHERE TAG_VALUE IS NOT NULL"#
        );
        assert_eq!(
            task_dependents_enable("db", "s", "root"),
            "SELECT SYSTEM$TASK_DEPENDENTS_ENABLE('db.s.root')"
        );
        assert_eq!(
            get_aws_sns_iam_policy("arn:aws:sns:x"),
            "SELECT SYSTEM$GET_AWS_SNS_IAM_POLICY('arn:aws:sns:x') AS policy"
        );
    }
}
