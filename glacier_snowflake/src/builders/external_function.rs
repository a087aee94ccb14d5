use std::collections::BTreeMap;

use crate::error::BuildResult;
use crate::sql::escape_string;

use super::function::Routine;
use super::show_like;
use super::Argument;

const KIND: &str = "external function";

/// A function backed by a remote service behind an API integration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalFunctionBuilder {
    routine: Routine,
    return_not_null: bool,
    api_integration: String,
    headers: BTreeMap<String, String>,
    context_headers: Vec<String>,
    max_batch_rows: Option<i64>,
    compression: Option<String>,
    request_translator: Option<String>,
    response_translator: Option<String>,
    url_of_proxy_and_resource: String,
}

impl ExternalFunctionBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            routine: Routine::new(name, db, schema),
            ..Default::default()
        }
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.routine.args = args;
        self
    }

    pub fn with_return_type(mut self, return_type: &str) -> Self {
        self.routine.return_type = return_type.to_owned();
        self
    }

    pub fn with_return_not_null(mut self) -> Self {
        self.return_not_null = true;
        self
    }

    pub fn with_null_input_behavior(mut self, behavior: &str) -> Self {
        self.routine.null_input_behavior = Some(behavior.to_owned());
        self
    }

    pub fn with_return_behavior(mut self, behavior: &str) -> Self {
        self.routine.return_behavior = Some(behavior.to_owned());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.routine.comment = Some(comment.to_owned());
        self
    }

    pub fn with_secure(mut self) -> Self {
        self.routine.secure = true;
        self
    }

    pub fn with_api_integration(mut self, integration: &str) -> Self {
        self.api_integration = integration.to_owned();
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_context_headers(mut self, headers: Vec<String>) -> Self {
        self.context_headers = headers;
        self
    }

    pub fn with_max_batch_rows(mut self, rows: i64) -> Self {
        self.max_batch_rows = Some(rows);
        self
    }

    pub fn with_compression(mut self, compression: &str) -> Self {
        self.compression = Some(compression.to_owned());
        self
    }

    pub fn with_request_translator(mut self, translator: &str) -> Self {
        self.request_translator = Some(translator.to_owned());
        self
    }

    pub fn with_response_translator(mut self, translator: &str) -> Self {
        self.response_translator = Some(translator.to_owned());
        self
    }

    /// The proxy URL the call goes through.
    pub fn with_url_of_proxy_and_resource(mut self, url: &str) -> Self {
        self.url_of_proxy_and_resource = url.to_owned();
        self
    }

    pub fn qualified_name(&self) -> BuildResult<String> {
        self.routine.qualified_name(KIND)
    }

    pub fn create(&self) -> BuildResult<String> {
        let r = &self.routine;
        let mut q = String::from("CREATE");
        if r.secure {
            q.push_str(" SECURE");
        }
        q.push_str(&format!(
            " EXTERNAL FUNCTION {}{} RETURNS {}",
            r.qualified_name_without_arguments(KIND)?,
            r.signature(),
            r.return_type
        ));
        if self.return_not_null {
            q.push_str(" NOT NULL");
        }
        q.push_str(&r.behavior_clauses());
        q.push_str(&r.comment_clause());
        q.push_str(&format!(" API_INTEGRATION = '{}'", escape_string(&self.api_integration)));
        if !self.headers.is_empty() {
            let headers = self
                .headers
                .iter()
                .map(|(k, v)| format!("'{}' = '{}'", escape_string(k), escape_string(v)))
                .collect::<Vec<_>>();
            q.push_str(&format!(" HEADERS = ({})", headers.join(", ")));
        }
        if !self.context_headers.is_empty() {
            q.push_str(&format!(" CONTEXT_HEADERS = ({})", self.context_headers.join(", ")));
        }
        if let Some(rows) = self.max_batch_rows {
            q.push_str(&format!(" MAX_BATCH_ROWS = {rows}"));
        }
        if let Some(compression) = &self.compression {
            q.push_str(&format!(" COMPRESSION = '{}'", escape_string(compression)));
        }
        if let Some(t) = &self.request_translator {
            q.push_str(&format!(" REQUEST_TRANSLATOR = {t}"));
        }
        if let Some(t) = &self.response_translator {
            q.push_str(&format!(" RESPONSE_TRANSLATOR = {t}"));
        }
        q.push_str(&format!(" AS '{}'", escape_string(&self.url_of_proxy_and_resource)));
        Ok(q)
    }

    pub fn drop(&self) -> BuildResult<String> {
        Ok(format!("DROP FUNCTION {}", self.qualified_name()?))
    }

    pub fn describe(&self) -> BuildResult<String> {
        Ok(format!("DESCRIBE FUNCTION {}", self.qualified_name()?))
    }

    pub fn show(&self) -> String {
        show_like(
            "EXTERNAL FUNCTIONS",
            &self.routine.name,
            &self.routine.db,
            &self.routine.schema,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use maplit::btreemap;

    #[test]
    fn create_works() -> Result<()> {
        let f = ExternalFunctionBuilder::new("ext", "db", "s")
            .with_secure()
            .with_args(vec![Argument::new("x".into(), "VARCHAR".into())])
            .with_return_type("VARIANT")
            .with_return_not_null()
            .with_null_input_behavior("CALLED ON NULL INPUT")
            .with_return_behavior("VOLATILE")
            .with_comment("remote")
            .with_api_integration("aws_api")
            .with_headers(btreemap! {
                "version".to_owned() => "2".to_owned(),
                "env".to_owned() => "prod".to_owned(),
            })
            .with_context_headers(vec!["CURRENT_ACCOUNT".into(), "CURRENT_USER".into()])
            .with_max_batch_rows(500)
            .with_compression("AUTO")
            .with_url_of_proxy_and_resource("https://abc.execute-api.us-east-1.amazonaws.com/prod");
        assert_eq!(
            f.create()?,
            r#"CREATE SECURE EXTERNAL FUNCTION "db"."s"."ext"(x VARCHAR) RETURNS VARIANT NOT NULL CALLED ON NULL INPUT VOLATILE COMMENT = 'remote' API_INTEGRATION = 'aws_api' HEADERS = ('env' = 'prod', 'version' = '2') CONTEXT_HEADERS = (CURRENT_ACCOUNT, CURRENT_USER) MAX_BATCH_ROWS = 500 COMPRESSION = 'AUTO' AS 'https://abc.execute-api.us-east-1.amazonaws.com/prod'"#
        );
        Ok(())
    }

    #[test]
    fn lifecycle_works() -> Result<()> {
        let f = ExternalFunctionBuilder::new("ext", "db", "s")
            .with_args(vec![Argument::new("x".into(), "VARCHAR".into())]);
        assert_eq!(f.drop()?, r#"DROP FUNCTION "db"."s"."ext"(VARCHAR)"#);
        assert_eq!(
            f.show(),
            r#"SHOW EXTERNAL FUNCTIONS LIKE 'ext' IN SCHEMA "db"."s""#
        );
        Ok(())
    }
}
