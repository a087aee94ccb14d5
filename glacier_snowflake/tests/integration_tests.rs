use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::Serialize;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glacier_snowflake::builders::{Column, DatabaseBuilder, MaterializedViewBuilder, TableBuilder};
use glacier_snowflake::entry_types::Database;
use glacier_snowflake::exec::{query_all, query_one, Rows};
use glacier_snowflake::grants::{
    database_grant, future_table_grant, role_ownership_grant, table_grant, CurrentGrants,
    OWNERSHIP,
};
use glacier_snowflake::policy::describe_password_policy;
use glacier_snowflake::sql::SchemaObjectIdentifier;
use glacier_snowflake::{SnowflakeCredentials, SnowflakeRestClient, SnowflakeRestConfig, SqlExecutor};

#[derive(Serialize)]
struct SnowflakeField {
    name: String,
}

#[derive(Serialize)]
struct SnowflakeRowTypeFields {
    #[serde(rename = "rowType")]
    row_type: Vec<SnowflakeField>,
}

#[derive(Serialize)]
struct SnowflakeResult {
    #[serde(rename = "resultSetMetaData")]
    result_set_metadata: SnowflakeRowTypeFields,
    data: Vec<Vec<Option<String>>>,
}

fn result_body(fields: &[&str], data: Vec<Vec<Option<&str>>>) -> String {
    let body = SnowflakeResult {
        result_set_metadata: SnowflakeRowTypeFields {
            row_type: fields
                .iter()
                .map(|f| SnowflakeField {
                    name: (*f).to_owned(),
                })
                .collect(),
        },
        data: data
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.map(str::to_owned)).collect())
            .collect(),
    };
    serde_json::to_string(&body).unwrap()
}

lazy_static! {
    static ref SHOW_DATABASES_BODY: String = result_body(
        &["name", "owner", "is_default", "retention_time", "options"],
        vec![
            vec![Some("PROD"), Some("SYSADMIN"), Some("N"), Some("1"), Some("")],
            vec![Some("SCRATCH"), Some("\"dev role\""), Some("N"), Some("0"), Some("TRANSIENT")],
        ],
    );
    static ref DESCRIBE_POLICY_BODY: String = result_body(
        &["property", "value", "default", "description"],
        vec![
            vec![Some("NAME"), Some("STRICT"), None, Some("Name of the policy")],
            vec![Some("PASSWORD_MIN_LENGTH"), Some("14"), Some("8"), None],
            vec![Some("PASSWORD_MAX_RETRIES"), Some("3"), Some("5"), None],
            vec![Some("COMMENT"), Some("null"), None, None],
        ],
    );
}

async fn rest_client(server: &MockServer) -> SnowflakeRestClient {
    let creds = SnowflakeCredentials {
        account: "my_account".to_owned(),
        role: "role".to_owned(),
        user: "user".to_owned(),
        warehouse: "warehouse".to_owned(),
        private_key: "private_key".to_owned(),
        public_key_fp: "fp".to_owned(),
        url: Some(format!("{}/api/v2/statements", server.uri())),
    };
    SnowflakeRestClient::new(
        creds,
        SnowflakeRestConfig {
            retry: false,
            use_jwt: false,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn show_databases_over_rest_works() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .and(body_string_contains("SHOW DATABASES"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOW_DATABASES_BODY.as_str()))
        .mount(&server)
        .await;

    let client = rest_client(&server).await;
    let databases: Vec<Database> = query_all(&client, "SHOW DATABASES").await?;
    assert_eq!(databases.len(), 2);
    assert_eq!(databases[0].name, "PROD");
    assert_eq!(databases[0].is_default, Some(false));
    assert!(!databases[0].is_transient());
    assert!(databases[1].is_transient());
    assert_eq!(databases[1].retention_time, Some(0));
    Ok(())
}

#[tokio::test]
async fn empty_result_over_rest_is_none() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(&["name"], vec![])))
        .mount(&server)
        .await;

    let client = rest_client(&server).await;
    let database: Option<Database> =
        query_one(&client, &DatabaseBuilder::new("MISSING").show()).await?;
    assert_eq!(database, None);
    Ok(())
}

#[tokio::test]
async fn describe_password_policy_over_rest_works() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .and(body_string_contains("DESCRIBE PASSWORD POLICY db.sec.strict"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DESCRIBE_POLICY_BODY.as_str()))
        .mount(&server)
        .await;

    let client = rest_client(&server).await;
    let id = SchemaObjectIdentifier::new("db", "sec", "strict");
    let policy = describe_password_policy(&client, &id).await?;
    assert_eq!(policy.id, id);
    assert_eq!(policy.name.as_deref(), Some("STRICT"));
    assert_eq!(policy.min_length, Some(14));
    assert_eq!(policy.max_retries, Some(3));
    assert_eq!(policy.comment.as_deref(), Some(""));
    Ok(())
}

#[tokio::test]
async fn rejected_statement_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message": "SQL compilation error"}"#),
        )
        .mount(&server)
        .await;

    let client = rest_client(&server).await;
    let err = client.exec("CREATE DATABASE \"X\"").await.unwrap_err();
    assert!(format!("{err:#}").contains("SQL compilation error"));
}

/// Keeps every statement it is asked to run and fails on a marker.
#[derive(Default)]
struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl RecordingExecutor {
    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn exec(&self, query: &str) -> Result<()> {
        self.statements.lock().unwrap().push(query.to_owned());
        match self.fail_on {
            Some(marker) if query.contains(marker) => bail!("rejected: {query}"),
            _ => Ok(()),
        }
    }

    async fn query(&self, query: &str) -> Result<Rows> {
        self.exec(query).await?;
        Ok(Rows::default())
    }
}

#[tokio::test]
async fn provisioning_batch_runs_in_one_transaction() -> Result<()> {
    let executor = RecordingExecutor::default();

    let mut batch = vec![DatabaseBuilder::new("prod").create()?];
    batch.push(
        TableBuilder::new("events", "prod", "public")
            .with_columns(vec![Column::new("id", "NUMBER").not_null()])
            .create(),
    );
    batch.extend(
        MaterializedViewBuilder::new("daily")
            .with_db("prod")
            .with_schema("public")
            .with_warehouse("wh")
            .with_statement("SELECT 1")
            .create(),
    );
    batch.push(database_grant("prod").role("analyst").grant("USAGE", false));
    batch.push(
        future_table_grant("prod", "public")
            .role("analyst")
            .grant("SELECT", false),
    );
    executor.exec_multi(&batch).await?;

    assert_eq!(
        executor.statements(),
        vec![
            "BEGIN",
            r#"CREATE DATABASE "prod""#,
            r#"CREATE TABLE "prod"."public"."events" ("id" NUMBER NOT NULL)"#,
            r#"USE WAREHOUSE "wh""#,
            r#"CREATE MATERIALIZED VIEW "prod"."public"."daily" AS SELECT 1"#,
            r#"GRANT USAGE ON DATABASE "prod" TO ROLE "analyst""#,
            r#"GRANT SELECT ON FUTURE TABLES IN SCHEMA "prod"."public" TO ROLE "analyst""#,
            "COMMIT",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn ownership_revoke_rolls_back_together() {
    let executor = RecordingExecutor {
        fail_on: Some("IDENTIFIER($currentRole)"),
        ..Default::default()
    };
    let revoke = table_grant("prod", "public", "events")
        .role("etl")
        .revoke(OWNERSHIP);
    assert_eq!(revoke.len(), 2);

    let result = executor.exec_multi(&revoke).await;
    assert!(result.is_err());
    assert_eq!(
        executor.statements(),
        vec![
            "BEGIN".to_owned(),
            "SET currentRole=CURRENT_ROLE()".to_owned(),
            revoke[1].clone(),
            "ROLLBACK".to_owned(),
        ]
    );
}

#[tokio::test]
async fn role_ownership_transfer_runs() -> Result<()> {
    let executor = RecordingExecutor::default();
    let grant = role_ownership_grant("reporting", CurrentGrants::Revoke)
        .role("admin")
        .grant(OWNERSHIP, false);
    executor.exec(&grant).await?;
    assert_eq!(
        executor.statements(),
        vec![r#"GRANT OWNERSHIP ON ROLE "reporting" TO ROLE "admin" REVOKE CURRENT GRANTS"#]
    );
    Ok(())
}
