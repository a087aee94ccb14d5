//! Rest API interface for Snowflake
//!
//! Implements the execution port over the Snowflake SQL API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use glacier_core::logging::{debug, warn};
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::exec::{Row, Rows, SqlExecutor};
use crate::{consts, creds::SnowflakeCredentials};

/// Claims for use with the `jsonwebtoken` crate when
/// creating a new JWT.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Required (validate_exp defaults to true in validation). Expiration time (as UTC timestamp)
    exp: usize,
    /// Optional. Issued at (as UTC timestamp)
    iat: usize,
    /// Optional. Issuer
    iss: String,
    /// Optional. Subject (whom token refers to)
    sub: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SnowflakeRestConfig {
    /// Enable/disable retry logic.
    pub retry: bool,
    /// Sign requests with a key-pair JWT. Only turned off against mock servers.
    pub use_jwt: bool,
}

impl Default for SnowflakeRestConfig {
    fn default() -> Self {
        Self {
            retry: false,
            use_jwt: true,
        }
    }
}

#[derive(Deserialize, Default)]
struct SnowflakeField {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize, Default)]
struct ResultSetMetaData {
    #[serde(default, rename = "rowType")]
    row_type: Vec<SnowflakeField>,
    #[serde(default, rename = "partitionInfo")]
    partition_info: Vec<JsonValue>,
}

#[derive(Deserialize, Default)]
struct StatementResponse {
    #[serde(default, rename = "resultSetMetaData")]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

/// Wrapper struct for http functionality
pub struct SnowflakeRestClient {
    /// The credentials used to authenticate into Snowflake.
    credentials: SnowflakeCredentials,
    config: SnowflakeRestConfig,
    http_client: ClientWithMiddleware,
}

impl SnowflakeRestClient {
    pub fn new(credentials: SnowflakeCredentials, config: SnowflakeRestConfig) -> Result<Self> {
        credentials.validate()?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let mut client_builder = ClientBuilder::new(reqwest::Client::new());
        if config.retry {
            client_builder =
                client_builder.with(RetryTransientMiddleware::new_with_policy(retry_policy))
        }
        let client = client_builder.build();
        Ok(Self {
            credentials,
            config,
            http_client: client,
        })
    }

    /// Run `SELECT 1` to confirm the account is reachable.
    pub async fn check(&self) -> bool {
        match self.execute("SELECT 1", None).await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "snowflake connection check failed");
                false
            }
        }
    }

    /// Send a statement and return the raw response body.
    ///
    /// `statement_count` is set for multi-statement requests.
    async fn execute(&self, sql: &str, statement_count: Option<usize>) -> Result<String> {
        let request = self
            .get_request(sql, statement_count)
            .context("failed to get request for query")?;

        let response = request.send().await.context("couldn't send request")?;
        let status = response.status();
        debug!(query = sql, status = %status, "statement sent");
        let body = response.text().await.context("couldn't get body text")?;
        if !status.is_success() {
            bail!("statement failed with status {status}: {body}");
        }
        Ok(body)
    }

    /// If the URL is explicitly defined, that's used first.
    /// Otherwise, the standard account configuration
    /// is used
    fn get_url(&self) -> String {
        self.credentials.url.to_owned().unwrap_or_else(|| {
            format![
                "https://{}.snowflakecomputing.com{}",
                self.credentials.account,
                consts::STATEMENTS_PATH
            ]
        })
    }

    fn get_request(&self, sql: &str, statement_count: Option<usize>) -> Result<RequestBuilder> {
        let body = self.get_body(sql, statement_count);

        let mut request = self
            .http_client
            .post(self.get_url())
            .json(&body)
            .header(consts::CONTENT_TYPE_HEADER, "application/json")
            .header(consts::ACCEPT_HEADER, "application/json")
            .header(consts::USER_AGENT_HEADER, consts::USER_AGENT);
        if self.config.use_jwt {
            request = request
                .header(consts::AUTH_HEADER, format!["Bearer {}", self.get_jwt()?])
                .header(consts::SNOWFLAKE_AUTH_HEADER, consts::KEYPAIR_JWT);
        }
        Ok(request)
    }

    fn get_body(&self, sql: &str, statement_count: Option<usize>) -> JsonValue {
        let mut body = json!({
            "statement": sql,
            "warehouse": self.credentials.warehouse,
            "role": self.credentials.role,
        });
        if let Some(count) = statement_count {
            let mut parameters = serde_json::Map::new();
            parameters.insert(
                consts::MULTI_STATEMENT_COUNT.to_owned(),
                JsonValue::String(count.to_string()),
            );
            body["parameters"] = JsonValue::Object(parameters);
        }
        body
    }

    fn get_jwt(&self) -> Result<String> {
        let qualified_username = format![
            "{}.{}",
            self.credentials.account.to_uppercase(),
            self.credentials.user.to_uppercase()
        ];

        let claims = JwtClaims {
            exp: (get_current_timestamp() + 3600) as usize,
            iat: get_current_timestamp() as usize,
            iss: format!["{}.{}", qualified_username, self.credentials.public_key_fp],
            sub: qualified_username,
        };

        // Keys pasted into YAML tend to lose their newlines.
        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &EncodingKey::from_rsa_pem(
                self.credentials
                    .private_key
                    .replace(' ', "")
                    .replace("ENDPRIVATEKEY", "END PRIVATE KEY")
                    .replace("BEGINPRIVATEKEY", "BEGIN PRIVATE KEY")
                    .as_bytes(),
            )
            .context("invalid private key")?,
        )
        .map_err(anyhow::Error::from)
    }
}

/// Turn a statement response body into rows.
fn parse_rows(body: &str) -> Result<Rows> {
    if body.trim().is_empty() {
        return Ok(Rows::default());
    }
    let response: StatementResponse =
        serde_json::from_str(body).context("failed to deserialize response")?;
    let metadata = response.result_set_meta_data.unwrap_or_default();
    if metadata.partition_info.len() > 1 {
        bail!(
            "result is split across {} partitions; only single-partition results are supported",
            metadata.partition_info.len()
        );
    }
    let names: Vec<String> = metadata.row_type.into_iter().map(|f| f.name).collect();
    Ok(Rows::new(
        response
            .data
            .into_iter()
            .map(|values| Row::from_parts(&names, values))
            .collect(),
    ))
}

#[async_trait]
impl SqlExecutor for SnowflakeRestClient {
    async fn exec(&self, query: &str) -> Result<()> {
        self.execute(query, None).await?;
        Ok(())
    }

    async fn query(&self, query: &str) -> Result<Rows> {
        let body = self.execute(query, None).await.context("query failed")?;
        parse_rows(&body)
    }

    /// The SQL API opens a new session per request, so the batch is sent as
    /// one multi-statement request to keep the transaction intact.
    async fn exec_multi(&self, queries: &[String]) -> Result<()> {
        if queries.is_empty() {
            return Ok(());
        }
        for query in queries {
            debug!(query = query.as_str(), "batching statement");
        }
        let statement = std::iter::once("BEGIN")
            .chain(queries.iter().map(|q| q.trim_end_matches(';')))
            .chain(std::iter::once("COMMIT"))
            .collect::<Vec<_>>()
            .join(";\n");
        glacier_core::log_runtime!(
            "exec_multi",
            self.execute(&statement, Some(queries.len() + 2))
                .await
                .context("transaction failed")
        )?;
        Ok(())
    }
}
