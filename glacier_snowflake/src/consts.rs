pub const AUTH_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ACCEPT_HEADER: &str = "Accept";
pub const SNOWFLAKE_AUTH_HEADER: &str = "X-Snowflake-Authorization-Token-Type";
pub const USER_AGENT_HEADER: &str = "User-Agent";

pub const USER_AGENT: &str = "glacier";
pub const KEYPAIR_JWT: &str = "KEYPAIR_JWT";
pub const STATEMENTS_PATH: &str = "/api/v2/statements";
pub const MULTI_STATEMENT_COUNT: &str = "MULTI_STATEMENT_COUNT";
