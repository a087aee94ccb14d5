//! Snowflake DDL layer
//!
//! Turns a desired-state description of Snowflake objects into DDL, and reads
//! `SHOW`/`DESCRIBE` output back into typed records.
//!
//! ```
//! use glacier_snowflake::builders::SchemaBuilder;
//! use glacier_snowflake::grants::{future_grant, ObjectKind};
//!
//! let schema = SchemaBuilder::new("analytics").with_db("prod").with_comment("reporting");
//! assert_eq!(
//!     schema.create(),
//!     r#"CREATE SCHEMA "prod"."analytics" COMMENT = 'reporting'"#
//! );
//!
//! let grant = future_grant(ObjectKind::Table, "prod", "analytics").role("reader");
//! assert_eq!(
//!     grant.grant("SELECT", false),
//!     r#"GRANT SELECT ON FUTURE TABLES IN SCHEMA "prod"."analytics" TO ROLE "reader""#
//! );
//! ```

mod consts;
pub mod builders;
pub mod creds;
pub mod entry_types;
mod error;
pub mod exec;
pub mod grants;
pub mod policy;
pub mod rest;
pub mod sql;

pub use creds::SnowflakeCredentials;
pub use error::{BuildResult, BuilderError};
pub use exec::{ExecError, Row, Rows, SqlExecutor};
pub use rest::{SnowflakeRestClient, SnowflakeRestConfig};
