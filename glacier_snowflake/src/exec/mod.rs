//! The seam between statement builders and whatever runs the SQL.

mod row;

pub use row::{Row, Rows};

use anyhow::{Context, Result};
use async_trait::async_trait;
use glacier_core::log_runtime;
use glacier_core::logging::{debug, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by the execution port itself rather than the driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A single-row query came back empty.
    #[error("query returned no rows")]
    NoRows,
}

/// Runs SQL against Snowflake.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a single statement, discarding any result.
    async fn exec(&self, query: &str) -> Result<()>;

    /// Run a query and return every row.
    async fn query(&self, query: &str) -> Result<Rows>;

    /// Run a query and return its first row, or [`ExecError::NoRows`].
    async fn query_row(&self, query: &str) -> Result<Row> {
        self.query(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ExecError::NoRows.into())
    }

    /// Run the statements in order inside one transaction. The first failure
    /// rolls the transaction back and is returned.
    async fn exec_multi(&self, queries: &[String]) -> Result<()> {
        log_runtime!("exec_multi", {
            self.exec("BEGIN").await.context("opening transaction")?;
            for query in queries {
                debug!(query = query.as_str(), "executing in transaction");
                if let Err(err) = self.exec(query).await {
                    warn!(error = %err, "rolling back transaction");
                    if let Err(rollback_err) = self.exec("ROLLBACK").await {
                        warn!(error = %rollback_err, "rollback failed");
                    }
                    return Err(err);
                }
            }
            self.exec("COMMIT").await.context("committing transaction")
        })
    }
}

/// Query and scan every row into `T`.
pub async fn query_all<T, E>(executor: &E, query: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    E: SqlExecutor + ?Sized,
{
    match executor.query(query).await {
        Ok(rows) => rows.scan_all(),
        Err(err) if is_no_rows(&err) => Ok(vec![]),
        Err(err) => Err(err),
    }
}

/// Query a single row and scan it into `T`. No rows is `Ok(None)`.
pub async fn query_one<T, E>(executor: &E, query: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    E: SqlExecutor + ?Sized,
{
    match executor.query_row(query).await {
        Ok(row) => row.scan().map(Some),
        Err(err) if is_no_rows(&err) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Whether an error is, at its root, [`ExecError::NoRows`].
pub fn is_no_rows(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ExecError>(), Some(ExecError::NoRows))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::bail;
    use maplit::hashmap;

    use super::*;
    use crate::entry_types::Warehouse;

    /// Records statements and fails on any statement containing `fail_on`.
    #[derive(Default)]
    struct Recorder {
        log: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
        rows: Vec<Row>,
    }

    impl Recorder {
        fn statements(&self) -> Vec<String> {
            self.log.lock().map(|l| l.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl SqlExecutor for Recorder {
        async fn exec(&self, query: &str) -> Result<()> {
            if let Ok(mut log) = self.log.lock() {
                log.push(query.to_owned());
            }
            match self.fail_on {
                Some(f) if query.contains(f) => bail!("boom: {query}"),
                _ => Ok(()),
            }
        }

        async fn query(&self, query: &str) -> Result<Rows> {
            self.exec(query).await?;
            Ok(Rows::new(self.rows.clone()))
        }
    }

    #[tokio::test]
    async fn exec_multi_commits() -> Result<()> {
        let recorder = Recorder::default();
        recorder
            .exec_multi(&["CREATE A".to_owned(), "CREATE B".to_owned()])
            .await?;
        assert_eq!(
            recorder.statements(),
            vec!["BEGIN", "CREATE A", "CREATE B", "COMMIT"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn exec_multi_rolls_back_on_first_failure() {
        let recorder = Recorder {
            fail_on: Some("BAD"),
            ..Default::default()
        };
        let err = recorder
            .exec_multi(&[
                "CREATE A".to_owned(),
                "CREATE BAD".to_owned(),
                "CREATE C".to_owned(),
            ])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom: CREATE BAD");
        assert_eq!(
            recorder.statements(),
            vec!["BEGIN", "CREATE A", "CREATE BAD", "ROLLBACK"]
        );
    }

    #[tokio::test]
    async fn query_row_without_rows_is_no_rows() {
        let recorder = Recorder::default();
        let err = recorder.query_row("SHOW WAREHOUSES").await.unwrap_err();
        assert!(is_no_rows(&err));
    }

    #[tokio::test]
    async fn list_helpers_treat_no_rows_as_empty() -> Result<()> {
        let recorder = Recorder::default();
        let all: Vec<Warehouse> = query_all(&recorder, "SHOW WAREHOUSES").await?;
        assert!(all.is_empty());
        let one: Option<Warehouse> = query_one(&recorder, "SHOW WAREHOUSES").await?;
        assert_eq!(one, None);
        Ok(())
    }

    #[tokio::test]
    async fn query_one_scans_the_first_row() -> Result<()> {
        let recorder = Recorder {
            rows: vec![Row::new(hashmap! {
                "name".to_owned() => Some("WH".to_owned()),
                "auto_resume".to_owned() => Some("true".to_owned()),
                "auto_suspend".to_owned() => Some("60".to_owned()),
            })],
            ..Default::default()
        };
        let wh: Option<Warehouse> = query_one(&recorder, "SHOW WAREHOUSES LIKE 'WH'").await?;
        let wh = wh.expect("a warehouse");
        assert_eq!(wh.name, "WH");
        assert_eq!(wh.auto_resume, Some(true));
        assert_eq!(wh.auto_suspend, Some(60));
        Ok(())
    }
}
