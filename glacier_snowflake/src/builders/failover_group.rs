use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, quote_ident};

use super::show_like;

/// How often a secondary group refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationSchedule {
    Interval(u32),
    Cron { expression: String, time_zone: String },
}

impl ReplicationSchedule {
    fn render(&self) -> String {
        match self {
            ReplicationSchedule::Interval(minutes) => format!("'{minutes} MINUTE'"),
            ReplicationSchedule::Cron {
                expression,
                time_zone,
            } => format!("'USING CRON {} {}'", escape_string(expression), time_zone),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailoverGroupBuilder {
    name: String,
    object_types: Vec<String>,
    allowed_databases: Vec<String>,
    allowed_shares: Vec<String>,
    allowed_integration_types: Vec<String>,
    allowed_accounts: Vec<String>,
    ignore_edition_check: bool,
    interval_minutes: Option<u32>,
    cron: Option<(String, String)>,
}

impl FailoverGroupBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_object_types(mut self, types: Vec<String>) -> Self {
        self.object_types = types;
        self
    }

    pub fn with_allowed_databases(mut self, databases: Vec<String>) -> Self {
        self.allowed_databases = databases;
        self
    }

    pub fn with_allowed_shares(mut self, shares: Vec<String>) -> Self {
        self.allowed_shares = shares;
        self
    }

    pub fn with_allowed_integration_types(mut self, types: Vec<String>) -> Self {
        self.allowed_integration_types = types;
        self
    }

    pub fn with_allowed_accounts(mut self, accounts: Vec<String>) -> Self {
        self.allowed_accounts = accounts;
        self
    }

    pub fn with_ignore_edition_check(mut self) -> Self {
        self.ignore_edition_check = true;
        self
    }

    pub fn with_replication_schedule_interval(mut self, minutes: u32) -> Self {
        self.interval_minutes = Some(minutes);
        self
    }

    pub fn with_replication_schedule_cron(mut self, expression: &str, time_zone: &str) -> Self {
        self.cron = Some((expression.to_owned(), time_zone.to_owned()));
        self
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    fn schedule(&self) -> BuildResult<Option<ReplicationSchedule>> {
        match (&self.interval_minutes, &self.cron) {
            (Some(_), Some(_)) => Err(BuilderError::Conflict(
                "replication schedule takes either a cron expression or an interval, not both"
                    .to_owned(),
            )),
            (Some(minutes), None) => Ok(Some(ReplicationSchedule::Interval(*minutes))),
            (None, Some((expression, time_zone))) => Ok(Some(ReplicationSchedule::Cron {
                expression: expression.clone(),
                time_zone: time_zone.clone(),
            })),
            (None, None) => Ok(None),
        }
    }

    pub fn create(&self) -> BuildResult<String> {
        let schedule = self.schedule()?;
        let mut q = format!(
            "CREATE FAILOVER GROUP {} OBJECT_TYPES = {}",
            self.qualified_name(),
            self.object_types.join(", ")
        );
        if !self.allowed_databases.is_empty() {
            q.push_str(&format!(
                " ALLOWED_DATABASES = {}",
                self.allowed_databases.join(", ")
            ));
        }
        if !self.allowed_shares.is_empty() {
            q.push_str(&format!(" ALLOWED_SHARES = {}", self.allowed_shares.join(", ")));
        }
        if !self.allowed_integration_types.is_empty() {
            q.push_str(&format!(
                " ALLOWED_INTEGRATION_TYPES = {}",
                self.allowed_integration_types.join(", ")
            ));
        }
        q.push_str(&format!(
            " ALLOWED_ACCOUNTS = {}",
            self.allowed_accounts.join(", ")
        ));
        if self.ignore_edition_check {
            q.push_str(" IGNORE EDITION CHECK");
        }
        if let Some(schedule) = schedule {
            q.push_str(&format!(" REPLICATION_SCHEDULE = {}", schedule.render()));
        }
        Ok(q)
    }

    /// `source` is `<org>.<account>.<group>`.
    pub fn create_from_replica(&self, source: &str) -> String {
        format!(
            "CREATE FAILOVER GROUP {} AS REPLICA OF {source}",
            self.qualified_name()
        )
    }

    pub fn drop(&self) -> String {
        format!("DROP FAILOVER GROUP {}", self.qualified_name())
    }

    pub fn show(&self) -> String {
        show_like("FAILOVER GROUPS", &self.name, "", "")
    }

    pub fn show_databases(&self) -> String {
        format!("SHOW DATABASES IN FAILOVER GROUP {}", self.qualified_name())
    }

    pub fn show_shares(&self) -> String {
        format!("SHOW SHARES IN FAILOVER GROUP {}", self.qualified_name())
    }

    fn alter(&self, action: &str) -> String {
        format!("ALTER FAILOVER GROUP {} {action}", self.qualified_name())
    }

    pub fn rename(&self, new_name: &str) -> String {
        self.alter(&format!("RENAME TO {}", quote_ident(new_name)))
    }

    pub fn change_object_types(&self, types: &[String]) -> String {
        self.alter(&format!("SET OBJECT_TYPES = {}", types.join(", ")))
    }

    pub fn change_allowed_integration_types(&self, types: &[String]) -> String {
        self.alter(&format!("SET ALLOWED_INTEGRATION_TYPES = {}", types.join(", ")))
    }

    pub fn change_replication_schedule(&self, schedule: &ReplicationSchedule) -> String {
        self.alter(&format!("SET REPLICATION_SCHEDULE = {}", schedule.render()))
    }

    pub fn add_allowed_databases(&self, databases: &[String]) -> String {
        self.alter(&format!("ADD {} TO ALLOWED_DATABASES", databases.join(", ")))
    }

    pub fn remove_allowed_databases(&self, databases: &[String]) -> String {
        self.alter(&format!("REMOVE {} FROM ALLOWED_DATABASES", databases.join(", ")))
    }

    pub fn add_allowed_shares(&self, shares: &[String]) -> String {
        self.alter(&format!("ADD {} TO ALLOWED_SHARES", shares.join(", ")))
    }

    pub fn remove_allowed_shares(&self, shares: &[String]) -> String {
        self.alter(&format!("REMOVE {} FROM ALLOWED_SHARES", shares.join(", ")))
    }

    pub fn add_allowed_accounts(&self, accounts: &[String]) -> String {
        self.alter(&format!("ADD {} TO ALLOWED_ACCOUNTS", accounts.join(", ")))
    }

    pub fn remove_allowed_accounts(&self, accounts: &[String]) -> String {
        self.alter(&format!("REMOVE {} FROM ALLOWED_ACCOUNTS", accounts.join(", ")))
    }

    pub fn refresh(&self) -> String {
        self.alter("REFRESH")
    }

    /// Promote a secondary group to primary.
    pub fn primary(&self) -> String {
        self.alter("PRIMARY")
    }

    pub fn suspend(&self) -> String {
        self.alter("SUSPEND")
    }

    pub fn resume(&self) -> String {
        self.alter("RESUME")
    }
}
