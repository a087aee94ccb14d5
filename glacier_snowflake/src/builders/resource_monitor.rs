use std::fmt::Display;

use crate::sql::quote_ident;
use crate::{BuildResult, BuilderError};

use super::generic::Properties;
use super::show_like;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Suspend,
    SuspendImmediate,
    Notify,
}

impl Display for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let a = match self {
            TriggerAction::Suspend => "SUSPEND",
            TriggerAction::SuspendImmediate => "SUSPEND_IMMEDIATE",
            TriggerAction::Notify => "NOTIFY",
        };
        write!(f, "{a}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Trigger {
    threshold: u32,
    action: TriggerAction,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMonitorBuilder {
    name: String,
    properties: Properties,
    triggers: Vec<Trigger>,
}

impl ResourceMonitorBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_credit_quota(mut self, quota: i64) -> Self {
        self.properties.ints.insert("CREDIT_QUOTA".to_owned(), quota);
        self
    }

    /// `MONTHLY`, `DAILY`, `WEEKLY`, `YEARLY` or `NEVER`.
    pub fn with_frequency(mut self, frequency: &str) -> Self {
        self.properties.strings.insert("FREQUENCY".to_owned(), frequency.to_owned());
        self
    }

    pub fn with_start_timestamp(mut self, ts: &str) -> Self {
        self.properties.strings.insert("START_TIMESTAMP".to_owned(), ts.to_owned());
        self
    }

    pub fn with_end_timestamp(mut self, ts: &str) -> Self {
        self.properties.strings.insert("END_TIMESTAMP".to_owned(), ts.to_owned());
        self
    }

    pub fn with_float(mut self, key: &str, value: f64) -> Self {
        self.properties.floats.insert(key.to_uppercase(), value);
        self
    }

    /// Triggers keep the order they are added in.
    pub fn with_trigger(mut self, threshold: u32, action: TriggerAction) -> Self {
        self.triggers.push(Trigger { threshold, action });
        self
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    fn triggers(&self) -> String {
        if self.triggers.is_empty() {
            return String::new();
        }
        let triggers = self
            .triggers
            .iter()
            .map(|t| format!("ON {} PERCENT DO {}", t.threshold, t.action))
            .collect::<Vec<_>>();
        format!(" TRIGGERS {}", triggers.join(" "))
    }

    pub fn create(&self) -> String {
        format!(
            "CREATE RESOURCE MONITOR {}{}{}",
            self.qualified_name(),
            self.properties.render(),
            self.triggers()
        )
    }

    /// Replace the properties and triggers that are set on this builder.
    pub fn alter(&self) -> BuildResult<String> {
        if self.properties.is_empty() && self.triggers.is_empty() {
            return Err(BuilderError::Empty(format!(
                "RESOURCE MONITOR {}",
                self.qualified_name()
            )));
        }
        Ok(format!(
            "ALTER RESOURCE MONITOR {} SET{}{}",
            self.qualified_name(),
            self.properties.render(),
            self.triggers()
        ))
    }

    pub fn drop(&self) -> String {
        format!("DROP RESOURCE MONITOR {}", self.qualified_name())
    }

    pub fn show(&self) -> String {
        show_like("RESOURCE MONITORS", &self.name, "", "")
    }

    pub fn set_on_account(&self) -> String {
        format!(
            "ALTER ACCOUNT SET RESOURCE_MONITOR = {}",
            self.qualified_name()
        )
    }

    pub fn set_on_warehouse(&self, warehouse: &str) -> String {
        format!(
            "ALTER WAREHOUSE {} SET RESOURCE_MONITOR = {}",
            quote_ident(warehouse),
            self.qualified_name()
        )
    }

    pub fn unset_on_warehouse(&self, warehouse: &str) -> String {
        format!(
            "ALTER WAREHOUSE {} SET RESOURCE_MONITOR = NULL",
            quote_ident(warehouse)
        )
    }
}
