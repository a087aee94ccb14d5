use std::collections::HashMap;

use crate::sql::{escape_string, quote_ident, sorted_keys};

use super::{schema_object, system_functions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBuilder {
    name: String,
    db: String,
    schema: String,
    warehouse: Option<String>,
    managed_initial_warehouse_size: Option<String>,
    schedule: Option<String>,
    session_parameters: HashMap<String, String>,
    comment: Option<String>,
    timeout_ms: i64,
    allow_overlapping_execution: bool,
    after: Vec<String>,
    when: Option<String>,
    statement: String,
}

schema_object!(TaskBuilder, "TASK", "TASKS");

impl TaskBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_warehouse(mut self, warehouse: &str) -> Self {
        self.warehouse = Some(warehouse.to_owned());
        self
    }

    /// Serverless tasks pick a starting size instead of a warehouse.
    pub fn with_initial_warehouse_size(mut self, size: &str) -> Self {
        self.managed_initial_warehouse_size = Some(size.to_owned());
        self
    }

    pub fn with_schedule(mut self, schedule: &str) -> Self {
        self.schedule = Some(schedule.to_owned());
        self
    }

    pub fn with_session_parameters(mut self, params: HashMap<String, String>) -> Self {
        self.session_parameters = params;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_timeout_in_ms(mut self, timeout: i64) -> Self {
        self.timeout_ms = timeout;
        self
    }

    pub fn with_allow_overlapping_execution(mut self, allow: bool) -> Self {
        self.allow_overlapping_execution = allow;
        self
    }

    pub fn with_after(mut self, after: Vec<String>) -> Self {
        self.after = after;
        self
    }

    pub fn with_condition(mut self, when: &str) -> Self {
        self.when = Some(when.to_owned());
        self
    }

    pub fn with_statement(mut self, statement: &str) -> Self {
        self.statement = statement.to_owned();
        self
    }

    fn task_name(&self, name: &str) -> String {
        crate::sql::qualified_name(&self.db, &self.schema, name)
    }

    fn render_params(params: &HashMap<String, String>) -> String {
        sorted_keys(params)
            .into_iter()
            .map(|k| format!("{k} = '{}'", escape_string(&params[k])))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn create(&self) -> String {
        let mut q = format!("CREATE TASK {}", self.qualified_name());
        if let Some(wh) = &self.warehouse {
            q.push_str(&format!(" WAREHOUSE = {}", quote_ident(wh)));
        } else if let Some(size) = &self.managed_initial_warehouse_size {
            q.push_str(&format!(
                " USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE = '{}'",
                escape_string(size)
            ));
        }
        if let Some(schedule) = &self.schedule {
            q.push_str(&format!(" SCHEDULE = '{}'", escape_string(schedule)));
        }
        if !self.session_parameters.is_empty() {
            q.push_str(&format!(" {}", Self::render_params(&self.session_parameters)));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        if self.timeout_ms > 0 {
            q.push_str(&format!(" USER_TASK_TIMEOUT_MS = {}", self.timeout_ms));
        }
        if self.allow_overlapping_execution {
            q.push_str(" ALLOW_OVERLAPPING_EXECUTION = TRUE");
        }
        if !self.after.is_empty() {
            let after = self
                .after
                .iter()
                .map(|a| self.task_name(a))
                .collect::<Vec<_>>();
            q.push_str(&format!(" AFTER {}", after.join(", ")));
        }
        if let Some(when) = &self.when {
            q.push_str(&format!(" WHEN {when}"));
        }
        q.push_str(&format!(" AS {}", self.statement));
        q
    }

    fn alter(&self, action: &str) -> String {
        format!("ALTER TASK {} {action}", self.qualified_name())
    }

    pub fn change_warehouse(&self, warehouse: &str) -> String {
        self.alter(&format!("SET WAREHOUSE = {}", quote_ident(warehouse)))
    }

    /// Hand the task back to serverless compute.
    pub fn switch_warehouse_to_managed(&self) -> String {
        self.alter("SET WAREHOUSE = null")
    }

    pub fn change_initial_warehouse_size(&self, size: &str) -> String {
        self.alter(&format!(
            "SET USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE = '{}'",
            escape_string(size)
        ))
    }

    pub fn remove_warehouse(&self) -> String {
        self.alter("UNSET WAREHOUSE")
    }

    pub fn change_schedule(&self, schedule: &str) -> String {
        self.alter(&format!("SET SCHEDULE = '{}'", escape_string(schedule)))
    }

    pub fn remove_schedule(&self) -> String {
        self.alter("UNSET SCHEDULE")
    }

    pub fn change_timeout(&self, timeout: i64) -> String {
        self.alter(&format!("SET USER_TASK_TIMEOUT_MS = {timeout}"))
    }

    pub fn remove_timeout(&self) -> String {
        self.alter("UNSET USER_TASK_TIMEOUT_MS")
    }

    pub fn change_allow_overlapping_execution(&self, allow: bool) -> String {
        self.alter(&format!(
            "SET ALLOW_OVERLAPPING_EXECUTION = {}",
            allow.to_string().to_uppercase()
        ))
    }

    pub fn add_session_parameters(&self, params: &HashMap<String, String>) -> String {
        self.alter(&format!("SET {}", Self::render_params(params)))
    }

    pub fn remove_session_parameters(&self, params: &HashMap<String, String>) -> String {
        let keys = sorted_keys(params)
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        self.alter(&format!("UNSET {}", keys.join(", ")))
    }

    pub fn add_after(&self, after: &[String]) -> String {
        let after = after.iter().map(|a| self.task_name(a)).collect::<Vec<_>>();
        self.alter(&format!("ADD AFTER {}", after.join(", ")))
    }

    pub fn remove_after(&self, after: &[String]) -> String {
        let after = after.iter().map(|a| self.task_name(a)).collect::<Vec<_>>();
        self.alter(&format!("REMOVE AFTER {}", after.join(", ")))
    }

    pub fn change_condition(&self, when: &str) -> String {
        self.alter(&format!("MODIFY WHEN {when}"))
    }

    pub fn change_sql_statement(&self, statement: &str) -> String {
        self.alter(&format!("MODIFY AS {statement}"))
    }

    pub fn suspend(&self) -> String {
        self.alter("SUSPEND")
    }

    pub fn resume(&self) -> String {
        self.alter("RESUME")
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE TASK {}", self.qualified_name())
    }

    pub fn show_parameters(&self) -> String {
        format!("SHOW PARAMETERS IN TASK {}", self.qualified_name())
    }

    /// Resume this task and every task downstream of it.
    pub fn enable_dependents(&self) -> String {
        system_functions::task_dependents_enable(&self.db, &self.schema, &self.name)
    }
}
