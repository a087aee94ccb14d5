use crate::error::BuildResult;
use crate::sql::{escape_string, qualified_name};

use super::function::{routine_setters, Routine};
use super::show_like;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureBuilder {
    routine: Routine,
    execute_as: Option<String>,
}

routine_setters!(ProcedureBuilder);

const KIND: &str = "procedure";

impl ProcedureBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            routine: Routine::new(name, db, schema),
            execute_as: None,
        }
    }

    /// `OWNER` or `CALLER`.
    pub fn with_execute_as(mut self, execute_as: &str) -> Self {
        self.execute_as = Some(execute_as.to_owned());
        self
    }

    pub fn qualified_name(&self) -> BuildResult<String> {
        self.routine.qualified_name(KIND)
    }

    pub fn qualified_name_without_arguments(&self) -> BuildResult<String> {
        self.routine.qualified_name_without_arguments(KIND)
    }

    pub fn create(&self) -> BuildResult<String> {
        let r = &self.routine;
        let mut q = String::from("CREATE OR REPLACE");
        if r.secure {
            q.push_str(" SECURE");
        }
        q.push_str(&format!(
            " PROCEDURE {}{} RETURNS {}",
            self.qualified_name_without_arguments()?,
            r.signature(),
            r.return_type
        ));
        if let Some(language) = &r.language {
            q.push_str(&format!(" LANGUAGE {language}"));
        }
        q.push_str(&r.runtime_clauses());
        q.push_str(&r.behavior_clauses());
        q.push_str(&r.comment_clause());
        if let Some(execute_as) = &self.execute_as {
            q.push_str(&format!(" EXECUTE AS {execute_as}"));
        }
        q.push_str(&format!(" AS $${}$$", r.body));
        Ok(q)
    }

    pub fn drop(&self) -> BuildResult<String> {
        Ok(format!("DROP PROCEDURE {}", self.qualified_name()?))
    }

    pub fn describe(&self) -> BuildResult<String> {
        Ok(format!("DESCRIBE PROCEDURE {}", self.qualified_name()?))
    }

    pub fn show(&self) -> String {
        show_like(
            "PROCEDURES",
            &self.routine.name,
            &self.routine.db,
            &self.routine.schema,
        )
    }

    pub fn rename(&self, new_name: &str) -> BuildResult<String> {
        Ok(format!(
            "ALTER PROCEDURE {} RENAME TO {}",
            self.qualified_name()?,
            qualified_name(&self.routine.db, &self.routine.schema, new_name)
        ))
    }

    pub fn change_comment(&self, comment: &str) -> BuildResult<String> {
        Ok(format!(
            "ALTER PROCEDURE {} SET COMMENT = '{}'",
            self.qualified_name()?,
            escape_string(comment)
        ))
    }

    pub fn remove_comment(&self) -> BuildResult<String> {
        Ok(format!("ALTER PROCEDURE {} UNSET COMMENT", self.qualified_name()?))
    }

    pub fn change_execute_as(&self, execute_as: &str) -> BuildResult<String> {
        Ok(format!(
            "ALTER PROCEDURE {} EXECUTE AS {execute_as}",
            self.qualified_name()?
        ))
    }
}
