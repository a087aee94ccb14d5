//! User-defined functions, plus the pieces shared with stored procedures.

use derive_new::new;

use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, format_string_list, qualified_name};

use super::show_like;

/// A named, typed routine argument.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub arg_type: String,
}

/// Configuration common to functions and procedures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Routine {
    pub(crate) name: String,
    pub(crate) db: String,
    pub(crate) schema: String,
    pub(crate) args: Vec<Argument>,
    pub(crate) return_type: String,
    pub(crate) language: Option<String>,
    pub(crate) null_input_behavior: Option<String>,
    pub(crate) return_behavior: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) runtime_version: Option<String>,
    pub(crate) packages: Vec<String>,
    pub(crate) imports: Vec<String>,
    pub(crate) handler: Option<String>,
    pub(crate) target_path: Option<String>,
    pub(crate) secure: bool,
    pub(crate) body: String,
}

impl Routine {
    pub(crate) fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub(crate) fn qualified_name_without_arguments(&self, kind: &'static str) -> BuildResult<String> {
        if self.db.is_empty() || self.schema.is_empty() || self.name.is_empty() {
            return Err(BuilderError::IncompleteName { kind });
        }
        Ok(qualified_name(&self.db, &self.schema, &self.name))
    }

    /// The name plus argument types, which together identify an overload.
    pub(crate) fn qualified_name(&self, kind: &'static str) -> BuildResult<String> {
        let types = self
            .args
            .iter()
            .map(|a| a.arg_type.as_str())
            .collect::<Vec<_>>();
        Ok(format!(
            "{}({})",
            self.qualified_name_without_arguments(kind)?,
            types.join(", ")
        ))
    }

    /// `(a VARCHAR, b NUMBER)`
    pub(crate) fn signature(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|a| format!("{} {}", a.name, a.arg_type))
            .collect::<Vec<_>>();
        format!("({})", args.join(", "))
    }

    pub(crate) fn behavior_clauses(&self) -> String {
        let mut q = String::new();
        if let Some(b) = &self.null_input_behavior {
            q.push_str(&format!(" {b}"));
        }
        if let Some(b) = &self.return_behavior {
            q.push_str(&format!(" {b}"));
        }
        q
    }

    pub(crate) fn comment_clause(&self) -> String {
        self.comment
            .as_ref()
            .map(|c| format!(" COMMENT = '{}'", escape_string(c)))
            .unwrap_or_default()
    }

    /// Runtime, packages, imports, handler and target path.
    pub(crate) fn runtime_clauses(&self) -> String {
        let mut q = String::new();
        if let Some(v) = &self.runtime_version {
            q.push_str(&format!(" RUNTIME_VERSION = '{}'", escape_string(v)));
        }
        if !self.packages.is_empty() {
            q.push_str(&format!(" PACKAGES = {}", format_string_list(&self.packages)));
        }
        if !self.imports.is_empty() {
            q.push_str(&format!(" IMPORTS = {}", format_string_list(&self.imports)));
        }
        if let Some(h) = &self.handler {
            q.push_str(&format!(" HANDLER = '{}'", escape_string(h)));
        }
        if let Some(p) = &self.target_path {
            q.push_str(&format!(" TARGET_PATH = '{}'", escape_string(p)));
        }
        q
    }
}

/// Generates the `with_*` setters shared by functions and procedures.
macro_rules! routine_setters {
    ($builder:ident) => {
        impl $builder {
            pub fn with_args(mut self, args: Vec<$crate::builders::Argument>) -> Self {
                self.routine.args = args;
                self
            }

            pub fn with_return_type(mut self, return_type: &str) -> Self {
                self.routine.return_type = return_type.to_owned();
                self
            }

            pub fn with_language(mut self, language: &str) -> Self {
                self.routine.language = Some(language.to_owned());
                self
            }

            /// `CALLED ON NULL INPUT` or `RETURNS NULL ON NULL INPUT`.
            pub fn with_null_input_behavior(mut self, behavior: &str) -> Self {
                self.routine.null_input_behavior = Some(behavior.to_owned());
                self
            }

            /// `VOLATILE` or `IMMUTABLE`.
            pub fn with_return_behavior(mut self, behavior: &str) -> Self {
                self.routine.return_behavior = Some(behavior.to_owned());
                self
            }

            pub fn with_comment(mut self, comment: &str) -> Self {
                self.routine.comment = Some(comment.to_owned());
                self
            }

            pub fn with_runtime_version(mut self, version: &str) -> Self {
                self.routine.runtime_version = Some(version.to_owned());
                self
            }

            pub fn with_packages(mut self, packages: Vec<String>) -> Self {
                self.routine.packages = packages;
                self
            }

            pub fn with_imports(mut self, imports: Vec<String>) -> Self {
                self.routine.imports = imports;
                self
            }

            pub fn with_handler(mut self, handler: &str) -> Self {
                self.routine.handler = Some(handler.to_owned());
                self
            }

            pub fn with_target_path(mut self, path: &str) -> Self {
                self.routine.target_path = Some(path.to_owned());
                self
            }

            pub fn with_secure(mut self) -> Self {
                self.routine.secure = true;
                self
            }

            pub fn with_body(mut self, body: &str) -> Self {
                self.routine.body = body.to_owned();
                self
            }

            pub fn arg_types(&self) -> Vec<String> {
                self.routine
                    .args
                    .iter()
                    .map(|a| a.arg_type.clone())
                    .collect()
            }
        }
    };
}

pub(crate) use routine_setters;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBuilder {
    routine: Routine,
}

routine_setters!(FunctionBuilder);

const KIND: &str = "function";

impl FunctionBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            routine: Routine::new(name, db, schema),
        }
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
            " FUNCTION {}{} RETURNS {}",
            self.qualified_name_without_arguments()?,
            r.signature(),
            r.return_type
        ));
        if let Some(language) = &r.language {
            q.push_str(&format!(" LANGUAGE {language}"));
        }
        q.push_str(&r.behavior_clauses());
        q.push_str(&r.comment_clause());
        q.push_str(&r.runtime_clauses());
        q.push_str(&format!(" AS $${}$$", r.body));
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
            "USER FUNCTIONS",
            &self.routine.name,
            &self.routine.db,
            &self.routine.schema,
        )
    }

    pub fn rename(&self, new_name: &str) -> BuildResult<String> {
        Ok(format!(
            "ALTER FUNCTION {} RENAME TO {}",
            self.qualified_name()?,
            qualified_name(&self.routine.db, &self.routine.schema, new_name)
        ))
    }

    pub fn change_comment(&self, comment: &str) -> BuildResult<String> {
        Ok(format!(
            "ALTER FUNCTION {} SET COMMENT = '{}'",
            self.qualified_name()?,
            escape_string(comment)
        ))
    }

    pub fn remove_comment(&self) -> BuildResult<String> {
        Ok(format!("ALTER FUNCTION {} UNSET COMMENT", self.qualified_name()?))
    }

    pub fn change_secure(&self, secure: bool) -> BuildResult<String> {
        let verb = if secure { "SET" } else { "UNSET" };
        Ok(format!("ALTER FUNCTION {} {verb} SECURE", self.qualified_name()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn function() -> FunctionBuilder {
        FunctionBuilder::new("add", "db", "s").with_args(vec![
            Argument::new("a".into(), "NUMBER".into()),
            Argument::new("b".into(), "NUMBER".into()),
        ])
    }

    #[test]
    fn qualified_name_includes_types() -> Result<()> {
        assert_eq!(function().qualified_name()?, r#""db"."s"."add"(NUMBER, NUMBER)"#);
        assert_eq!(
            function().qualified_name_without_arguments()?,
            r#""db"."s"."add""#
        );
        Ok(())
    }

    #[test]
    fn incomplete_name_is_an_error() {
        let f = FunctionBuilder::new("add", "", "s");
        let err = f.qualified_name().unwrap_err();
        assert_eq!(
            err.to_string(),
            "function must specify a database, a schema, and a name"
        );
        assert!(f.create().is_err());
    }

    #[test]
    fn create_sql_works() -> Result<()> {
        let f = function()
            .with_return_type("NUMBER")
            .with_language("SQL")
            .with_return_behavior("IMMUTABLE")
            .with_comment("adds")
            .with_body("a + b");
        assert_eq!(
            f.create()?,
            r#"CREATE OR REPLACE FUNCTION "db"."s"."add"(a NUMBER, b NUMBER) RETURNS NUMBER LANGUAGE SQL IMMUTABLE COMMENT = 'adds' AS $$a + b$$"#
        );
        Ok(())
    }

    #[test]
    fn create_python_works() -> Result<()> {
        let f = FunctionBuilder::new("f", "db", "s")
            .with_secure()
            .with_return_type("VARCHAR")
            .with_language("PYTHON")
            .with_null_input_behavior("RETURNS NULL ON NULL INPUT")
            .with_runtime_version("3.8")
            .with_packages(vec!["numpy".into()])
            .with_handler("run")
            .with_body("def run(): return 'x'");
        assert_eq!(
            f.create()?,
            r#"CREATE OR REPLACE SECURE FUNCTION "db"."s"."f"() RETURNS VARCHAR LANGUAGE PYTHON RETURNS NULL ON NULL INPUT RUNTIME_VERSION = '3.8' PACKAGES = ('numpy') HANDLER = 'run' AS $$def run(): return 'x'$$"#
        );
        Ok(())
    }

    #[test]
    fn lifecycle_works() -> Result<()> {
        let f = function();
        assert_eq!(f.drop()?, r#"DROP FUNCTION "db"."s"."add"(NUMBER, NUMBER)"#);
        assert_eq!(
            f.rename("plus")?,
            r#"ALTER FUNCTION "db"."s"."add"(NUMBER, NUMBER) RENAME TO "db"."s"."plus""#
        );
        assert_eq!(
            f.change_comment("c")?,
            r#"ALTER FUNCTION "db"."s"."add"(NUMBER, NUMBER) SET COMMENT = 'c'"#
        );
        assert_eq!(
            f.show(),
            r#"SHOW USER FUNCTIONS LIKE 'add' IN SCHEMA "db"."s""#
        );
        assert_eq!(f.arg_types(), vec!["NUMBER".to_owned(), "NUMBER".to_owned()]);
        Ok(())
    }
}
