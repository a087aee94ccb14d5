//! What a grant applies to.

use std::fmt::Display;

use crate::sql::quote_ident;

/// Object kinds that can appear after `ON` in a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Account,
    Database,
    Schema,
    Table,
    View,
    MaterializedView,
    Stage,
    ExternalTable,
    FileFormat,
    Function,
    Procedure,
    Sequence,
    Stream,
    Pipe,
    Task,
    Warehouse,
    Integration,
    ResourceMonitor,
    MaskingPolicy,
    RowAccessPolicy,
    Tag,
    FailoverGroup,
}

impl ObjectKind {
    /// The keyword as Snowflake spells it.
    pub fn token(&self) -> &'static str {
        match self {
            ObjectKind::Account => "ACCOUNT",
            ObjectKind::Database => "DATABASE",
            ObjectKind::Schema => "SCHEMA",
            ObjectKind::Table => "TABLE",
            ObjectKind::View => "VIEW",
            ObjectKind::MaterializedView => "MATERIALIZED VIEW",
            ObjectKind::Stage => "STAGE",
            ObjectKind::ExternalTable => "EXTERNAL TABLE",
            ObjectKind::FileFormat => "FILE FORMAT",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Procedure => "PROCEDURE",
            ObjectKind::Sequence => "SEQUENCE",
            ObjectKind::Stream => "STREAM",
            ObjectKind::Pipe => "PIPE",
            ObjectKind::Task => "TASK",
            ObjectKind::Warehouse => "WAREHOUSE",
            ObjectKind::Integration => "INTEGRATION",
            ObjectKind::ResourceMonitor => "RESOURCE MONITOR",
            ObjectKind::MaskingPolicy => "MASKING POLICY",
            ObjectKind::RowAccessPolicy => "ROW ACCESS POLICY",
            ObjectKind::Tag => "TAG",
            ObjectKind::FailoverGroup => "FAILOVER GROUP",
        }
    }

    /// `TABLES`, `MATERIALIZED VIEWS`, `MASKING POLICIES`, ...
    pub fn plural(&self) -> String {
        let token = self.token();
        match token.strip_suffix('Y') {
            Some(stem) => format!("{stem}IES"),
            None => format!("{token}S"),
        }
    }

    /// Kinds a share is allowed to receive privileges on.
    pub fn shareable(&self) -> bool {
        matches!(
            self,
            ObjectKind::Database
                | ObjectKind::Schema
                | ObjectKind::Table
                | ObjectKind::View
                | ObjectKind::MaterializedView
                | ObjectKind::ExternalTable
                | ObjectKind::Function
        )
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The container an aggregate grant covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Database(String),
    Schema { database: String, schema: String },
}

impl Scope {
    /// A database scope when `schema` is empty, a schema scope otherwise.
    pub fn new(database: &str, schema: &str) -> Self {
        if schema.is_empty() {
            Scope::Database(database.to_owned())
        } else {
            Scope::Schema {
                database: database.to_owned(),
                schema: schema.to_owned(),
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Scope::Database(database) => database,
            Scope::Schema { schema, .. } => schema,
        }
    }

    pub fn qualified_name(&self) -> String {
        match self {
            Scope::Database(database) => quote_ident(database),
            Scope::Schema { database, schema } => {
                format!("{}.{}", quote_ident(database), quote_ident(schema))
            }
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Scope::Database(_) => "DATABASE",
            Scope::Schema { .. } => "SCHEMA",
        };
        write!(f, "{kind} {}", self.qualified_name())
    }
}

/// What happens to the outbound grants of an object whose owner changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentGrants {
    Copy,
    Revoke,
}

impl Display for CurrentGrants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentGrants::Copy => write!(f, "COPY CURRENT GRANTS"),
            CurrentGrants::Revoke => write!(f, "REVOKE CURRENT GRANTS"),
        }
    }
}

/// Account-level principals whose ownership can be transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipKind {
    Role,
    User,
}

impl Display for OwnershipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnershipKind::Role => write!(f, "ROLE"),
            OwnershipKind::User => write!(f, "USER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrantTarget {
    /// A single named object.
    Object {
        kind: ObjectKind,
        name: String,
        qualified_name: String,
    },
    /// The account itself. It has no name.
    Account,
    /// Every object of a kind that exists in the scope right now.
    AllExisting { kind: ObjectKind, scope: Scope },
    /// Every object of a kind created in the scope from now on.
    AllFuture { kind: ObjectKind, scope: Scope },
    /// Membership in a role.
    RoleMembership { role: String },
    /// Ownership of a role or user.
    Ownership {
        kind: OwnershipKind,
        name: String,
        current_grants: CurrentGrants,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_works() {
        assert_eq!(ObjectKind::Table.plural(), "TABLES");
        assert_eq!(ObjectKind::MaterializedView.plural(), "MATERIALIZED VIEWS");
        assert_eq!(ObjectKind::MaskingPolicy.plural(), "MASKING POLICIES");
        assert_eq!(ObjectKind::FileFormat.plural(), "FILE FORMATS");
    }

    #[test]
    fn scope_works() {
        let db = Scope::new("db", "");
        assert_eq!(db.to_string(), r#"DATABASE "db""#);
        assert_eq!(db.name(), "db");
        let schema = Scope::new("db", "PUBLIC");
        assert_eq!(schema.to_string(), r#"SCHEMA "db"."PUBLIC""#);
        assert_eq!(schema.name(), "PUBLIC");
    }
}
