//! Grant algebra.
//!
//! A [`GrantBuilder`] picks what the grant applies to; binding a grantee
//! with [`GrantBuilder::role`], [`GrantBuilder::share`] or
//! [`GrantBuilder::user`] yields a [`GrantExecutable`] that renders the
//! `GRANT` and `REVOKE` statements.
//!
//! ```
//! use glacier_snowflake::grants::future_view_grant;
//!
//! let stmt = future_view_grant("test_db", "PUBLIC").role("bob").grant("USAGE", false);
//! assert_eq!(
//!     stmt,
//!     r#"GRANT USAGE ON FUTURE VIEWS IN SCHEMA "test_db"."PUBLIC" TO ROLE "bob""#
//! );
//! ```

mod builder;
mod target;

pub use builder::{GrantBuilder, GrantExecutable, Grantee, OWNERSHIP};
pub use target::{CurrentGrants, GrantTarget, ObjectKind, OwnershipKind, Scope};

use crate::sql::{qualified_name, quote_ident};

fn object_grant(kind: ObjectKind, name: &str, qualified_name: String) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::Object {
        kind,
        name: name.to_owned(),
        qualified_name,
    })
}

/// A grant on one object that lives in a schema.
pub fn schema_object_grant(kind: ObjectKind, db: &str, schema: &str, name: &str) -> GrantBuilder {
    object_grant(kind, name, qualified_name(db, schema, name))
}

/// A grant on every existing object of `kind` in the database (empty
/// `schema`) or schema.
pub fn all_grant(kind: ObjectKind, db: &str, schema: &str) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::AllExisting {
        kind,
        scope: Scope::new(db, schema),
    })
}

/// A grant on objects of `kind` created in the scope from now on.
pub fn future_grant(kind: ObjectKind, db: &str, schema: &str) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::AllFuture {
        kind,
        scope: Scope::new(db, schema),
    })
}

pub fn account_grant() -> GrantBuilder {
    GrantBuilder::new(GrantTarget::Account)
}

pub fn database_grant(db: &str) -> GrantBuilder {
    object_grant(ObjectKind::Database, db, quote_ident(db))
}

pub fn schema_grant(db: &str, schema: &str) -> GrantBuilder {
    object_grant(
        ObjectKind::Schema,
        schema,
        format!("{}.{}", quote_ident(db), quote_ident(schema)),
    )
}

pub fn warehouse_grant(warehouse: &str) -> GrantBuilder {
    object_grant(ObjectKind::Warehouse, warehouse, quote_ident(warehouse))
}

pub fn integration_grant(integration: &str) -> GrantBuilder {
    object_grant(ObjectKind::Integration, integration, quote_ident(integration))
}

pub fn resource_monitor_grant(monitor: &str) -> GrantBuilder {
    object_grant(ObjectKind::ResourceMonitor, monitor, quote_ident(monitor))
}

pub fn failover_group_grant(group: &str) -> GrantBuilder {
    object_grant(ObjectKind::FailoverGroup, group, quote_ident(group))
}

/// Functions are addressed with their argument types.
pub fn function_grant(db: &str, schema: &str, name: &str, arg_types: &[String]) -> GrantBuilder {
    object_grant(
        ObjectKind::Function,
        name,
        format!("{}({})", qualified_name(db, schema, name), arg_types.join(", ")),
    )
}

pub fn procedure_grant(db: &str, schema: &str, name: &str, arg_types: &[String]) -> GrantBuilder {
    object_grant(
        ObjectKind::Procedure,
        name,
        format!("{}({})", qualified_name(db, schema, name), arg_types.join(", ")),
    )
}

/// Membership of `role`, grantable to roles and users.
pub fn role_grant(role: &str) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::RoleMembership {
        role: role.to_owned(),
    })
}

pub fn role_ownership_grant(role: &str, current_grants: CurrentGrants) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::Ownership {
        kind: OwnershipKind::Role,
        name: role.to_owned(),
        current_grants,
    })
}

pub fn user_ownership_grant(user: &str, current_grants: CurrentGrants) -> GrantBuilder {
    GrantBuilder::new(GrantTarget::Ownership {
        kind: OwnershipKind::User,
        name: user.to_owned(),
        current_grants,
    })
}

/// Named constructors for each schema-level kind: the single object, all
/// existing, and future variants.
macro_rules! schema_level_grants {
    ($($kind:ident => $single:ident, $all:ident, $future:ident;)+) => {
        $(
            pub fn $single(db: &str, schema: &str, name: &str) -> GrantBuilder {
                schema_object_grant(ObjectKind::$kind, db, schema, name)
            }

            pub fn $all(db: &str, schema: &str) -> GrantBuilder {
                all_grant(ObjectKind::$kind, db, schema)
            }

            pub fn $future(db: &str, schema: &str) -> GrantBuilder {
                future_grant(ObjectKind::$kind, db, schema)
            }
        )+
    };
}

schema_level_grants! {
    Table => table_grant, all_table_grant, future_table_grant;
    View => view_grant, all_view_grant, future_view_grant;
    MaterializedView => materialized_view_grant, all_materialized_view_grant, future_materialized_view_grant;
    Stage => stage_grant, all_stage_grant, future_stage_grant;
    ExternalTable => external_table_grant, all_external_table_grant, future_external_table_grant;
    FileFormat => file_format_grant, all_file_format_grant, future_file_format_grant;
    Sequence => sequence_grant, all_sequence_grant, future_sequence_grant;
    Stream => stream_grant, all_stream_grant, future_stream_grant;
    Pipe => pipe_grant, all_pipe_grant, future_pipe_grant;
    Task => task_grant, all_task_grant, future_task_grant;
    MaskingPolicy => masking_policy_grant, all_masking_policy_grant, future_masking_policy_grant;
    RowAccessPolicy => row_access_policy_grant, all_row_access_policy_grant, future_row_access_policy_grant;
    Tag => tag_grant, all_tag_grant, future_tag_grant;
}

pub fn all_function_grant(db: &str, schema: &str) -> GrantBuilder {
    all_grant(ObjectKind::Function, db, schema)
}

pub fn future_function_grant(db: &str, schema: &str) -> GrantBuilder {
    future_grant(ObjectKind::Function, db, schema)
}

pub fn all_procedure_grant(db: &str, schema: &str) -> GrantBuilder {
    all_grant(ObjectKind::Procedure, db, schema)
}

pub fn future_procedure_grant(db: &str, schema: &str) -> GrantBuilder {
    future_grant(ObjectKind::Procedure, db, schema)
}

/// Future schemas in a database.
pub fn future_schema_grant(db: &str) -> GrantBuilder {
    future_grant(ObjectKind::Schema, db, "")
}

pub fn all_schema_grant(db: &str) -> GrantBuilder {
    all_grant(ObjectKind::Schema, db, "")
}
