//! Statement builders, one per Snowflake object kind.
//!
//! Every builder accumulates configuration through `with_*` methods and then
//! renders `CREATE`, `ALTER`, `DROP`, `SHOW` and `DESCRIBE` statements as
//! plain strings. Builders never touch the network.

use derive_new::new;

use crate::sql::{escape_string, qualified_name, quote_ident};

mod account;
mod database;
mod external_function;
mod external_table;
mod failover_group;
mod file_format;
mod function;
mod generic;
mod masking_policy;
mod materialized_view;
mod network_policy;
mod pipe;
mod procedure;
mod resource_monitor;
mod row_access_policy;
mod schema;
mod sequence;
mod share;
mod stage;
mod stream;
mod system_functions;
mod table;
mod tag;
mod task;
mod view;

pub use account::AccountBuilder;
pub use database::DatabaseBuilder;
pub use external_function::ExternalFunctionBuilder;
pub use external_table::{ExternalTableBuilder, ExternalTableColumn};
pub use failover_group::{FailoverGroupBuilder, ReplicationSchedule};
pub use file_format::{FileFormatBuilder, FormatOption, FormatType};
pub use function::{Argument, FunctionBuilder};
pub use generic::{
    api_integration, external_oauth_integration, managed_account, notification_integration,
    oauth_integration, role, saml_integration, scim_integration, share, storage_integration,
    user, warehouse, AlterPropertiesBuilder, Builder, CreateBuilder, EntityType,
    UnsetPropertiesBuilder,
};
pub use masking_policy::MaskingPolicyBuilder;
pub use materialized_view::MaterializedViewBuilder;
pub use network_policy::{IpListKind, NetworkPolicyBuilder};
pub use pipe::PipeBuilder;
pub use procedure::ProcedureBuilder;
pub use resource_monitor::{ResourceMonitorBuilder, TriggerAction};
pub use row_access_policy::RowAccessPolicyBuilder;
pub use schema::SchemaBuilder;
pub use sequence::SequenceBuilder;
pub use share::ShareBuilder;
pub use stage::StageBuilder;
pub use stream::StreamBuilder;
pub use system_functions::*;
pub use table::{Column, ColumnDefault, ColumnIdentity, PrimaryKey, TableBuilder};
pub use tag::{TagAssociationBuilder, TagBuilder};
pub use task::TaskBuilder;
pub use view::ViewBuilder;

/// A tag assignment: the fully-qualified tag plus the value attached.
#[derive(new, Debug, Clone, Default, PartialEq, Eq)]
pub struct TagValue {
    pub database: String,
    pub schema: String,
    pub name: String,
    pub value: String,
}

impl TagValue {
    /// The tag's three-part name.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.database, &self.schema, &self.name)
    }

    /// `"db"."schema"."tag" = 'value'`
    pub(crate) fn assignment(&self) -> String {
        format!("{} = '{}'", self.qualified_name(), escape_string(&self.value))
    }
}

/// ` WITH TAG (...)`, or nothing when there are no tags.
pub(crate) fn with_tag_clause(tags: &[TagValue]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let assignments = tags.iter().map(TagValue::assignment).collect::<Vec<_>>();
    format!(" WITH TAG ({})", assignments.join(", "))
}

/// `SHOW <PLURAL> LIKE '<name>'`, scoped to the schema or database when known.
pub(crate) fn show_like(plural: &str, name: &str, db: &str, schema: &str) -> String {
    let mut q = format!("SHOW {plural} LIKE '{}'", escape_string(name));
    match (db.is_empty(), schema.is_empty()) {
        (false, false) => q.push_str(&format!(
            " IN SCHEMA {}.{}",
            quote_ident(db),
            quote_ident(schema)
        )),
        (false, true) => q.push_str(&format!(" IN DATABASE {}", quote_ident(db))),
        _ => {}
    }
    q
}

/// Shared statements for objects that live in a schema and are addressed by
/// `db`, `schema` and `name` fields.
macro_rules! schema_object {
    ($builder:ident, $kind:literal, $plural:literal) => {
        impl $builder {
            /// The dotted, double-quoted name of the object.
            pub fn qualified_name(&self) -> String {
                $crate::sql::qualified_name(&self.db, &self.schema, &self.name)
            }

            pub fn drop(&self) -> String {
                format!("DROP {} {}", $kind, self.qualified_name())
            }

            /// Rename within the same schema.
            pub fn rename(&self, new_name: &str) -> String {
                format!(
                    "ALTER {} {} RENAME TO {}",
                    $kind,
                    self.qualified_name(),
                    $crate::sql::qualified_name(&self.db, &self.schema, new_name)
                )
            }

            pub fn show(&self) -> String {
                $crate::builders::show_like($plural, &self.name, &self.db, &self.schema)
            }

            pub fn change_comment(&self, comment: &str) -> String {
                format!(
                    "ALTER {} {} SET COMMENT = '{}'",
                    $kind,
                    self.qualified_name(),
                    $crate::sql::escape_string(comment)
                )
            }

            pub fn remove_comment(&self) -> String {
                format!("ALTER {} {} UNSET COMMENT", $kind, self.qualified_name())
            }

            pub fn add_tag(&self, tag: &$crate::builders::TagValue) -> String {
                format!(
                    "ALTER {} {} SET TAG {}",
                    $kind,
                    self.qualified_name(),
                    tag.assignment()
                )
            }

            pub fn change_tag(&self, tag: &$crate::builders::TagValue) -> String {
                self.add_tag(tag)
            }

            pub fn unset_tag(&self, tag: &$crate::builders::TagValue) -> String {
                format!(
                    "ALTER {} {} UNSET TAG {}",
                    $kind,
                    self.qualified_name(),
                    tag.qualified_name()
                )
            }
        }
    };
}

pub(crate) use schema_object;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_tag_clause_works() {
        assert_eq!(with_tag_clause(&[]), "");
        let tags = vec![
            TagValue::new("db".into(), "s".into(), "cost".into(), "eng".into()),
            TagValue::new("db".into(), "s".into(), "owner".into(), "o'brien".into()),
        ];
        assert_eq!(
            with_tag_clause(&tags),
            r#" WITH TAG ("db"."s"."cost" = 'eng', "db"."s"."owner" = 'o\'brien')"#
        );
    }

    #[test]
    fn show_like_scopes() {
        assert_eq!(show_like("TABLES", "t", "", ""), "SHOW TABLES LIKE 't'");
        assert_eq!(
            show_like("SCHEMAS", "s", "db", ""),
            r#"SHOW SCHEMAS LIKE 's' IN DATABASE "db""#
        );
        assert_eq!(
            show_like("TABLES", "t", "db", "s"),
            r#"SHOW TABLES LIKE 't' IN SCHEMA "db"."s""#
        );
    }

    #[test]
    fn schema_objects_share_naming_and_drop() {
        let (db, schema, name) = ("db", "s", "n");
        let cases: Vec<(&str, String, String)> = vec![
            {
                let b = ExternalTableBuilder::new(name, db, schema);
                ("EXTERNAL TABLE", b.qualified_name(), b.drop())
            },
            {
                let b = FileFormatBuilder::new(name, db, schema, FormatType::Csv);
                ("FILE FORMAT", b.qualified_name(), b.drop())
            },
            {
                let b = MaskingPolicyBuilder::new(name, db, schema);
                ("MASKING POLICY", b.qualified_name(), b.drop())
            },
            {
                let b = MaterializedViewBuilder::new(name)
                    .with_db(db)
                    .with_schema(schema);
                ("MATERIALIZED VIEW", b.qualified_name(), b.drop())
            },
            {
                let b = PipeBuilder::new(name, db, schema);
                ("PIPE", b.qualified_name(), b.drop())
            },
            {
                let b = RowAccessPolicyBuilder::new(name, db, schema);
                ("ROW ACCESS POLICY", b.qualified_name(), b.drop())
            },
            {
                let b = SequenceBuilder::new(name, db, schema);
                ("SEQUENCE", b.qualified_name(), b.drop())
            },
            {
                let b = StageBuilder::new(name, db, schema);
                ("STAGE", b.qualified_name(), b.drop())
            },
            {
                let b = StreamBuilder::new(name, db, schema);
                ("STREAM", b.qualified_name(), b.drop())
            },
            {
                let b = TableBuilder::new(name, db, schema);
                ("TABLE", b.qualified_name(), b.drop())
            },
            {
                let b = TagBuilder::new(name, db, schema);
                ("TAG", b.qualified_name(), b.drop())
            },
            {
                let b = TaskBuilder::new(name, db, schema);
                ("TASK", b.qualified_name(), b.drop())
            },
            {
                let b = ViewBuilder::new(name).with_db(db).with_schema(schema);
                ("VIEW", b.qualified_name(), b.drop())
            },
        ];
        for (kind, qualified, drop) in cases {
            assert_eq!(qualified, r#""db"."s"."n""#, "{kind}");
            assert_eq!(drop, format!(r#"DROP {kind} "db"."s"."n""#), "{kind}");
        }
    }

    #[test]
    fn network_policy_is_account_level() {
        let b = NetworkPolicyBuilder::new("n");
        assert_eq!(b.qualified_name(), r#""n""#);
        assert_eq!(b.drop(), r#"DROP NETWORK POLICY "n""#);
    }
}
