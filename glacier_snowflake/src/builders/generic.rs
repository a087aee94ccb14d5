//! Property-map builder shared by account-level objects whose DDL is a flat
//! list of `KEY=value` pairs (warehouses, users, roles, integrations, ...).

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::sql::{escape_string, format_string_list, quote_ident};
use crate::{BuildResult, BuilderError};

use super::TagValue;

/// The object kinds handled by [`Builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    ApiIntegration,
    ManagedAccount,
    NotificationIntegration,
    Role,
    SecurityIntegration,
    Share,
    StorageIntegration,
    User,
    Warehouse,
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            EntityType::ApiIntegration => "API INTEGRATION",
            EntityType::ManagedAccount => "MANAGED ACCOUNT",
            EntityType::NotificationIntegration => "NOTIFICATION INTEGRATION",
            EntityType::Role => "ROLE",
            EntityType::SecurityIntegration => "SECURITY INTEGRATION",
            EntityType::Share => "SHARE",
            EntityType::StorageIntegration => "STORAGE INTEGRATION",
            EntityType::User => "USER",
            EntityType::Warehouse => "WAREHOUSE",
        };
        write!(f, "{kind}")
    }
}

/// Entry point for the generic object lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    entity_type: EntityType,
    name: String,
    /// Fixed `TYPE=...` for security integrations.
    integration_type: Option<&'static str>,
}

pub fn warehouse(name: &str) -> Builder {
    Builder::new(EntityType::Warehouse, name)
}

pub fn user(name: &str) -> Builder {
    Builder::new(EntityType::User, name)
}

pub fn role(name: &str) -> Builder {
    Builder::new(EntityType::Role, name)
}

pub fn share(name: &str) -> Builder {
    Builder::new(EntityType::Share, name)
}

pub fn managed_account(name: &str) -> Builder {
    Builder::new(EntityType::ManagedAccount, name)
}

pub fn api_integration(name: &str) -> Builder {
    Builder::new(EntityType::ApiIntegration, name)
}

pub fn notification_integration(name: &str) -> Builder {
    Builder::new(EntityType::NotificationIntegration, name)
}

pub fn storage_integration(name: &str) -> Builder {
    Builder::new(EntityType::StorageIntegration, name)
}

pub fn oauth_integration(name: &str) -> Builder {
    Builder::security_integration(name, "OAUTH")
}

pub fn saml_integration(name: &str) -> Builder {
    Builder::security_integration(name, "SAML2")
}

pub fn scim_integration(name: &str) -> Builder {
    Builder::security_integration(name, "SCIM")
}

pub fn external_oauth_integration(name: &str) -> Builder {
    Builder::security_integration(name, "EXTERNAL_OAUTH")
}

impl Builder {
    pub fn new(entity_type: EntityType, name: &str) -> Self {
        Self {
            entity_type,
            name: name.to_owned(),
            integration_type: None,
        }
    }

    fn security_integration(name: &str, integration_type: &'static str) -> Self {
        Self {
            entity_type: EntityType::SecurityIntegration,
            name: name.to_owned(),
            integration_type: Some(integration_type),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    pub fn show(&self) -> String {
        format!(
            "SHOW {}S LIKE '{}'",
            self.entity_type,
            escape_string(&self.name)
        )
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE {} {}", self.entity_type, self.qualified_name())
    }

    pub fn drop(&self) -> String {
        format!("DROP {} {}", self.entity_type, self.qualified_name())
    }

    pub fn rename(&self, new_name: &str) -> String {
        format!(
            "ALTER {} {} RENAME TO {}",
            self.entity_type,
            self.qualified_name(),
            quote_ident(new_name)
        )
    }

    /// `SHOW PARAMETERS IN <KIND> "<name>"`
    pub fn show_parameters(&self) -> String {
        format!(
            "SHOW PARAMETERS IN {} {}",
            self.entity_type,
            self.qualified_name()
        )
    }

    pub fn create(&self) -> CreateBuilder {
        let mut properties = Properties::default();
        if let Some(t) = self.integration_type {
            properties.raw = Some(format!("TYPE={t}"));
        }
        CreateBuilder {
            entity_type: self.entity_type,
            name: self.name.clone(),
            properties,
        }
    }

    pub fn alter(&self) -> AlterPropertiesBuilder {
        AlterPropertiesBuilder {
            entity_type: self.entity_type,
            name: self.name.clone(),
            properties: Properties::default(),
        }
    }

    pub fn unset(&self) -> UnsetPropertiesBuilder {
        UnsetPropertiesBuilder {
            entity_type: self.entity_type,
            name: self.name.clone(),
            keys: Default::default(),
        }
    }
}

/// Typed property maps. Keys are kept sorted so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Properties {
    pub(crate) raw: Option<String>,
    pub(crate) strings: BTreeMap<String, String>,
    pub(crate) string_lists: BTreeMap<String, Vec<String>>,
    pub(crate) bools: BTreeMap<String, bool>,
    pub(crate) ints: BTreeMap<String, i64>,
    pub(crate) floats: BTreeMap<String, f64>,
    pub(crate) tags: Vec<TagValue>,
}

impl Properties {
    /// True when no `KEY=value` pair is set. Tags are not counted.
    pub(crate) fn is_empty(&self) -> bool {
        self.raw.is_none()
            && self.strings.is_empty()
            && self.string_lists.is_empty()
            && self.bools.is_empty()
            && self.ints.is_empty()
            && self.floats.is_empty()
    }

    /// ` KEY='v' KEY=(...) KEY=true KEY=1 KEY=1.00`, strings first, then
    /// string lists, bools, ints and floats.
    pub(crate) fn render(&self) -> String {
        let mut q = String::new();
        if let Some(raw) = &self.raw {
            q.push_str(&format!(" {raw}"));
        }
        for (k, v) in &self.strings {
            q.push_str(&format!(" {}='{}'", k.to_uppercase(), escape_string(v)));
        }
        for (k, v) in &self.string_lists {
            q.push_str(&format!(" {}={}", k.to_uppercase(), format_string_list(v)));
        }
        for (k, v) in &self.bools {
            q.push_str(&format!(" {}={v}", k.to_uppercase()));
        }
        for (k, v) in &self.ints {
            q.push_str(&format!(" {}={v}", k.to_uppercase()));
        }
        for (k, v) in &self.floats {
            q.push_str(&format!(" {}={v:.2}", k.to_uppercase()));
        }
        q
    }
}

/// Generates the typed setters shared by the create and alter builders.
macro_rules! property_setters {
    ($builder:ident) => {
        impl $builder {
            pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
                self.properties
                    .strings
                    .insert(key.to_owned(), value.to_owned());
                self
            }

            pub fn set_string_list(&mut self, key: &str, value: Vec<String>) -> &mut Self {
                self.properties.string_lists.insert(key.to_owned(), value);
                self
            }

            pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
                self.properties.bools.insert(key.to_owned(), value);
                self
            }

            pub fn set_int(&mut self, key: &str, value: i64) -> &mut Self {
                self.properties.ints.insert(key.to_owned(), value);
                self
            }

            pub fn set_float(&mut self, key: &str, value: f64) -> &mut Self {
                self.properties.floats.insert(key.to_owned(), value);
                self
            }

            /// Emit a pre-rendered fragment right after the object name.
            pub fn set_raw(&mut self, raw: &str) -> &mut Self {
                self.properties.raw = Some(raw.to_owned());
                self
            }

            pub fn set_tag(&mut self, tag: TagValue) -> &mut Self {
                self.properties.tags.push(tag);
                self
            }
        }
    };
}

/// `CREATE <KIND> "<name>" ...`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBuilder {
    entity_type: EntityType,
    name: String,
    properties: Properties,
}

property_setters!(CreateBuilder);

impl CreateBuilder {
    pub fn statement(&self) -> String {
        let mut q = format!("CREATE {} {}", self.entity_type, quote_ident(&self.name));
        q.push_str(&self.properties.render());
        q.push_str(&super::with_tag_clause(&self.properties.tags));
        q
    }
}

/// `ALTER <KIND> "<name>" SET ...`
#[derive(Debug, Clone, PartialEq)]
pub struct AlterPropertiesBuilder {
    entity_type: EntityType,
    name: String,
    properties: Properties,
}

property_setters!(AlterPropertiesBuilder);

impl AlterPropertiesBuilder {
    /// One `SET KEY=value ...` statement for the properties and one
    /// `SET TAG a = 'v', ...` statement for the tags, each only when needed.
    pub fn statement(&self) -> BuildResult<Vec<String>> {
        let target = format!("{} {}", self.entity_type, quote_ident(&self.name));
        if self.properties.is_empty() && self.properties.tags.is_empty() {
            return Err(BuilderError::Empty(target));
        }
        let mut statements = vec![];
        if !self.properties.is_empty() {
            statements.push(format!("ALTER {target} SET{}", self.properties.render()));
        }
        if !self.properties.tags.is_empty() {
            let assignments = self
                .properties
                .tags
                .iter()
                .map(TagValue::assignment)
                .collect::<Vec<_>>();
            statements.push(format!("ALTER {target} SET TAG {}", assignments.join(", ")));
        }
        Ok(statements)
    }
}

/// `ALTER <KIND> "<name>" UNSET KEY, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetPropertiesBuilder {
    entity_type: EntityType,
    name: String,
    keys: std::collections::BTreeSet<String>,
}

impl UnsetPropertiesBuilder {
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.keys.insert(key.to_uppercase());
        self
    }

    pub fn statement(&self) -> BuildResult<String> {
        let target = format!("{} {}", self.entity_type, quote_ident(&self.name));
        if self.keys.is_empty() {
            return Err(BuilderError::Empty(target));
        }
        Ok(format!(
            "ALTER {target} UNSET {}",
            self.keys.iter().cloned().collect::<Vec<_>>().join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_describe_drop_rename_work() {
        let b = warehouse("wh");
        assert_eq!(b.show(), "SHOW WAREHOUSES LIKE 'wh'");
        assert_eq!(b.describe(), r#"DESCRIBE WAREHOUSE "wh""#);
        assert_eq!(b.drop(), r#"DROP WAREHOUSE "wh""#);
        assert_eq!(b.rename("wh2"), r#"ALTER WAREHOUSE "wh" RENAME TO "wh2""#);
        assert_eq!(b.show_parameters(), r#"SHOW PARAMETERS IN WAREHOUSE "wh""#);
        assert_eq!(
            api_integration("aws").show(),
            "SHOW API INTEGRATIONS LIKE 'aws'"
        );
    }

    #[test]
    fn create_orders_properties_by_type_then_key() {
        let mut c = warehouse("wh").create();
        c.set_int("max_cluster_count", 2)
            .set_bool("auto_resume", true)
            .set_string("warehouse_size", "XSMALL")
            .set_string("comment", "it's big")
            .set_int("auto_suspend", 60)
            .set_float("query_acceleration_max_scale_factor", 1.5);
        assert_eq!(
            c.statement(),
            r#"CREATE WAREHOUSE "wh" COMMENT='it\'s big' WAREHOUSE_SIZE='XSMALL' AUTO_RESUME=true AUTO_SUSPEND=60 MAX_CLUSTER_COUNT=2 QUERY_ACCELERATION_MAX_SCALE_FACTOR=1.50"#
        );
        // Same input, same bytes.
        assert_eq!(c.statement(), c.clone().statement());
    }

    #[test]
    fn create_with_lists_and_tags() {
        let mut c = user("bob").create();
        c.set_string_list("default_secondary_roles", vec!["ALL".to_owned()])
            .set_tag(TagValue::new(
                "db".into(),
                "s".into(),
                "team".into(),
                "data".into(),
            ));
        assert_eq!(
            c.statement(),
            r#"CREATE USER "bob" DEFAULT_SECONDARY_ROLES=('ALL') WITH TAG ("db"."s"."team" = 'data')"#
        );
    }

    #[test]
    fn security_integrations_carry_their_type() {
        let mut c = oauth_integration("tableau").create();
        c.set_bool("enabled", true);
        assert_eq!(
            c.statement(),
            r#"CREATE SECURITY INTEGRATION "tableau" TYPE=OAUTH ENABLED=true"#
        );
        assert_eq!(
            scim_integration("okta").create().statement(),
            r#"CREATE SECURITY INTEGRATION "okta" TYPE=SCIM"#
        );
    }

    #[test]
    fn alter_is_sorted() {
        let mut a = role("analyst").alter();
        a.set_string("comment", "new").set_bool("b", false).set_string("a", "x");
        assert_eq!(
            a.statement().unwrap(),
            vec![r#"ALTER ROLE "analyst" SET A='x' COMMENT='new' B=false"#]
        );
    }

    #[test]
    fn alter_sets_tags() {
        let mut a = warehouse("wh").alter();
        a.set_tag(TagValue::new("db".into(), "s".into(), "t".into(), "v".into()));
        assert_eq!(
            a.statement().unwrap(),
            vec![r#"ALTER WAREHOUSE "wh" SET TAG "db"."s"."t" = 'v'"#]
        );
    }

    #[test]
    fn alter_splits_properties_from_tags() {
        let mut a = warehouse("wh").alter();
        a.set_string("comment", "c")
            .set_tag(TagValue::new("db".into(), "s".into(), "t1".into(), "v1".into()))
            .set_tag(TagValue::new("db".into(), "s".into(), "t2".into(), "v2".into()));
        assert_eq!(
            a.statement().unwrap(),
            vec![
                r#"ALTER WAREHOUSE "wh" SET COMMENT='c'"#.to_owned(),
                r#"ALTER WAREHOUSE "wh" SET TAG "db"."s"."t1" = 'v1', "db"."s"."t2" = 'v2'"#
                    .to_owned(),
            ]
        );
    }

    #[test]
    fn empty_alter_is_an_error() {
        assert_eq!(
            user("bob").alter().statement(),
            Err(BuilderError::Empty(r#"USER "bob""#.to_owned()))
        );
    }

    #[test]
    fn empty_unset_is_an_error() {
        assert_eq!(
            user("bob").unset().statement(),
            Err(BuilderError::Empty(r#"USER "bob""#.to_owned()))
        );
    }

    #[test]
    fn unset_is_sorted_and_deduplicated() {
        let mut u = user("bob").unset();
        u.unset("default_role").unset("comment").unset("COMMENT");
        assert_eq!(
            u.statement().unwrap(),
            r#"ALTER USER "bob" UNSET COMMENT, DEFAULT_ROLE"#
        );
    }
}
