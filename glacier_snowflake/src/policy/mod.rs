//! Statement generation for schema objects described by a tagged record.
//!
//! A record declared with `tagged_object!` lists three groups of fields:
//! keywords emitted before the object type (`OR REPLACE`), keywords emitted
//! after it (`IF NOT EXISTS`), and parameters (`KEY = value`). Every field
//! is optional; only the ones that are set show up in the statement.
//!
//! ```
//! use glacier_snowflake::policy::{create_statement, PasswordPolicyCreateInput};
//! use glacier_snowflake::sql::SchemaObjectIdentifier;
//!
//! let input = PasswordPolicyCreateInput {
//!     id: SchemaObjectIdentifier::new("testdb", "testschema", "testres"),
//!     or_replace: Some(true),
//!     if_not_exists: Some(false),
//!     min_length: Some(10),
//!     ..Default::default()
//! };
//! assert_eq!(
//!     create_statement(&input),
//!     "CREATE OR REPLACE PASSWORD POLICY testdb.testschema.testres PASSWORD_MIN_LENGTH = 10;"
//! );
//! ```

mod password_policy;

pub use password_policy::{
    describe_password_policy, PasswordPolicy, PasswordPolicyAlterInput,
    PasswordPolicyCreateInput, PasswordPolicyDropInput, PasswordPolicyUnsetInput,
};

use crate::entry_types::PropertyRow;
use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, format_string_list, SchemaObjectIdentifier};

/// A rendered parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl ParamValue {
    fn render(&self) -> String {
        match self {
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Str(s) => format!("'{}'", escape_string(s)),
            ParamValue::List(l) => format_string_list(l),
        }
    }
}

/// Field types a tagged record can hold as a parameter.
pub trait ParamType: Sized {
    fn to_param(&self) -> ParamValue;
    fn from_param(value: ParamValue) -> Option<Self>;
    /// Parse a DESCRIBE value. `Ok(None)` leaves the field unset.
    fn parse_param(field: &str, raw: &str) -> BuildResult<Option<Self>>;
}

impl ParamType for i64 {
    fn to_param(&self) -> ParamValue {
        ParamValue::Int(*self)
    }

    fn from_param(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Int(i) => Some(i),
            _ => None,
        }
    }

    fn parse_param(field: &str, raw: &str) -> BuildResult<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| BuilderError::InvalidField {
            field: field.to_owned(),
            value: raw.to_owned(),
        })
    }
}

impl ParamType for String {
    fn to_param(&self) -> ParamValue {
        ParamValue::Str(self.clone())
    }

    fn from_param(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn parse_param(_field: &str, raw: &str) -> BuildResult<Option<Self>> {
        Ok(Some(raw.to_owned()))
    }
}

impl ParamType for Vec<String> {
    fn to_param(&self) -> ParamValue {
        ParamValue::List(self.clone())
    }

    fn from_param(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Accepts `[a, b]`, `('a', 'b')` or a bare comma-separated list.
    fn parse_param(_field: &str, raw: &str) -> BuildResult<Option<Self>> {
        let inner = raw
            .trim()
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')']);
        Ok(Some(
            inner
                .split(',')
                .map(|v| v.trim().trim_matches('\'').to_owned())
                .filter(|v| !v.is_empty())
                .collect(),
        ))
    }
}

/// A record whose fields map onto statement positions.
pub trait TaggedObject {
    /// The object keyword, e.g. `PASSWORD POLICY`.
    const OBJECT_TYPE: &'static str;

    fn id(&self) -> &SchemaObjectIdentifier;
    fn id_mut(&mut self) -> &mut SchemaObjectIdentifier;
    /// Keywords between the verb and the object type.
    fn before_object_type(&self) -> Vec<&'static str>;
    /// Keywords between the object type and the name.
    fn after_object_type(&self) -> Vec<&'static str>;
    /// Set parameters in declaration order.
    fn parameters(&self) -> Vec<(&'static str, ParamValue)>;
    /// Set a parameter by its key.
    fn set(&mut self, key: &str, value: ParamValue) -> BuildResult<()>;
    /// Write a DESCRIBE value back into the matching parameter. Returns
    /// whether any field matched.
    fn assign(&mut self, key: &str, raw: &str) -> BuildResult<bool>;
}

/// Declare a tagged record and its [`TaggedObject`] implementation.
macro_rules! tagged_object {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $kind:literal {
            before { $($bf:ident : $bv:literal),* $(,)? }
            after { $($af:ident : $av:literal),* $(,)? }
            params { $($(#[$pmeta:meta])* $pf:ident : $pt:ty => $pk:literal),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub id: $crate::sql::SchemaObjectIdentifier,
            $(pub $bf: Option<bool>,)*
            $(pub $af: Option<bool>,)*
            $($(#[$pmeta])* pub $pf: Option<$pt>,)*
        }

        impl $crate::policy::TaggedObject for $name {
            const OBJECT_TYPE: &'static str = $kind;

            fn id(&self) -> &$crate::sql::SchemaObjectIdentifier {
                &self.id
            }

            fn id_mut(&mut self) -> &mut $crate::sql::SchemaObjectIdentifier {
                &mut self.id
            }

            #[allow(unused_mut)]
            fn before_object_type(&self) -> Vec<&'static str> {
                let mut keywords = vec![];
                $(if self.$bf == Some(true) { keywords.push($bv); })*
                keywords
            }

            #[allow(unused_mut)]
            fn after_object_type(&self) -> Vec<&'static str> {
                let mut keywords = vec![];
                $(if self.$af == Some(true) { keywords.push($av); })*
                keywords
            }

            #[allow(unused_mut)]
            fn parameters(&self) -> Vec<(&'static str, $crate::policy::ParamValue)> {
                let mut params = vec![];
                $(if let Some(value) = &self.$pf {
                    params.push(($pk, $crate::policy::ParamType::to_param(value)));
                })*
                params
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                key: &str,
                value: $crate::policy::ParamValue,
            ) -> $crate::error::BuildResult<()> {
                $(if key == $pk {
                    let rendered = format!("{:?}", value);
                    self.$pf = Some(
                        <$pt as $crate::policy::ParamType>::from_param(value).ok_or(
                            $crate::error::BuilderError::InvalidField {
                                field: $pk.to_owned(),
                                value: rendered,
                            },
                        )?,
                    );
                    return Ok(());
                })*
                Err($crate::error::BuilderError::CannotSet(key.to_owned()))
            }

            #[allow(unused_variables)]
            fn assign(&mut self, key: &str, raw: &str) -> $crate::error::BuildResult<bool> {
                $(if key == $pk {
                    self.$pf = <$pt as $crate::policy::ParamType>::parse_param($pk, raw)?;
                    return Ok(true);
                })*
                Ok(false)
            }
        }
    };
}

pub(crate) use tagged_object;

fn join_nonempty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_params<T: TaggedObject>(object: &T) -> String {
    object
        .parameters()
        .into_iter()
        .map(|(k, v)| format!("{k} = {}", v.render()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `CREATE <before> <KIND> <after> <name> <params>;`
pub fn create_statement<T: TaggedObject>(object: &T) -> String {
    let q = join_nonempty(&[
        "CREATE".to_owned(),
        object.before_object_type().join(" "),
        T::OBJECT_TYPE.to_owned(),
        object.after_object_type().join(" "),
        object.id().bare_name(),
        render_params(object),
    ]);
    format!("{q};")
}

/// `ALTER <KIND> <after> <name> SET <params>;`
pub fn alter_statement<T: TaggedObject>(object: &T) -> String {
    let q = join_nonempty(&[
        "ALTER".to_owned(),
        T::OBJECT_TYPE.to_owned(),
        object.after_object_type().join(" "),
        object.id().bare_name(),
        "SET".to_owned(),
        render_params(object),
    ]);
    format!("{q};")
}

/// `ALTER <KIND> <after> <name> UNSET <keys>;` for every set parameter.
pub fn unset_statement<T: TaggedObject>(object: &T) -> String {
    let keys = object
        .parameters()
        .into_iter()
        .map(|(k, _)| k)
        .collect::<Vec<_>>();
    let q = join_nonempty(&[
        "ALTER".to_owned(),
        T::OBJECT_TYPE.to_owned(),
        object.after_object_type().join(" "),
        object.id().bare_name(),
        "UNSET".to_owned(),
        keys.join(", "),
    ]);
    format!("{q};")
}

/// `DROP <KIND> <after> <name>;`
pub fn drop_statement<T: TaggedObject>(object: &T) -> String {
    let q = join_nonempty(&[
        "DROP".to_owned(),
        T::OBJECT_TYPE.to_owned(),
        object.after_object_type().join(" "),
        object.id().bare_name(),
    ]);
    format!("{q};")
}

/// `DESCRIBE <KIND> <name>;`
pub fn describe_statement<T: TaggedObject>(id: &SchemaObjectIdentifier) -> String {
    format!("DESCRIBE {} {};", T::OBJECT_TYPE, id.bare_name())
}

/// Fold `(property, value, default, description)` rows into a record.
/// Rows that match no parameter are skipped; `null` reads as empty.
pub fn parse_describe<T: TaggedObject + Default>(
    id: SchemaObjectIdentifier,
    rows: &[PropertyRow],
) -> BuildResult<T> {
    let mut object = T::default();
    for row in rows {
        let value = row.value.as_deref().unwrap_or_default();
        let value = if value == "null" { "" } else { value };
        object.assign(&row.property, value)?;
    }
    *object.id_mut() = id;
    Ok(object)
}

