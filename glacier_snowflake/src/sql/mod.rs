//! Primitives for producing Snowflake-safe SQL fragments.

mod escape;
mod identifier;

pub use escape::{
    address_escape, escape_snowflake_string, escape_string, format_string_list, ip_list,
    qualified_name, quote_ident, sorted_keys, unescape_snowflake_string,
};
pub use identifier::{
    validate_identifier, AccountObjectIdentifier, DatabaseObjectIdentifier, IdentifierError,
    ObjectIdentifier, SchemaObjectIdentifier, TableColumnIdentifier,
};
