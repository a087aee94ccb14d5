//! Quoting and escaping helpers.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Parts made only of these characters resolve the same quoted or not.
    static ref UNQUOTED_PART: Regex = Regex::new(r"^[A-Z0-9_]+$").unwrap();
}

/// Escape a value for use inside a single-quoted literal.
///
/// Backslashes are doubled and single quotes are backslash-escaped. Nothing
/// else is touched.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', r"\\").replace('\'', r"\'")
}

/// Wrap a value in single quotes, doubling any embedded single quotes.
pub fn escape_snowflake_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Inverse of [`escape_snowflake_string`].
pub fn unescape_snowflake_string(s: &str) -> String {
    let s = s.strip_prefix('\'').unwrap_or(s);
    let s = s.strip_suffix('\'').unwrap_or(s);
    s.replace("''", "'")
}

/// Wrap an identifier in double quotes.
///
/// Embedded double quotes are doubled so the identifier survives intact.
pub fn quote_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Join identifier parts with `.`, quoting every part that would change
/// meaning if left bare.
pub fn address_escape<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| {
            let p = p.as_ref();
            if UNQUOTED_PART.is_match(p) {
                p.to_owned()
            } else {
                quote_ident(p)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Render the dotted, double-quoted name of a schema-level object.
///
/// Missing parts keep their position: `"db".."name"` when only the schema is
/// absent, `"schema"."name"` when only the database is absent. With neither,
/// the result is just `"name"` rather than `".."name"`, so account-level
/// names pass through unchanged.
pub fn qualified_name(db: &str, schema: &str, name: &str) -> String {
    let prefix = match (db.is_empty(), schema.is_empty()) {
        (false, false) => format!("{}.{}.", quote_ident(db), quote_ident(schema)),
        (false, true) => format!("{}..", quote_ident(db)),
        (true, false) => format!("{}.", quote_ident(schema)),
        (true, true) => String::new(),
    };
    format!("{prefix}{}", quote_ident(name))
}

/// Format an IP list as `('a','b')`. An empty list renders as `()`.
pub fn ip_list<S: AsRef<str>>(ips: &[S]) -> String {
    let quoted = ips
        .iter()
        .map(|ip| format!("'{}'", ip.as_ref()))
        .collect::<Vec<_>>();
    format!("({})", quoted.join(","))
}

/// Format a list of string literals as `('a', 'b')`.
pub fn format_string_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted = items
        .iter()
        .map(|i| format!("'{}'", escape_string(i.as_ref())))
        .collect::<Vec<_>>();
    format!("({})", quoted.join(", "))
}

/// The keys of a map in ascending order.
pub fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&String> {
    let mut keys: Vec<_> = map.keys().collect();
    keys.sort();
    keys
}
