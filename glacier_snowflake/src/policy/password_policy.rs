use anyhow::{Context, Result};

use super::{describe_statement, parse_describe, tagged_object};
use crate::entry_types::PropertyRow;
use crate::exec::SqlExecutor;
use crate::sql::SchemaObjectIdentifier;

tagged_object! {
    /// Input for `CREATE PASSWORD POLICY`.
    pub struct PasswordPolicyCreateInput: "PASSWORD POLICY" {
        before { or_replace: "OR REPLACE" }
        after { if_not_exists: "IF NOT EXISTS" }
        params {
            min_length: i64 => "PASSWORD_MIN_LENGTH",
            max_length: i64 => "PASSWORD_MAX_LENGTH",
            min_upper_case_chars: i64 => "PASSWORD_MIN_UPPER_CASE_CHARS",
            min_lower_case_chars: i64 => "PASSWORD_MIN_LOWER_CASE_CHARS",
            min_numeric_chars: i64 => "PASSWORD_MIN_NUMERIC_CHARS",
            min_special_chars: i64 => "PASSWORD_MIN_SPECIAL_CHARS",
            max_age_days: i64 => "PASSWORD_MAX_AGE_DAYS",
            max_retries: i64 => "PASSWORD_MAX_RETRIES",
            lockout_time_mins: i64 => "PASSWORD_LOCKOUT_TIME_MINS",
            comment: String => "COMMENT",
        }
    }
}

tagged_object! {
    /// Input for `ALTER PASSWORD POLICY ... SET`.
    pub struct PasswordPolicyAlterInput: "PASSWORD POLICY" {
        before {}
        after { if_exists: "IF EXISTS" }
        params {
            min_length: i64 => "PASSWORD_MIN_LENGTH",
            max_length: i64 => "PASSWORD_MAX_LENGTH",
            min_upper_case_chars: i64 => "PASSWORD_MIN_UPPER_CASE_CHARS",
            min_lower_case_chars: i64 => "PASSWORD_MIN_LOWER_CASE_CHARS",
            min_numeric_chars: i64 => "PASSWORD_MIN_NUMERIC_CHARS",
            min_special_chars: i64 => "PASSWORD_MIN_SPECIAL_CHARS",
            max_age_days: i64 => "PASSWORD_MAX_AGE_DAYS",
            max_retries: i64 => "PASSWORD_MAX_RETRIES",
            lockout_time_mins: i64 => "PASSWORD_LOCKOUT_TIME_MINS",
            comment: String => "COMMENT",
        }
    }
}

tagged_object! {
    /// Input for `ALTER PASSWORD POLICY ... UNSET`. The value of a set field
    /// is ignored; only its key is emitted.
    pub struct PasswordPolicyUnsetInput: "PASSWORD POLICY" {
        before {}
        after { if_exists: "IF EXISTS" }
        params {
            min_length: i64 => "PASSWORD_MIN_LENGTH",
            max_length: i64 => "PASSWORD_MAX_LENGTH",
            min_upper_case_chars: i64 => "PASSWORD_MIN_UPPER_CASE_CHARS",
            min_lower_case_chars: i64 => "PASSWORD_MIN_LOWER_CASE_CHARS",
            min_numeric_chars: i64 => "PASSWORD_MIN_NUMERIC_CHARS",
            min_special_chars: i64 => "PASSWORD_MIN_SPECIAL_CHARS",
            max_age_days: i64 => "PASSWORD_MAX_AGE_DAYS",
            max_retries: i64 => "PASSWORD_MAX_RETRIES",
            lockout_time_mins: i64 => "PASSWORD_LOCKOUT_TIME_MINS",
            comment: String => "COMMENT",
        }
    }
}

tagged_object! {
    /// Input for `DROP PASSWORD POLICY`.
    pub struct PasswordPolicyDropInput: "PASSWORD POLICY" {
        before {}
        after { if_exists: "IF EXISTS" }
        params {}
    }
}

tagged_object! {
    /// A password policy as read back from `DESCRIBE PASSWORD POLICY`.
    pub struct PasswordPolicy: "PASSWORD POLICY" {
        before {}
        after {}
        params {
            name: String => "NAME",
            owner: String => "OWNER",
            min_length: i64 => "PASSWORD_MIN_LENGTH",
            max_length: i64 => "PASSWORD_MAX_LENGTH",
            min_upper_case_chars: i64 => "PASSWORD_MIN_UPPER_CASE_CHARS",
            min_lower_case_chars: i64 => "PASSWORD_MIN_LOWER_CASE_CHARS",
            min_numeric_chars: i64 => "PASSWORD_MIN_NUMERIC_CHARS",
            min_special_chars: i64 => "PASSWORD_MIN_SPECIAL_CHARS",
            max_age_days: i64 => "PASSWORD_MAX_AGE_DAYS",
            max_retries: i64 => "PASSWORD_MAX_RETRIES",
            lockout_time_mins: i64 => "PASSWORD_LOCKOUT_TIME_MINS",
            comment: String => "COMMENT",
        }
    }
}

/// Describe a password policy and fold the result into a [`PasswordPolicy`].
pub async fn describe_password_policy<E: SqlExecutor + ?Sized>(
    executor: &E,
    id: &SchemaObjectIdentifier,
) -> Result<PasswordPolicy> {
    let rows = executor
        .query(&describe_statement::<PasswordPolicy>(id))
        .await
        .context("describing password policy")?;
    let rows: Vec<PropertyRow> = rows.scan_all()?;
    Ok(parse_describe(id.to_owned(), &rows)?)
}
