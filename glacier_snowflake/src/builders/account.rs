use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, quote_ident};

/// An account in the organization. Requires ORGADMIN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBuilder {
    name: String,
    admin_name: String,
    admin_password: Option<String>,
    admin_rsa_public_key: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: String,
    must_change_password: bool,
    edition: String,
    region_group: Option<String>,
    region: Option<String>,
    comment: Option<String>,
}

impl AccountBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_admin_name(mut self, name: &str) -> Self {
        self.admin_name = name.to_owned();
        self
    }

    pub fn with_admin_password(mut self, password: &str) -> Self {
        self.admin_password = Some(password.to_owned());
        self
    }

    pub fn with_admin_rsa_public_key(mut self, key: &str) -> Self {
        self.admin_rsa_public_key = Some(key.to_owned());
        self
    }

    pub fn with_first_name(mut self, name: &str) -> Self {
        self.first_name = Some(name.to_owned());
        self
    }

    pub fn with_last_name(mut self, name: &str) -> Self {
        self.last_name = Some(name.to_owned());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_owned();
        self
    }

    pub fn with_must_change_password(mut self, must: bool) -> Self {
        self.must_change_password = must;
        self
    }

    /// `STANDARD`, `ENTERPRISE` or `BUSINESS_CRITICAL`.
    pub fn with_edition(mut self, edition: &str) -> Self {
        self.edition = edition.to_owned();
        self
    }

    pub fn with_region_group(mut self, group: &str) -> Self {
        self.region_group = Some(group.to_owned());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_owned());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    pub fn create(&self) -> BuildResult<String> {
        let credential = match (&self.admin_password, &self.admin_rsa_public_key) {
            (Some(password), None) => {
                format!("ADMIN_PASSWORD = '{}'", escape_string(password))
            }
            (None, Some(key)) => format!("ADMIN_RSA_PUBLIC_KEY = '{}'", escape_string(key)),
            _ => {
                return Err(BuilderError::Conflict(
                    "either adminPassword or adminRSAPublicKey must be set, but not both"
                        .to_owned(),
                ))
            }
        };

        let mut q = format!(
            "CREATE ACCOUNT {} ADMIN_NAME = '{}' {credential}",
            self.qualified_name(),
            escape_string(&self.admin_name)
        );
        if let Some(first) = &self.first_name {
            q.push_str(&format!(" FIRST_NAME = '{}'", escape_string(first)));
        }
        if let Some(last) = &self.last_name {
            q.push_str(&format!(" LAST_NAME = '{}'", escape_string(last)));
        }
        q.push_str(&format!(" EMAIL = '{}'", escape_string(&self.email)));
        if self.must_change_password {
            q.push_str(" MUST_CHANGE_PASSWORD = TRUE");
        }
        q.push_str(&format!(" EDITION = {}", self.edition));
        if let Some(group) = &self.region_group {
            q.push_str(&format!(" REGION_GROUP = {group}"));
        }
        if let Some(region) = &self.region {
            q.push_str(&format!(" REGION = {region}"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        Ok(q)
    }

    pub fn drop(&self, grace_period_in_days: u32) -> String {
        format!(
            "DROP ACCOUNT {} GRACE_PERIOD_IN_DAYS = {grace_period_in_days}",
            self.qualified_name()
        )
    }

    pub fn undrop(&self) -> String {
        format!("UNDROP ACCOUNT {}", self.qualified_name())
    }

    pub fn rename(&self, new_name: &str) -> String {
        format!(
            "ALTER ACCOUNT {} RENAME TO {}",
            self.qualified_name(),
            quote_ident(new_name)
        )
    }

    pub fn show(&self) -> String {
        format!(
            "SHOW ORGANIZATION ACCOUNTS LIKE '{}'",
            escape_string(&self.name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn account() -> AccountBuilder {
        AccountBuilder::new("acct")
            .with_admin_name("admin")
            .with_email("a@b.c")
            .with_edition("ENTERPRISE")
    }

    #[test]
    fn create_with_password_works() -> Result<()> {
        let a = account()
            .with_admin_password("p'w")
            .with_first_name("Ann")
            .with_must_change_password(true)
            .with_region("AWS_US_WEST_2")
            .with_comment("new");
        assert_eq!(
            a.create()?,
            r#"CREATE ACCOUNT "acct" ADMIN_NAME = 'admin' ADMIN_PASSWORD = 'p\'w' FIRST_NAME = 'Ann' EMAIL = 'a@b.c' MUST_CHANGE_PASSWORD = TRUE EDITION = ENTERPRISE REGION = AWS_US_WEST_2 COMMENT = 'new'"#
        );
        Ok(())
    }

    #[test]
    fn create_with_key_works() -> Result<()> {
        let a = account().with_admin_rsa_public_key("MIIB");
        assert_eq!(
            a.create()?,
            r#"CREATE ACCOUNT "acct" ADMIN_NAME = 'admin' ADMIN_RSA_PUBLIC_KEY = 'MIIB' EMAIL = 'a@b.c' EDITION = ENTERPRISE"#
        );
        Ok(())
    }

    #[test]
    fn credentials_are_exclusive() {
        let msg = "either adminPassword or adminRSAPublicKey must be set, but not both";
        assert_eq!(account().create().unwrap_err().to_string(), msg);
        let both = account()
            .with_admin_password("x")
            .with_admin_rsa_public_key("y");
        assert_eq!(both.create().unwrap_err().to_string(), msg);
    }

    #[test]
    fn lifecycle_works() {
        let a = account();
        assert_eq!(a.drop(3), r#"DROP ACCOUNT "acct" GRACE_PERIOD_IN_DAYS = 3"#);
        assert_eq!(a.undrop(), r#"UNDROP ACCOUNT "acct""#);
        assert_eq!(a.rename("b"), r#"ALTER ACCOUNT "acct" RENAME TO "b""#);
        assert_eq!(a.show(), "SHOW ORGANIZATION ACCOUNTS LIKE 'acct'");
    }
}
