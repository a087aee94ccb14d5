use crate::sql::{escape_string, quote_ident};

use super::show_like;

/// Account membership of an outbound share. Creating and commenting on the
/// share goes through the generic builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareBuilder {
    name: String,
}

impl ShareBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    pub fn create(&self, comment: Option<&str>) -> String {
        let mut q = format!("CREATE SHARE {}", self.qualified_name());
        if let Some(comment) = comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn set_accounts(&self, accounts: &[String]) -> String {
        format!(
            "ALTER SHARE {} SET ACCOUNTS = {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    pub fn add_accounts(&self, accounts: &[String]) -> String {
        format!(
            "ALTER SHARE {} ADD ACCOUNTS = {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    pub fn remove_accounts(&self, accounts: &[String]) -> String {
        format!(
            "ALTER SHARE {} REMOVE ACCOUNTS = {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    pub fn drop(&self) -> String {
        format!("DROP SHARE {}", self.qualified_name())
    }

    pub fn show(&self) -> String {
        show_like("SHARES", &self.name, "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_work() {
        let s = ShareBuilder::new("shr");
        let accounts = vec!["org.a".to_owned(), "org.b".to_owned()];
        assert_eq!(
            s.set_accounts(&accounts),
            r#"ALTER SHARE "shr" SET ACCOUNTS = org.a, org.b"#
        );
        assert_eq!(
            s.add_accounts(&accounts[..1]),
            r#"ALTER SHARE "shr" ADD ACCOUNTS = org.a"#
        );
        assert_eq!(
            s.remove_accounts(&accounts[1..]),
            r#"ALTER SHARE "shr" REMOVE ACCOUNTS = org.b"#
        );
    }

    #[test]
    fn lifecycle_works() {
        let s = ShareBuilder::new("shr");
        assert_eq!(s.create(Some("outbound")), r#"CREATE SHARE "shr" COMMENT = 'outbound'"#);
        assert_eq!(s.drop(), r#"DROP SHARE "shr""#);
        assert_eq!(s.show(), "SHOW SHARES LIKE 'shr'");
    }
}
