use std::fmt::Display;

use crate::sql::{escape_string, ip_list, quote_ident};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpListKind {
    Allowed,
    Blocked,
}

impl Display for IpListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpListKind::Allowed => write!(f, "ALLOWED_IP_LIST"),
            IpListKind::Blocked => write!(f, "BLOCKED_IP_LIST"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkPolicyBuilder {
    name: String,
    allowed_ips: Vec<String>,
    blocked_ips: Vec<String>,
    comment: Option<String>,
}

impl NetworkPolicyBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_allowed_ip_list(mut self, ips: Vec<String>) -> Self {
        self.allowed_ips = ips;
        self
    }

    pub fn with_blocked_ip_list(mut self, ips: Vec<String>) -> Self {
        self.blocked_ips = ips;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    pub fn create(&self) -> String {
        let mut q = format!(
            "CREATE NETWORK POLICY {} ALLOWED_IP_LIST={}",
            self.qualified_name(),
            ip_list(&self.allowed_ips)
        );
        if !self.blocked_ips.is_empty() {
            q.push_str(&format!(" BLOCKED_IP_LIST={}", ip_list(&self.blocked_ips)));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn change_ip_list(&self, kind: IpListKind, ips: &[String]) -> String {
        format!(
            "ALTER NETWORK POLICY {} SET {kind} = {}",
            self.qualified_name(),
            ip_list(ips)
        )
    }

    pub fn change_comment(&self, comment: &str) -> String {
        format!(
            "ALTER NETWORK POLICY {} SET COMMENT = '{}'",
            self.qualified_name(),
            escape_string(comment)
        )
    }

    pub fn remove_comment(&self) -> String {
        format!("ALTER NETWORK POLICY {} UNSET COMMENT", self.qualified_name())
    }

    pub fn drop(&self) -> String {
        format!("DROP NETWORK POLICY {}", self.qualified_name())
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE NETWORK POLICY {}", self.qualified_name())
    }

    /// Network policies can't be filtered with LIKE.
    pub fn show(&self) -> String {
        "SHOW NETWORK POLICIES".to_owned()
    }

    pub fn set_on_account(&self) -> String {
        format!("ALTER ACCOUNT SET NETWORK_POLICY = {}", self.qualified_name())
    }

    pub fn unset_on_account(&self) -> String {
        "ALTER ACCOUNT UNSET NETWORK_POLICY".to_owned()
    }

    pub fn set_on_user(&self, user: &str) -> String {
        format!(
            "ALTER USER {} SET NETWORK_POLICY = {}",
            quote_ident(user),
            self.qualified_name()
        )
    }

    pub fn unset_on_user(&self, user: &str) -> String {
        format!("ALTER USER {} UNSET NETWORK_POLICY", quote_ident(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_works() {
        let p = NetworkPolicyBuilder::new("np")
            .with_allowed_ip_list(vec!["10.0.0.0/8".into(), "192.168.0.1".into()])
            .with_blocked_ip_list(vec!["10.0.0.7".into()])
            .with_comment("office");
        assert_eq!(
            p.create(),
            r#"CREATE NETWORK POLICY "np" ALLOWED_IP_LIST=('10.0.0.0/8','192.168.0.1') BLOCKED_IP_LIST=('10.0.0.7') COMMENT = 'office'"#
        );
        assert_eq!(
            NetworkPolicyBuilder::new("np").create(),
            r#"CREATE NETWORK POLICY "np" ALLOWED_IP_LIST=()"#
        );
    }

    #[test]
    fn alters_work() {
        let p = NetworkPolicyBuilder::new("np");
        assert_eq!(
            p.change_ip_list(IpListKind::Blocked, &["1.1.1.1".into()]),
            r#"ALTER NETWORK POLICY "np" SET BLOCKED_IP_LIST = ('1.1.1.1')"#
        );
        assert_eq!(
            p.change_ip_list(IpListKind::Allowed, &[]),
            r#"ALTER NETWORK POLICY "np" SET ALLOWED_IP_LIST = ()"#
        );
        assert_eq!(p.describe(), r#"DESCRIBE NETWORK POLICY "np""#);
        assert_eq!(p.show(), "SHOW NETWORK POLICIES");
    }

    #[test]
    fn attachments_work() {
        let p = NetworkPolicyBuilder::new("np");
        assert_eq!(p.set_on_account(), r#"ALTER ACCOUNT SET NETWORK_POLICY = "np""#);
        assert_eq!(p.unset_on_account(), "ALTER ACCOUNT UNSET NETWORK_POLICY");
        assert_eq!(p.set_on_user("bob"), r#"ALTER USER "bob" SET NETWORK_POLICY = "np""#);
        assert_eq!(p.unset_on_user("bob"), r#"ALTER USER "bob" UNSET NETWORK_POLICY"#);
    }
}
