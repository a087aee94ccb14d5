use crate::error::{BuildResult, BuilderError};
use crate::sql::{escape_string, quote_ident};

use super::{show_like, with_tag_clause, TagValue};

/// Where a database's content comes from, when it is not created empty.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Clone(String),
    Share {
        organization: Option<String>,
        account: String,
        share: String,
    },
    Replica(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseBuilder {
    name: String,
    transient: bool,
    source: Option<Source>,
    data_retention_days: Option<i32>,
    comment: Option<String>,
    tags: Vec<TagValue>,
}

impl DatabaseBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn with_clone(mut self, source: &str) -> Self {
        self.source = Some(Source::Clone(source.to_owned()));
        self
    }

    /// `FROM SHARE [<org>.]<account>.<share>`
    pub fn from_share(mut self, organization: Option<&str>, account: &str, share: &str) -> Self {
        self.source = Some(Source::Share {
            organization: organization.map(str::to_owned),
            account: account.to_owned(),
            share: share.to_owned(),
        });
        self
    }

    /// `AS REPLICA OF <org>.<account>.<db>`, already dotted.
    pub fn from_replica(mut self, source: &str) -> Self {
        self.source = Some(Source::Replica(source.to_owned()));
        self
    }

    pub fn with_data_retention_days(mut self, days: i32) -> Self {
        self.data_retention_days = Some(days);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagValue>) -> Self {
        self.tags = tags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    pub fn create(&self) -> BuildResult<String> {
        let mut q = String::from("CREATE");
        if self.transient {
            if matches!(self.source, Some(Source::Replica(_)) | Some(Source::Share { .. })) {
                return Err(BuilderError::Conflict(
                    "a transient database can't be created from a share or replica".to_owned(),
                ));
            }
            q.push_str(" TRANSIENT");
        }
        q.push_str(&format!(" DATABASE {}", self.qualified_name()));

        match &self.source {
            Some(Source::Replica(src)) => {
                q.push_str(&format!(" AS REPLICA OF {src}"));
                return Ok(q);
            }
            Some(Source::Share {
                organization,
                account,
                share,
            }) => {
                let mut parts = vec![];
                if let Some(org) = organization {
                    parts.push(quote_ident(org));
                }
                parts.push(quote_ident(account));
                parts.push(quote_ident(share));
                q.push_str(&format!(" FROM SHARE {}", parts.join(".")));
                return Ok(q);
            }
            Some(Source::Clone(src)) => q.push_str(&format!(" CLONE {}", quote_ident(src))),
            None => {}
        }

        if let Some(days) = self.data_retention_days {
            q.push_str(&format!(" DATA_RETENTION_TIME_IN_DAYS = {days}"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        Ok(q)
    }

    pub fn drop(&self) -> String {
        format!("DROP DATABASE {}", self.qualified_name())
    }

    pub fn undrop(&self) -> String {
        format!("UNDROP DATABASE {}", self.qualified_name())
    }

    pub fn use_database(&self) -> String {
        format!("USE DATABASE {}", self.qualified_name())
    }

    pub fn show(&self) -> String {
        show_like("DATABASES", &self.name, "", "")
    }

    pub fn show_parameters(&self) -> String {
        format!("SHOW PARAMETERS IN DATABASE {}", self.qualified_name())
    }

    pub fn rename(&self, new_name: &str) -> String {
        format!(
            "ALTER DATABASE {} RENAME TO {}",
            self.qualified_name(),
            quote_ident(new_name)
        )
    }

    pub fn swap(&self, target: &str) -> String {
        format!(
            "ALTER DATABASE {} SWAP WITH {}",
            self.qualified_name(),
            quote_ident(target)
        )
    }

    pub fn change_comment(&self, comment: &str) -> String {
        format!(
            "ALTER DATABASE {} SET COMMENT = '{}'",
            self.qualified_name(),
            escape_string(comment)
        )
    }

    pub fn remove_comment(&self) -> String {
        format!("ALTER DATABASE {} UNSET COMMENT", self.qualified_name())
    }

    pub fn change_data_retention_days(&self, days: i32) -> String {
        format!(
            "ALTER DATABASE {} SET DATA_RETENTION_TIME_IN_DAYS = {days}",
            self.qualified_name()
        )
    }

    pub fn remove_data_retention_days(&self) -> String {
        format!(
            "ALTER DATABASE {} UNSET DATA_RETENTION_TIME_IN_DAYS",
            self.qualified_name()
        )
    }

    pub fn add_tag(&self, tag: &TagValue) -> String {
        format!(
            "ALTER DATABASE {} SET TAG {}",
            self.qualified_name(),
            tag.assignment()
        )
    }

    pub fn unset_tag(&self, tag: &TagValue) -> String {
        format!(
            "ALTER DATABASE {} UNSET TAG {}",
            self.qualified_name(),
            tag.qualified_name()
        )
    }

    pub fn enable_replication(&self, accounts: &[String], ignore_edition_check: bool) -> String {
        let mut q = format!(
            "ALTER DATABASE {} ENABLE REPLICATION TO ACCOUNTS {}",
            self.qualified_name(),
            accounts.join(", ")
        );
        if ignore_edition_check {
            q.push_str(" IGNORE EDITION CHECK");
        }
        q
    }

    pub fn disable_replication(&self, accounts: &[String]) -> String {
        format!(
            "ALTER DATABASE {} DISABLE REPLICATION TO ACCOUNTS {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    pub fn enable_failover(&self, accounts: &[String]) -> String {
        format!(
            "ALTER DATABASE {} ENABLE FAILOVER TO ACCOUNTS {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    pub fn disable_failover(&self, accounts: &[String]) -> String {
        format!(
            "ALTER DATABASE {} DISABLE FAILOVER TO ACCOUNTS {}",
            self.qualified_name(),
            accounts.join(", ")
        )
    }

    /// Pull the latest snapshot into a secondary database.
    pub fn refresh(&self) -> String {
        format!("ALTER DATABASE {} REFRESH", self.qualified_name())
    }

    pub fn primary(&self) -> String {
        format!("ALTER DATABASE {} PRIMARY", self.qualified_name())
    }
}
