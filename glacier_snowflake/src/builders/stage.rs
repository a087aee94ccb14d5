use crate::sql::{escape_string, quote_ident};

use super::{schema_object, with_tag_clause, TagValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageBuilder {
    name: String,
    db: String,
    schema: String,
    url: Option<String>,
    credentials: Option<String>,
    storage_integration: Option<String>,
    encryption: Option<String>,
    file_format: Option<String>,
    copy_options: Option<String>,
    directory: Option<String>,
    comment: Option<String>,
    tags: Vec<TagValue>,
}

schema_object!(StageBuilder, "STAGE", "STAGES");

/// Stage describe output writes an empty null list as `[]`, which the
/// statement grammar doesn't accept.
fn fix_null_if(file_format: &str) -> String {
    file_format.replace("NULL_IF = []", "NULL_IF = ()")
}

impl StageBuilder {
    pub fn new(name: &str, db: &str, schema: &str) -> Self {
        Self {
            name: name.to_owned(),
            db: db.to_owned(),
            schema: schema.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_owned());
        self
    }

    pub fn with_credentials(mut self, credentials: &str) -> Self {
        self.credentials = Some(credentials.to_owned());
        self
    }

    pub fn with_storage_integration(mut self, integration: &str) -> Self {
        self.storage_integration = Some(integration.to_owned());
        self
    }

    pub fn with_encryption(mut self, encryption: &str) -> Self {
        self.encryption = Some(encryption.to_owned());
        self
    }

    pub fn with_file_format(mut self, file_format: &str) -> Self {
        self.file_format = Some(file_format.to_owned());
        self
    }

    pub fn with_copy_options(mut self, copy_options: &str) -> Self {
        self.copy_options = Some(copy_options.to_owned());
        self
    }

    pub fn with_directory(mut self, directory: &str) -> Self {
        self.directory = Some(directory.to_owned());
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

    pub fn create(&self) -> String {
        let mut q = format!("CREATE STAGE {}", self.qualified_name());
        if let Some(url) = &self.url {
            q.push_str(&format!(" URL = '{url}'"));
        }
        if let Some(credentials) = &self.credentials {
            q.push_str(&format!(" CREDENTIALS = ({credentials})"));
        }
        if let Some(integration) = &self.storage_integration {
            q.push_str(&format!(" STORAGE_INTEGRATION = {}", quote_ident(integration)));
        }
        if let Some(encryption) = &self.encryption {
            q.push_str(&format!(" ENCRYPTION = ({encryption})"));
        }
        if let Some(file_format) = &self.file_format {
            q.push_str(&format!(" FILE_FORMAT = ({})", fix_null_if(file_format)));
        }
        if let Some(copy_options) = &self.copy_options {
            q.push_str(&format!(" COPY_OPTIONS = ({copy_options})"));
        }
        if let Some(directory) = &self.directory {
            q.push_str(&format!(" DIRECTORY = ({directory})"));
        }
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q.push_str(&with_tag_clause(&self.tags));
        q
    }

    pub fn describe(&self) -> String {
        format!("DESCRIBE STAGE {}", self.qualified_name())
    }

    pub fn change_url(&self, url: &str) -> String {
        format!("ALTER STAGE {} SET URL = '{url}'", self.qualified_name())
    }

    pub fn change_file_format(&self, file_format: &str) -> String {
        format!(
            "ALTER STAGE {} SET FILE_FORMAT = ({})",
            self.qualified_name(),
            fix_null_if(file_format)
        )
    }

    pub fn change_credentials(&self, credentials: &str) -> String {
        format!(
            "ALTER STAGE {} SET CREDENTIALS = ({credentials})",
            self.qualified_name()
        )
    }

    pub fn change_storage_integration(&self, integration: &str) -> String {
        format!(
            "ALTER STAGE {} SET STORAGE_INTEGRATION = {}",
            self.qualified_name(),
            quote_ident(integration)
        )
    }

    /// The URL must move together with an integration that can reach it.
    pub fn change_storage_integration_and_url(&self, integration: &str, url: &str) -> String {
        format!(
            "ALTER STAGE {} SET STORAGE_INTEGRATION = {} URL = '{url}'",
            self.qualified_name(),
            quote_ident(integration)
        )
    }

    pub fn change_encryption(&self, encryption: &str) -> String {
        format!(
            "ALTER STAGE {} SET ENCRYPTION = ({encryption})",
            self.qualified_name()
        )
    }

    pub fn change_copy_options(&self, copy_options: &str) -> String {
        format!(
            "ALTER STAGE {} SET COPY_OPTIONS = ({copy_options})",
            self.qualified_name()
        )
    }
}
