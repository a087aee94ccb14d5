use std::fmt::Display;

use crate::sql::quote_ident;

use super::target::{GrantTarget, ObjectKind};

/// The privilege that carries ownership semantics.
pub const OWNERSHIP: &str = "OWNERSHIP";

/// Who receives a grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grantee {
    Role(String),
    Share(String),
    User(String),
}

impl Display for Grantee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grantee::Role(name) => write!(f, "ROLE {}", quote_ident(name)),
            Grantee::Share(name) => write!(f, "SHARE {}", quote_ident(name)),
            Grantee::User(name) => write!(f, "USER {}", quote_ident(name)),
        }
    }
}

/// First stage: a chosen target, waiting for a grantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantBuilder {
    target: GrantTarget,
}

impl GrantBuilder {
    pub fn new(target: GrantTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &GrantTarget {
        &self.target
    }

    /// The object name, or the database/schema name for aggregate targets.
    pub fn name(&self) -> String {
        let name = match &self.target {
            GrantTarget::Object { name, .. } => name.as_str(),
            GrantTarget::Account => "",
            GrantTarget::AllExisting { scope, .. } | GrantTarget::AllFuture { scope, .. } => {
                scope.name()
            }
            GrantTarget::RoleMembership { role } => role.as_str(),
            GrantTarget::Ownership { name, .. } => name.as_str(),
        };
        name.trim_matches('"').to_owned()
    }

    pub fn show(&self) -> String {
        match &self.target {
            GrantTarget::Object {
                kind,
                qualified_name,
                ..
            } => format!("SHOW GRANTS ON {kind} {qualified_name}"),
            GrantTarget::Account => "SHOW GRANTS ON ACCOUNT".to_owned(),
            GrantTarget::AllExisting { scope, .. } => format!("SHOW GRANTS IN {scope}"),
            GrantTarget::AllFuture { scope, .. } => format!("SHOW FUTURE GRANTS IN {scope}"),
            GrantTarget::RoleMembership { role } => {
                format!("SHOW GRANTS OF ROLE {}", quote_ident(role))
            }
            GrantTarget::Ownership { kind, name, .. } => {
                format!("SHOW GRANTS ON {kind} {}", quote_ident(name))
            }
        }
    }

    pub fn role(&self, name: &str) -> GrantExecutable {
        self.bind(Grantee::Role(name.to_owned()))
    }

    /// `None` when a share can't receive this kind of grant.
    pub fn share(&self, name: &str) -> Option<GrantExecutable> {
        match &self.target {
            GrantTarget::Object { kind, .. } if kind.shareable() => {
                Some(self.bind(Grantee::Share(name.to_owned())))
            }
            _ => None,
        }
    }

    /// Users only receive role memberships.
    pub fn user(&self, name: &str) -> Option<GrantExecutable> {
        match &self.target {
            GrantTarget::RoleMembership { .. } => Some(self.bind(Grantee::User(name.to_owned()))),
            _ => None,
        }
    }

    fn bind(&self, grantee: Grantee) -> GrantExecutable {
        GrantExecutable {
            target: self.target.clone(),
            grantee,
        }
    }
}

/// Second stage: a target bound to a grantee, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantExecutable {
    target: GrantTarget,
    grantee: Grantee,
}

impl GrantExecutable {
    pub fn grantee(&self) -> &Grantee {
        &self.grantee
    }

    /// The `ON ...` clause, when the target has one.
    fn on_clause(&self) -> Option<String> {
        match &self.target {
            GrantTarget::Object {
                kind,
                qualified_name,
                ..
            } => Some(format!("{kind} {qualified_name}")),
            GrantTarget::Account => Some(format!("{} ", ObjectKind::Account)),
            GrantTarget::AllExisting { kind, scope } => {
                Some(format!("ALL {} IN {scope}", kind.plural()))
            }
            GrantTarget::AllFuture { kind, scope } => {
                Some(format!("FUTURE {} IN {scope}", kind.plural()))
            }
            GrantTarget::RoleMembership { .. } | GrantTarget::Ownership { .. } => None,
        }
    }

    /// Ownership of existing objects always keeps the outbound grants.
    fn copies_current_grants(&self, privilege: &str) -> bool {
        privilege == OWNERSHIP
            && matches!(
                self.target,
                GrantTarget::Object { .. } | GrantTarget::AllExisting { .. }
            )
    }

    pub fn grant(&self, privilege: &str, with_grant_option: bool) -> String {
        match &self.target {
            GrantTarget::RoleMembership { role } => {
                format!("GRANT ROLE {} TO {}", quote_ident(role), self.grantee)
            }
            GrantTarget::Ownership {
                kind,
                name,
                current_grants,
            } => format!(
                "GRANT OWNERSHIP ON {kind} {} TO {} {current_grants}",
                quote_ident(name),
                self.grantee
            ),
            _ => {
                let on = self.on_clause().unwrap_or_default();
                let mut q = format!("GRANT {privilege} ON {on} TO {}", self.grantee);
                if self.copies_current_grants(privilege) {
                    q.push_str(" COPY CURRENT GRANTS");
                } else if with_grant_option {
                    q.push_str(" WITH GRANT OPTION");
                }
                q
            }
        }
    }

    /// Revoking ownership hands the object back to the session's role, always
    /// copying the current grants.
    pub fn revoke(&self, privilege: &str) -> Vec<String> {
        match &self.target {
            GrantTarget::RoleMembership { role } => {
                vec![format!("REVOKE ROLE {} FROM {}", quote_ident(role), self.grantee)]
            }
            GrantTarget::Ownership { kind, name, .. } => vec![
                "SET currentRole=CURRENT_ROLE()".to_owned(),
                format!(
                    "GRANT OWNERSHIP ON {kind} {} TO ROLE IDENTIFIER($currentRole) COPY CURRENT GRANTS",
                    quote_ident(name)
                ),
            ],
            _ => {
                let on = self.on_clause().unwrap_or_default();
                if self.copies_current_grants(privilege) {
                    vec![
                        "SET currentRole=CURRENT_ROLE()".to_owned(),
                        format!(
                            "GRANT OWNERSHIP ON {on} TO ROLE IDENTIFIER($currentRole) COPY CURRENT GRANTS"
                        ),
                    ]
                } else {
                    vec![format!("REVOKE {privilege} ON {on} FROM {}", self.grantee)]
                }
            }
        }
    }
}
