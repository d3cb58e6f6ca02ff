//! Compiled permission table.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DeskError, Result};

use super::roles::{Permission, DEFAULT_PRIVILEGED};

/// Permission -> privileged role tokens.
/// Construct once (from config or `default()`), then share by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePolicy {
    grants: BTreeMap<Permission, BTreeSet<String>>,
}

impl Default for RolePolicy {
    fn default() -> Self {
        let roles: BTreeSet<String> = DEFAULT_PRIVILEGED.iter().map(|r| r.to_string()).collect();
        let grants = Permission::ALL
            .iter()
            .map(|p| (*p, roles.clone()))
            .collect();
        Self { grants }
    }
}

impl RolePolicy {
    /// Table with no grants; every check denies.
    pub fn deny_all() -> Self {
        Self { grants: BTreeMap::new() }
    }

    /// Compile a table from raw role lists.
    ///
    /// Role tokens are kept verbatim (no trimming, no case folding); blank
    /// tokens are rejected since they could never match a real session role.
    pub fn from_lists<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Permission, &'a [String])>,
    {
        let mut grants = BTreeMap::new();
        for (permission, roles) in entries {
            let mut set = BTreeSet::new();
            for role in roles {
                if role.trim().is_empty() {
                    return Err(DeskError::BadRequest(format!(
                        "blank role token in permissions.{}",
                        permission.as_str()
                    )));
                }
                set.insert(role.clone());
            }
            tracing::trace!(permission = permission.as_str(), roles = set.len(), "permission compiled");
            grants.insert(permission, set);
        }
        Ok(Self { grants })
    }

    /// Grant `permission` to `role`. Returns self for chaining.
    pub fn grant(mut self, permission: Permission, role: impl Into<String>) -> Self {
        self.grants.entry(permission).or_default().insert(role.into());
        self
    }

    /// Withdraw `permission` from `role`.
    pub fn revoke(mut self, permission: Permission, role: &str) -> Self {
        if let Some(set) = self.grants.get_mut(&permission) {
            set.remove(role);
        }
        self
    }

    /// Exact, case-sensitive membership check. `None` never matches.
    pub fn allows(&self, permission: Permission, role: Option<&str>) -> bool {
        let Some(role) = role else { return false; };
        self.grants
            .get(&permission)
            .is_some_and(|set| set.contains(role))
    }

    pub fn can_edit_users(&self, role: Option<&str>) -> bool {
        self.allows(Permission::EditUsers, role)
    }

    pub fn can_view_contract(&self, role: Option<&str>) -> bool {
        self.allows(Permission::ViewContract, role)
    }

    pub fn can_delete_users(&self, role: Option<&str>) -> bool {
        self.allows(Permission::DeleteUsers, role)
    }

    /// Roles holding `permission`, in sorted order.
    pub fn roles_for(&self, permission: Permission) -> Vec<&str> {
        self.grants
            .get(&permission)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
