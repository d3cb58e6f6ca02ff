//! Role tokens, permissions, and the default predicates.

use serde::{Deserialize, Serialize};

/// Human-resources manager.
pub const ROLE_HRM: &str = "HRM";
/// Operation manager.
pub const ROLE_OPERATION_MANAGER: &str = "OPERATION_MANAGER";

/// Role tokens privileged under the default table.
pub const DEFAULT_PRIVILEGED: [&str; 2] = [ROLE_HRM, ROLE_OPERATION_MANAGER];

/// Guarded actions on the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    EditUsers,
    ViewContract,
    DeleteUsers,
}

impl Permission {
    pub const ALL: [Permission; 3] = [
        Permission::EditUsers,
        Permission::ViewContract,
        Permission::DeleteUsers,
    ];

    /// Stable label used in config keys and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::EditUsers => "edit_users",
            Permission::ViewContract => "view_contract",
            Permission::DeleteUsers => "delete_users",
        }
    }
}

fn default_allows(role: Option<&str>) -> bool {
    role.is_some_and(|r| DEFAULT_PRIVILEGED.contains(&r))
}

/// Whether `role` may edit user records under the default table.
pub fn can_edit_users(role: Option<&str>) -> bool {
    default_allows(role)
}

/// Whether `role` may view employment contracts under the default table.
pub fn can_view_contract(role: Option<&str>) -> bool {
    default_allows(role)
}

/// Whether `role` may delete user records under the default table.
pub fn can_delete_users(role: Option<&str>) -> bool {
    default_allows(role)
}

/// Whether `role` holds at least one permission under the default table.
/// Every default permission shares one role set, so this is the same check.
pub fn is_privileged(role: Option<&str>) -> bool {
    default_allows(role)
}
