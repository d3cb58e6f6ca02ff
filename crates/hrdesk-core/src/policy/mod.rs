//! Role policy layer (permission tables, predicates).
//!
//! A `RolePolicy` maps each `Permission` to the exact role tokens that hold
//! it. Matching is case-sensitive and exact; an absent role never matches.

pub mod roles;
pub mod table;

pub use roles::{
    can_delete_users, can_edit_users, can_view_contract, is_privileged, Permission,
    ROLE_HRM, ROLE_OPERATION_MANAGER,
};
pub use table::RolePolicy;
