//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `20260301000002_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TECHNICIAN: &str = "technician";
pub const ROLE_EMPLOYEE: &str = "employee";

/// All valid role names, in privilege order.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TECHNICIAN, ROLE_EMPLOYEE];

/// Returns `true` if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
