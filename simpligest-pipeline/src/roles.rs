//! Role-based gating for report content.
//!
//! Visibility is decided from merged permission sets, not from role
//! names scattered through components: a user may hold several roles
//! (the owner covering a till shift also carries the cashier role) and
//! sees the union of what each grants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The role a report is requested under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Full visibility across the business.
    Owner,
    /// Runs one category; sees only that category's products.
    DepartmentManager { category: String },
    /// Till operations only; restock alerts but no pricing advice.
    Cashier,
}

/// What a role is allowed to see in a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ViewPricing,
    ViewReorder,
    ViewTrends,
    ManageCatalog,
    RecordSales,
}

/// The permission set one role grants.
pub fn role_permissions(role: &UserRole) -> HashSet<Permission> {
    let granted: &[Permission] = match role {
        UserRole::Owner => &[
            Permission::ViewPricing,
            Permission::ViewReorder,
            Permission::ViewTrends,
            Permission::ManageCatalog,
            Permission::RecordSales,
        ],
        UserRole::DepartmentManager { .. } => &[
            Permission::ViewPricing,
            Permission::ViewReorder,
            Permission::ViewTrends,
            Permission::ManageCatalog,
        ],
        UserRole::Cashier => &[Permission::ViewReorder, Permission::RecordSales],
    };
    granted.iter().copied().collect()
}

/// Union of the permissions granted by every role the user holds.
pub fn merge_permissions<'a, I>(roles: I) -> HashSet<Permission>
where
    I: IntoIterator<Item = &'a UserRole>,
{
    let mut merged = HashSet::new();
    for role in roles {
        merged.extend(role_permissions(role));
    }
    merged
}
