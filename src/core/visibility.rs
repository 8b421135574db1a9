//! Role-scoped visibility for dashboard listings.
//!
//! The role check is resolved once per request into a [`Visibility`] value, which is
//! then applied the same way to every listing as a query condition on the record's
//! owner column.

use crate::entities::{Role, admin_user};
use sea_orm::{ColumnTrait, Condition};

/// Which records a dashboard user may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every record
    Everything,
    /// Only records owned by (or referred by) this account
    OwnedBy(i64),
}

impl Visibility {
    /// Visibility of orders: admins see all orders, affiliates only those they referred.
    #[must_use]
    pub const fn for_orders(user: &admin_user::Model) -> Self {
        match user.role {
            Role::Admin => Self::Everything,
            Role::Manager => Self::OwnedBy(user.id),
        }
    }

    /// Visibility of landing pages: every user sees only their own pages, admins included.
    #[must_use]
    pub const fn for_landing_pages(user: &admin_user::Model) -> Self {
        Self::OwnedBy(user.id)
    }

    /// Query condition restricting `owner_column` to the visible owner.
    #[must_use]
    pub fn condition<C: ColumnTrait>(self, owner_column: C) -> Condition {
        match self {
            Self::Everything => Condition::all(),
            Self::OwnedBy(id) => Condition::all().add(owner_column.eq(id)),
        }
    }
}
