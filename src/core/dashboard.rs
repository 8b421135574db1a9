//! Dashboard business logic.
//!
//! Builds the role-scoped figures shown on the admin/affiliate dashboard. Everything
//! here is read-only and framework-agnostic; presentation is left to the caller.

use crate::{
    core::{account, landing_page, order},
    entities::{admin_user, landing_page as landing_page_entity, order as order_entity},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Dashboard figures for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Orders the user may see, newest first
    pub orders: Vec<order_entity::Model>,
    /// The user's own landing pages, newest first
    pub landing_pages: Vec<landing_page_entity::Model>,
    /// Number of visible orders
    pub order_count: usize,
    /// Sum of visible order totals
    pub revenue: i64,
    /// Sum of commissions on visible orders
    pub commission_total: i64,
    /// The user's current balance
    pub balance: i64,
}

/// Generates the dashboard summary for `user`.
pub async fn dashboard_summary(
    db: &DatabaseConnection,
    user: &admin_user::Model,
) -> Result<DashboardSummary> {
    let orders = order::list_visible_orders(db, user).await?;
    let landing_pages = landing_page::list_visible_landing_pages(db, user).await?;
    let balance = account::get_balance(db, user).await?;

    let revenue = orders.iter().map(|o| o.total).fold(0, i64::saturating_add);
    let commission_total = orders
        .iter()
        .filter_map(|o| o.commission)
        .fold(0, i64::saturating_add);

    Ok(DashboardSummary {
        order_count: orders.len(),
        orders,
        landing_pages,
        revenue,
        commission_total,
        balance,
    })
}
