//! Order entity - A cash-on-delivery order placed at checkout.
//!
//! Orders are written once and never edited. `referral_id` and `commission`
//! are only set for purchases made through a landing page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fulfilment status of an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Insertion sequence; newest orders have the highest id
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Random opaque token shown to the customer
    #[sea_orm(unique)]
    pub reference: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    /// Sum of unit price times quantity over the order's lines
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: DateTimeUtc,
    /// Affiliate credited with the sale, if bought through a landing page
    pub referral_id: Option<i64>,
    /// Markup credited to the affiliate, only when strictly positive
    pub commission: Option<i64>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
    /// Each referred order points at one affiliate
    #[sea_orm(
        belongs_to = "super::admin_user::Entity",
        from = "Column::ReferralId",
        to = "super::admin_user::Column::Id",
        on_delete = "SetNull"
    )]
    Referrer,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::admin_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Referrer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
