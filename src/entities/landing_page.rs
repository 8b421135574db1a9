//! Landing page entity - An affiliate's marked-up sale page for one product.
//!
//! `custom_price` is never below the product's floor price; the markup is what
//! the affiliate earns on each sale through the page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Landing page database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "landing_pages")]
pub struct Model {
    /// Unique identifier for the landing page
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product being sold
    pub product_id: i64,
    /// Owning affiliate
    pub affiliate_id: i64,
    /// Sale price in whole currency units
    pub custom_price: i64,
    /// Public URL slug
    #[sea_orm(unique)]
    pub slug: String,
    /// When the page was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `LandingPage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each landing page sells one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each landing page belongs to one affiliate
    #[sea_orm(
        belongs_to = "super::admin_user::Entity",
        from = "Column::AffiliateId",
        to = "super::admin_user::Column::Id",
        on_delete = "Cascade"
    )]
    Affiliate,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::admin_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Affiliate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
