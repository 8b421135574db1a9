//! Product entity - Represents an item in the storefront catalog.
//!
//! The `price` column is the floor price: the catalog price for direct purchases
//! and the minimum an affiliate may charge on a landing page. Once a product is
//! referenced by a landing page or an order line it is treated as immutable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Smart Watch Pro")
    pub name: String,
    /// Marketing description shown on the product card
    pub description: String,
    /// Floor price in whole currency units
    pub price: i64,
    /// Image URL
    pub image: String,
    /// Catalog category (e.g., "electronics")
    pub category: String,
    /// When the product was added to the catalog
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many landing pages
    #[sea_orm(has_many = "super::landing_page::Entity")]
    LandingPages,
    /// One product appears on many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// One product appears on at most one cart line
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::landing_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LandingPages.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
