//! Admin user entity - Dashboard accounts for admins and affiliates.
//!
//! Affiliates (role `manager`) accumulate commission in `balance`; the balance
//! is only ever incremented.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dashboard role of an account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Unrestricted visibility and team management
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Affiliate: sees only their own orders, landing pages and balance
    #[sea_orm(string_value = "manager")]
    Manager,
}

/// Admin user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name
    #[sea_orm(unique)]
    pub username: String,
    /// Plaintext credential, compared by equality
    #[serde(skip_serializing)]
    pub password: String,
    /// Dashboard role
    pub role: Role,
    /// Display name shown on the dashboard
    pub name: String,
    /// Accumulated commission in whole currency units
    pub balance: i64,
}

impl Model {
    /// Whether this account has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Defines relationships between `AdminUser` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One affiliate owns many landing pages
    #[sea_orm(has_many = "super::landing_page::Entity")]
    LandingPages,
    /// One affiliate is credited with many orders
    #[sea_orm(has_many = "super::order::Entity")]
    ReferredOrders,
}

impl Related<super::landing_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LandingPages.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferredOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
