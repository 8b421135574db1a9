//! Database configuration module for the storefront store.
//!
//! The store lives in an in-memory `SQLite` database by default, so all state resets
//! when the process restarts. Tables are generated from the entity definitions with
//! `SeaORM`'s `Schema::create_table_from_entity`, keeping the schema in lockstep with
//! the Rust structs.

use crate::entities::{AdminUser, CartItem, LandingPage, Order, OrderItem, Product};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Default store URL: a fresh in-memory database per process.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from the `DATABASE_URL` environment variable, or the in-memory default.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the store and creates all tables.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to store at {}", database_url);
    let db = Database::connect(&database_url).await?;
    create_tables(&db).await?;
    info!("Store ready at {}", database_url);
    Ok(db)
}

/// Creates all store tables from the entity definitions.
///
/// Tables are created in dependency order so foreign keys always point at an
/// existing table.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(AdminUser),
        schema.create_table_from_entity(CartItem),
        schema.create_table_from_entity(LandingPage),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
    ];

    for table in &tables {
        db.execute(builder.build(table)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        admin_user::Model as AdminUserModel, cart_item::Model as CartItemModel,
        landing_page::Model as LandingPageModel, order::Model as OrderModel,
        order_item::Model as OrderItemModel, product::Model as ProductModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<AdminUserModel> = AdminUser::find().limit(1).all(&db).await?;
        let _: Vec<CartItemModel> = CartItem::find().limit(1).all(&db).await?;
        let _: Vec<LandingPageModel> = LandingPage::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_default_database_url_is_in_memory() {
        assert_eq!(DEFAULT_DATABASE_URL, "sqlite::memory:");
    }
}
