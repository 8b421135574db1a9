//! Shared test utilities for the storefront engine.
//!
//! This module provides common helper functions for setting up test stores
//! and creating test records with sensible defaults.

use crate::{
    core::{
        account,
        order::CustomerInfo,
        product::{self, NewProduct},
    },
    entities::{self, Role},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Password given to every account created by these helpers.
pub const TEST_PASSWORD: &str = "secret";

/// Routes tracing output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` store with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with the given floor price.
///
/// # Defaults
/// * `description`: "Test product"
/// * `image`: derived from the name
/// * `category`: "electronics"
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct {
            name: name.to_string(),
            description: "Test product".to_string(),
            price,
            image: None,
            category: "electronics".to_string(),
        },
    )
    .await
}

/// Creates an admin account with password [`TEST_PASSWORD`].
pub async fn create_test_admin(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::admin_user::Model> {
    account::insert_account(db, username, TEST_PASSWORD, "Test Admin", Role::Admin).await
}

/// Creates an affiliate (manager) account with password [`TEST_PASSWORD`].
pub async fn create_test_affiliate(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::admin_user::Model> {
    account::insert_account(db, username, TEST_PASSWORD, "Test Affiliate", Role::Manager).await
}

/// An account model that is never stored, for logic that does not touch the store.
pub fn test_account(id: i64, role: Role) -> entities::admin_user::Model {
    entities::admin_user::Model {
        id,
        username: format!("user{id}"),
        password: TEST_PASSWORD.to_string(),
        role,
        name: format!("User {id}"),
        balance: 0,
    }
}

/// Valid checkout details.
pub fn test_customer() -> CustomerInfo {
    CustomerInfo::new("Amina", "0555 12 34 56", "12 Rue Didouche Mourad, Algiers")
}

/// Sets up a store with one affiliate and one product priced 15000.
/// Returns (db, affiliate, product) for landing-page scenarios.
pub async fn setup_with_affiliate_and_product() -> Result<(
    DatabaseConnection,
    entities::admin_user::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let affiliate = create_test_affiliate(&db, "affiliate").await?;
    let product = create_test_product(&db, "Smart Watch Pro", 15000).await?;
    Ok((db, affiliate, product))
}
