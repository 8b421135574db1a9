//! Product business logic - Handles the storefront catalog.
//!
//! This module provides functions for creating, retrieving, updating, and removing
//! catalog products. A product's `price` is its floor price. Once a product is
//! referenced by a landing page or by an order line it can no longer be edited or
//! removed, so prices captured on those records stay consistent with the catalog.

use crate::{
    entities::{CartItem, LandingPage, OrderItem, Product, cart_item, landing_page, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Fields of a product to be added to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// Floor price in whole currency units
    pub price: i64,
    /// Image URL; a placeholder derived from the name is used when `None`
    pub image: Option<String>,
    pub category: String,
}

/// Placeholder image URL used when a product is created without one.
#[must_use]
pub fn default_image_url(name: &str) -> String {
    format!("https://picsum.photos/seed/{name}/600/400")
}

/// Retrieves the whole catalog in the order products were added.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a product to the catalog, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative
/// - The database insert operation fails
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    validate_fields(&new_product.name, new_product.price)?;

    let name = new_product.name.trim().to_string();
    let image = new_product
        .image
        .filter(|image| !image.trim().is_empty())
        .unwrap_or_else(|| default_image_url(&name));

    let product = product::ActiveModel {
        name: Set(name),
        description: Set(new_product.description),
        price: Set(new_product.price),
        image: Set(image),
        category: Set(new_product.category),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let product = product.insert(db).await?;
    info!(product_id = product.id, "Added product '{}' at {}", product.name, product.price);
    Ok(product)
}

/// Updates an unreferenced product's name, description and floor price.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative
/// - The product does not exist
/// - The product is already referenced by a landing page or an order line
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_description: String,
    new_price: i64,
) -> Result<product::Model> {
    validate_fields(&new_name, new_price)?;

    let existing = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if is_referenced(db, product_id).await? {
        return Err(Error::ProductInUse { id: product_id });
    }

    let mut product: product::ActiveModel = existing.into();
    product.name = Set(new_name.trim().to_string());
    product.description = Set(new_description);
    product.price = Set(new_price);

    product.update(db).await.map_err(Into::into)
}

/// Removes an unreferenced product from the catalog, dropping it from the cart as well.
///
/// # Errors
/// Returns `Error::ProductNotFound` for an unknown id, `Error::ProductInUse` when a
/// landing page or an order line references the product, or a database error.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let product = get_product_by_id(&txn, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if is_referenced(&txn, product_id).await? {
        return Err(Error::ProductInUse { id: product_id });
    }

    CartItem::delete_many()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;
    info!("Removed product '{}' from the catalog", product.name);
    Ok(())
}

/// Whether any landing page or order line points at the product.
pub async fn is_referenced<C>(db: &C, product_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let landing_pages = LandingPage::find()
        .filter(landing_page::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    if landing_pages > 0 {
        return Ok(true);
    }

    let order_lines = OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    Ok(order_lines > 0)
}

fn validate_fields(name: &str, price: i64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0 {
        return Err(Error::InvalidPrice { price });
    }

    Ok(())
}
