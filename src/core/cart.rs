//! Cart business logic - The shopper's pending order lines.
//!
//! A line snapshots the product's name and price when it is first added. Adding the
//! same product again bumps the quantity instead of creating a second line. Checkout
//! reads the lines through [`get_cart_items`] and empties the cart with [`clear_cart`].

use crate::{
    core::order::{OrderLine, order_total},
    entities::{CartItem, cart_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Lines currently in the cart, in the order they were added.
pub async fn get_cart_items<C>(db: &C) -> Result<Vec<cart_item::Model>>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds one unit of a product to the cart.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the product is not in the catalog,
/// `Error::InvalidQuantity` if the line cannot hold another unit, or a database error.
#[instrument(skip(db))]
pub async fn add_to_cart(db: &DatabaseConnection, product_id: i64) -> Result<cart_item::Model> {
    let existing = find_line(db, product_id).await?;

    if let Some(line) = existing {
        let quantity = line
            .quantity
            .checked_add(1)
            .ok_or(Error::InvalidQuantity {
                quantity: line.quantity,
            })?;
        let mut line: cart_item::ActiveModel = line.into();
        line.quantity = Set(quantity);
        let line = line.update(db).await?;
        debug!("Cart line for product {} now has quantity {}", product_id, quantity);
        return Ok(line);
    }

    let product = crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let line = cart_item::ActiveModel {
        product_id: Set(product.id),
        name: Set(product.name),
        price: Set(product.price),
        quantity: Set(1),
        ..Default::default()
    };
    line.insert(db).await.map_err(Into::into)
}

/// Sets a line's quantity; a quantity of zero removes the line.
///
/// Returns the updated line, or `None` when it was removed.
///
/// # Errors
/// Returns `Error::InvalidQuantity` for negative quantities and
/// `Error::ProductNotFound` when the product has no cart line.
pub async fn set_quantity(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: i32,
) -> Result<Option<cart_item::Model>> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let line = find_line(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if quantity == 0 {
        CartItem::delete_by_id(line.id).exec(db).await?;
        return Ok(None);
    }

    let mut line: cart_item::ActiveModel = line.into();
    line.quantity = Set(quantity);
    Ok(Some(line.update(db).await?))
}

/// Removes a product's line from the cart. Removing an absent line is a no-op.
pub async fn remove_from_cart(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    CartItem::delete_many()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Empties the cart.
pub async fn clear_cart<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    CartItem::delete_many().exec(db).await?;
    Ok(())
}

/// Sum of price times quantity over the cart.
///
/// # Errors
/// Returns `Error::Validation` when the total does not fit in an `i64`.
pub async fn cart_total(db: &DatabaseConnection) -> Result<i64> {
    let lines: Vec<OrderLine> = get_cart_items(db)
        .await?
        .into_iter()
        .map(OrderLine::from)
        .collect();
    order_total(&lines)
}

async fn find_line<C>(db: &C, product_id: i64) -> Result<Option<cart_item::Model>>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(db)
        .await
        .map_err(Into::into)
}
