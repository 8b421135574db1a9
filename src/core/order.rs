//! Order business logic - Checkout and commission attribution.
//!
//! Two ways to place a cash-on-delivery order:
//!
//! * [`create_cart_order`] turns the cart into an order and empties the cart.
//! * [`create_landing_page_order`] sells a single unit through an affiliate's landing
//!   page, attributes the sale to the affiliate and credits the markup to their balance.
//!
//! Every order, its lines and any balance credit are written in one database
//! transaction, so a failure leaves neither a half-written order nor a stray credit.
//! Totals are always the sum of unit price times quantity; there are no discounts or taxes.

use crate::{
    core::visibility::Visibility,
    entities::{Order, OrderItem, OrderStatus, admin_user, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};
use uuid::Uuid;

/// Length of the customer-facing order reference.
const REFERENCE_LEN: usize = 12;
/// How many fresh references to try before giving up on a collision streak.
const REFERENCE_ATTEMPTS: usize = 5;

/// Delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Builds customer details from anything string-like.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    message: format!("Customer {field} is required"),
                });
            }
        }
        Ok(())
    }
}

/// A line to be written onto a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

impl From<crate::entities::cart_item::Model> for OrderLine {
    fn from(line: crate::entities::cart_item::Model) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// An order together with its lines, in purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

/// Sum of price times quantity over `lines`.
///
/// # Errors
/// Returns `Error::Validation` when the total does not fit in an `i64`.
pub fn order_total(lines: &[OrderLine]) -> Result<i64> {
    lines.iter().try_fold(0_i64, |total, line| {
        line.price
            .checked_mul(i64::from(line.quantity))
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| Error::Validation {
                message: format!("Order total overflows at line '{}'", line.name),
            })
    })
}

/// Commission earned on a landing-page sale: the markup, when strictly positive.
#[must_use]
pub fn commission_for(custom_price: i64, floor_price: i64) -> Option<i64> {
    custom_price
        .checked_sub(floor_price)
        .filter(|markup| *markup > 0)
}

/// Turns the current cart into a pending order and empties the cart.
///
/// An empty cart yields a zero-total order.
///
/// # Errors
/// Returns `Error::Validation` when a customer field is blank, or a database error.
#[instrument(skip(db, customer))]
pub async fn create_cart_order(
    db: &DatabaseConnection,
    customer: CustomerInfo,
) -> Result<OrderDetails> {
    customer.validate()?;

    let txn = db.begin().await?;

    let lines: Vec<OrderLine> = crate::core::cart::get_cart_items(&txn)
        .await?
        .into_iter()
        .map(OrderLine::from)
        .collect();

    let details = insert_order(&txn, &customer, &lines, None, None).await?;
    crate::core::cart::clear_cart(&txn).await?;

    txn.commit().await?;

    info!(
        order_reference = %details.order.reference,
        "Cart order placed: {} lines, total {}",
        details.items.len(),
        details.order.total
    );
    Ok(details)
}

/// Sells one unit through the landing page with the given slug.
///
/// The order is attributed to the page's affiliate. When the page's price is above the
/// product's floor price, the markup is recorded as the order's commission and added to
/// the affiliate's balance in the same transaction.
///
/// # Errors
/// Returns an error if:
/// - A customer field is blank
/// - No landing page has this slug, or its product no longer exists
/// - The database write fails (nothing is stored in that case)
#[instrument(skip(db, customer))]
pub async fn create_landing_page_order(
    db: &DatabaseConnection,
    slug: &str,
    customer: CustomerInfo,
) -> Result<OrderDetails> {
    customer.validate()?;

    let txn = db.begin().await?;

    let page = crate::core::landing_page::get_landing_page_by_slug(&txn, slug)
        .await?
        .ok_or_else(|| Error::LandingPageNotFound {
            slug: slug.to_string(),
        })?;
    let product = crate::core::product::get_product_by_id(&txn, page.product_id)
        .await?
        .ok_or(Error::ProductNotFound {
            id: page.product_id,
        })?;

    let line = OrderLine {
        product_id: product.id,
        name: product.name,
        price: page.custom_price,
        quantity: 1,
    };
    let commission = commission_for(page.custom_price, product.price);

    let details = insert_order(
        &txn,
        &customer,
        std::slice::from_ref(&line),
        Some(page.affiliate_id),
        commission,
    )
    .await?;

    if let Some(amount) = commission {
        crate::core::account::credit_commission(&txn, page.affiliate_id, amount).await?;
    }

    txn.commit().await?;

    info!(
        order_reference = %details.order.reference,
        "Landing page order via '{}': total {}, commission {:?} to affiliate {}",
        slug,
        details.order.total,
        commission,
        page.affiliate_id
    );
    Ok(details)
}

/// Orders visible to the user, newest first.
///
/// Admins see every order; affiliates only the orders they referred.
pub async fn list_visible_orders(
    db: &DatabaseConnection,
    user: &admin_user::Model,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(Visibility::for_orders(user).condition(order::Column::ReferralId))
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up an order by its customer-facing reference.
pub async fn get_order_by_reference(
    db: &DatabaseConnection,
    reference: &str,
) -> Result<order::Model> {
    Order::find()
        .filter(order::Column::Reference.eq(reference))
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            reference: reference.to_string(),
        })
}

/// Lines of an order in the order they were purchased.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn new_reference() -> String {
    let token = Uuid::new_v4().simple().to_string().to_uppercase();
    token[..REFERENCE_LEN].to_string()
}

async fn generate_unique_reference<C>(db: &C) -> Result<String>
where
    C: ConnectionTrait,
{
    for _ in 0..REFERENCE_ATTEMPTS {
        let reference = new_reference();
        let taken = Order::find()
            .filter(order::Column::Reference.eq(reference.as_str()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(reference);
        }
    }
    Err(Error::IdentifierExhausted {
        kind: "order reference",
        attempts: REFERENCE_ATTEMPTS,
    })
}

async fn insert_order<C>(
    db: &C,
    customer: &CustomerInfo,
    lines: &[OrderLine],
    referral_id: Option<i64>,
    commission: Option<i64>,
) -> Result<OrderDetails>
where
    C: ConnectionTrait,
{
    if let Some(line) = lines.iter().find(|line| line.quantity < 1) {
        return Err(Error::InvalidQuantity {
            quantity: line.quantity,
        });
    }

    let total = order_total(lines)?;
    let reference = generate_unique_reference(db).await?;

    let order = order::ActiveModel {
        reference: Set(reference),
        customer_name: Set(customer.name.trim().to_string()),
        phone: Set(customer.phone.trim().to_string()),
        address: Set(customer.address.trim().to_string()),
        total: Set(total),
        status: Set(OrderStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        referral_id: Set(referral_id),
        commission: Set(commission),
        ..Default::default()
    };
    let order = order.insert(db).await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            name: Set(line.name.clone()),
            price: Set(line.price),
            quantity: Set(line.quantity),
            ..Default::default()
        };
        items.push(item.insert(db).await?);
    }

    Ok(OrderDetails { order, items })
}
