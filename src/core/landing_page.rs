//! Landing page business logic - Affiliate sale pages with marked-up prices.
//!
//! An affiliate picks a catalog product and a sale price. The price may never undercut
//! the product's floor price; the difference between the two is the commission the
//! affiliate earns on each sale made through the page.

use crate::{
    core::visibility::Visibility,
    entities::{LandingPage, admin_user, landing_page},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Length of the random part of a slug.
const SLUG_TOKEN_LEN: usize = 10;
/// How many fresh slugs to try before giving up on a collision streak.
const SLUG_ATTEMPTS: usize = 5;

/// Checks a requested sale price against the product's floor price.
///
/// # Errors
/// Returns `Error::PriceBelowFloor` carrying the floor price when `requested < floor`.
pub fn validate_price(requested: i64, floor: i64) -> Result<()> {
    if requested < floor {
        return Err(Error::PriceBelowFloor { requested, floor });
    }
    Ok(())
}

/// Creates a landing page for `product_id` owned by `affiliate_id`.
///
/// Validation happens before anything is written: a rejected request leaves the store
/// untouched.
///
/// # Errors
/// Returns an error if:
/// - The product or the affiliate does not exist
/// - `requested_price` is below the product's floor price (`Error::PriceBelowFloor`)
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_landing_page(
    db: &DatabaseConnection,
    product_id: i64,
    affiliate_id: i64,
    requested_price: i64,
) -> Result<landing_page::Model> {
    let product = crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    crate::core::account::get_account_by_id(db, affiliate_id)
        .await?
        .ok_or(Error::AccountNotFound { id: affiliate_id })?;

    if let Err(err) = validate_price(requested_price, product.price) {
        warn!(
            "Rejected landing page for '{}': {} is below floor {}",
            product.name, requested_price, product.price
        );
        return Err(err);
    }

    let slug = generate_unique_slug(db).await?;

    let page = landing_page::ActiveModel {
        product_id: Set(product.id),
        affiliate_id: Set(affiliate_id),
        custom_price: Set(requested_price),
        slug: Set(slug),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let page = page.insert(db).await?;

    info!(
        landing_page_id = page.id,
        "Affiliate {} published '{}' at {} (floor {})",
        affiliate_id,
        page.slug,
        page.custom_price,
        product.price
    );
    Ok(page)
}

/// Finds a landing page by its public slug.
pub async fn get_landing_page_by_slug<C>(db: &C, slug: &str) -> Result<Option<landing_page::Model>>
where
    C: ConnectionTrait,
{
    LandingPage::find()
        .filter(landing_page::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Landing pages the user may see on their dashboard, newest first.
pub async fn list_visible_landing_pages(
    db: &DatabaseConnection,
    user: &admin_user::Model,
) -> Result<Vec<landing_page::Model>> {
    LandingPage::find()
        .filter(Visibility::for_landing_pages(user).condition(landing_page::Column::AffiliateId))
        .order_by_desc(landing_page::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn new_slug() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("lp-{}", &token[..SLUG_TOKEN_LEN])
}

async fn generate_unique_slug(db: &DatabaseConnection) -> Result<String> {
    for _ in 0..SLUG_ATTEMPTS {
        let slug = new_slug();
        if get_landing_page_by_slug(db, &slug).await?.is_none() {
            return Ok(slug);
        }
    }
    Err(Error::IdentifierExhausted {
        kind: "landing page slug",
        attempts: SLUG_ATTEMPTS,
    })
}
