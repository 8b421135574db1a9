//! Unified error type for the storefront engine.
//!
//! Validation failures (bad prices, bad credentials, missing checkout fields) are
//! surfaced to the requesting user as rejection messages. None of the error paths
//! leave partially written state behind.

use thiserror::Error;

/// All errors produced by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying store error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Generic input validation failure (empty names, empty checkout fields, ...)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Landing page price undercuts the product's floor price
    #[error("Price {requested} is below the minimum allowed price of {floor}")]
    PriceBelowFloor {
        /// Price the affiliate asked for
        requested: i64,
        /// Floor price of the product
        floor: i64,
    },

    /// Price is negative
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// Offending price
        price: i64,
    },

    /// Cart quantity out of range
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// Offending quantity
        quantity: i32,
    },

    /// No account matches the username/password pair
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Product id that was looked up
        id: i64,
    },

    #[error("Landing page not found: {slug}")]
    LandingPageNotFound {
        /// Slug that was looked up
        slug: String,
    },

    #[error("Account not found: {id}")]
    AccountNotFound {
        /// Account id that was looked up
        id: i64,
    },

    #[error("Order not found: {reference}")]
    OrderNotFound {
        /// Order reference token
        reference: String,
    },

    /// Product is referenced by a landing page or an order line
    #[error("Product {id} is referenced by landing pages or orders and cannot be changed")]
    ProductInUse {
        /// Product id
        id: i64,
    },

    /// Requesting user lacks the role for this operation
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Why the request was refused
        message: String,
    },

    /// Deleting this account would leave the store without an admin
    #[error("Cannot delete the last admin account")]
    LastAdmin,

    /// Text-completion collaborator failed
    #[error("Completion service error: {message}")]
    Completion {
        /// Error reported by the collaborator
        message: String,
    },

    /// Every freshly generated identifier collided with an existing one
    #[error("Could not allocate a unique {kind} after {attempts} attempts")]
    IdentifierExhausted {
        /// Kind of identifier (slug, order reference)
        kind: &'static str,
        /// Attempts made
        attempts: usize,
    },
}

impl Error {
    /// Whether this error is a user-facing validation rejection.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::PriceBelowFloor { .. }
                | Self::InvalidPrice { .. }
                | Self::InvalidQuantity { .. }
                | Self::InvalidCredentials
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
