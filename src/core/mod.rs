//! Core business logic - framework-agnostic catalog, cart, checkout and affiliate operations.
//!
//! Every operation takes the store (`&DatabaseConnection`) by reference; presentation
//! code never writes to the tables directly.

pub mod account;
pub mod cart;
pub mod dashboard;
pub mod landing_page;
pub mod order;
pub mod product;
pub mod seed;
pub mod visibility;
