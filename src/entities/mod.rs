//! Entity module - Contains all SeaORM entity definitions for the store.
//! These entities represent the store tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod admin_user;
pub mod cart_item;
pub mod landing_page;
pub mod order;
pub mod order_item;
pub mod product;

// Re-export specific types to avoid conflicts
pub use admin_user::{
    Column as AdminUserColumn, Entity as AdminUser, Model as AdminUserModel, Role,
};
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use landing_page::{
    Column as LandingPageColumn, Entity as LandingPage, Model as LandingPageModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
