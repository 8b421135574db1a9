/// Store connection and table creation
pub mod database;

/// Catalog, account and assistant configuration loading from config.toml
pub mod store;
