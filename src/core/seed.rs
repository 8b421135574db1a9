//! Store seeding from configuration.
//!
//! The store starts empty on every launch, so the catalog and the dashboard accounts
//! from `config.toml` are inserted at startup. Accounts whose username already exists
//! are skipped; products are only seeded into an empty catalog.

use crate::{
    config::store::StoreConfig,
    core::{account, product},
    entities::Product,
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::{info, instrument, warn};

/// Counts of what a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub accounts: usize,
}

/// Inserts configured products and accounts in one transaction.
#[instrument(skip(db, config))]
pub async fn seed_store(db: &DatabaseConnection, config: &StoreConfig) -> Result<SeedReport> {
    info!(
        "Seeding store: {} products, {} accounts configured",
        config.products.len(),
        config.accounts.len()
    );
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    if Product::find().count(&txn).await? == 0 {
        for cfg_product in &config.products {
            product::create_product(
                &txn,
                product::NewProduct {
                    name: cfg_product.name.clone(),
                    description: cfg_product.description.clone(),
                    price: cfg_product.price,
                    image: cfg_product.image.clone(),
                    category: cfg_product.category.clone(),
                },
            )
            .await?;
            report.products += 1;
        }
    } else {
        warn!("Catalog already populated. Skipping product seeding.");
    }

    for cfg_account in &config.accounts {
        if account::get_account_by_username(&txn, &cfg_account.username)
            .await?
            .is_some()
        {
            warn!("Account '{}' already exists. Skipping.", cfg_account.username);
            continue;
        }
        account::insert_account(
            &txn,
            &cfg_account.username,
            &cfg_account.password,
            &cfg_account.name,
            cfg_account.role,
        )
        .await?;
        report.accounts += 1;
    }

    txn.commit().await?;
    info!(
        "Finished seeding: {} products, {} accounts inserted",
        report.products, report.accounts
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::store::parse_config;
    use crate::entities::Role;
    use crate::test_utils::setup_test_db;

    const CONFIG: &str = r#"
        [[products]]
        name = "Smart Watch Pro"
        description = "Health tracking and crystal-clear calls"
        price = 15000
        category = "electronics"

        [[products]]
        name = "Wireless Earbuds"
        description = "Active noise cancellation"
        price = 8500
        category = "electronics"

        [[accounts]]
        username = "admin"
        password = "123"
        role = "admin"
        name = "General Manager"
    "#;

    #[tokio::test]
    async fn test_seed_store() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(CONFIG)?;

        let report = seed_store(&db, &config).await?;
        assert_eq!(report, SeedReport { products: 2, accounts: 1 });

        let catalog = product::get_all_products(&db).await?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Smart Watch Pro");
        assert_eq!(catalog[1].price, 8500);

        let admin = account::authenticate(&db, "admin", "123").await?;
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.balance, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_store_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(CONFIG)?;

        seed_store(&db, &config).await?;
        let second = seed_store(&db, &config).await?;
        assert_eq!(second, SeedReport::default());
        assert_eq!(product::get_all_products(&db).await?.len(), 2);
        Ok(())
    }
}
