use matjari::config::{database, store};
use matjari::core::{product, seed};
use matjari::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the store configuration
    let config = store::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Successfully processed store configuration.");

    // 4. Open the store (in-memory unless DATABASE_URL says otherwise)
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to open store: {}", e))?;

    // 5. Seed catalog and dashboard accounts
    seed::seed_store(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed store: {}", e))?;

    for item in product::get_all_products(&db).await? {
        info!(
            product_id = item.id,
            "{} [{}] floor price {}", item.name, item.category, item.price
        );
    }

    info!("Store ready.");
    Ok(())
}
