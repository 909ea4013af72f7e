//! Clinic API server. Bootstraps the schema, then serves HTTP until stopped.

use clinic_api::config::ApiConfig;
use clinic_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    initialize_database(&pool)
        .await
        .wrap_err("Failed to bootstrap the clinic schema")?;

    clinic_api::start_server(config, pool).await
}
