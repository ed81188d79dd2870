use std::sync::Arc;

use log::*;

use shipping_quote::{routes, AppConfig, GenericError, ShippingQuoter};

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    let config = Arc::new(AppConfig::from_env()?);

    env_logger::builder()
        .filter_module("shipping_quote", config.log_level)
        .init();
    trace!("Logger init with level {}.", config.log_level);

    let quoter = ShippingQuoter::from_config(Arc::clone(&config))?;
    info!(
        "Loaded {} warehouses and {} carrier services.",
        config.warehouses.len(),
        config.carrier.service_codes.len()
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}.", config.bind_address);

    if let Err(why) = axum::serve(listener, routes::router(Arc::new(quoter))).await {
        error!("Server error: {:?}", why);
    }

    Ok(())
}
