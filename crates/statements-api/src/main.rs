use statements_api::setup;
use statements_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (stores, sweeper, routes)
    let app = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, app.router).await?;

    app.sweeper.shutdown().await;
    tracing::info!("Token sweeper stopped");

    Ok(())
}
