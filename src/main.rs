use energycal::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting energycal server");

    // Load configuration
    let config = startup::load_config()?;

    // Serve until shutdown
    startup::serve(config).await?;

    Ok(())
}
