//! # smarthome — builds the configured house and prints a JSON report.

use smarthome::catalogue_file::FileCatalogue;
use smarthome::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let catalogue = FileCatalogue::new(&config.catalogue.path);
    let report = match smarthome::run(&config.house, &catalogue).await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = ?err, "failed to build house");
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
