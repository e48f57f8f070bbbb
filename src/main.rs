use std::sync::Arc;

use record_intake::{bootstrap_storage, intake, telemetry, Config, FileRecordStore, Intake};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    info!("Starting record intake");

    let config = Config::from_env()?;
    let dir = bootstrap_storage(&config)?;

    let pipeline = Arc::new(Intake::new(FileRecordStore::new(dir)));
    intake::serve(pipeline, &config.bind_addr()).await?;

    Ok(())
}
