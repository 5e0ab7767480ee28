use bmsgdashboard::config::env_loader::load_config;
use bmsgdashboard::date::today_in_japan;
use bmsgdashboard::pipeline::run;
use bmsgdashboard::tracing::{setup_loki, shutdown_loki};
use std::process::ExitCode;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki().await;

    let config = load_config();

    debug!("Loaded config {:?}", config);

    let exit_code = match run(&config, today_in_japan()).await {
        Ok(report) => {
            info!(
                "Done ({} urgent notices, report dated {})",
                report.urgent_notices.len(),
                report.updated_date.as_deref().unwrap_or("unknown")
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Run failed: {}", err);
            ExitCode::FAILURE
        }
    };

    shutdown_loki(loki).await;

    exit_code
}
