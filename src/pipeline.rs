use crate::claude::api::{ApiError, ClaudeAPI};
use crate::claude::model::Reply;
use crate::config::model::Config;
use crate::date::japanese_date;
use crate::page::render::render_page;
use crate::page::writer::write_page;
use crate::prompt::build_request;
use crate::report::extract::{extract_report, ExtractionError};
use crate::report::model::UpdateReport;
use chrono::NaiveDate;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("failed rendering page: {0}")]
    Render(#[from] askama::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One full run: ask, extract, render, write.
pub async fn run(config: &Config, today: NaiveDate) -> Result<UpdateReport, DashboardError> {
    let display_date = japanese_date(today);

    info!("[{}] Fetching BMSG updates", display_date);

    let reply = fetch_reply(config, today).await?;
    let output_path = if config.debug_config.skip_write {
        warn!("Skipping write as configured");
        None
    } else {
        Some(config.output_path.as_path())
    };

    publish(&reply, &display_date, output_path).await
}

async fn fetch_reply(config: &Config, today: NaiveDate) -> Result<Reply, DashboardError> {
    if let Some(reply_file) = &config.debug_config.reply_file {
        warn!("Using reply from '{}' instead of the API", reply_file.display());

        return Ok(Reply::from_text(fs::read_to_string(reply_file).await?));
    }

    let api = ClaudeAPI::new(&config.api)?;
    let request = build_request(today, &config.api.model, config.api.max_tokens);

    Ok(api.send(&request).await?)
}

/// Extracts the report from `reply` and writes the page to `output_path`.
/// Nothing is written unless extraction and rendering both succeed.
pub async fn publish(
    reply: &Reply,
    display_date: &str,
    output_path: Option<&Path>,
) -> Result<UpdateReport, DashboardError> {
    let report = extract_report(reply)?;
    let html = render_page(&report, display_date)?;

    if let Some(path) = output_path {
        write_page(path, &html).await?;
        info!("Generated {} ({})", path.display(), display_date);
    }

    Ok(report)
}
