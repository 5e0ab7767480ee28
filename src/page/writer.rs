use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Replaces the page at `path` in one step: the HTML goes to a temporary
/// sibling first and is then renamed over the old page, so readers never
/// see a half-written file.
#[instrument(skip(html), fields(path = %path.display(), bytes = html.len()))]
pub async fn write_page(path: &Path, html: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = temp_path_for(path);

    if let Err(err) = write_then_rename(&temp_path, path, html).await {
        warn!("Failed to write page: {}", err);

        discard_temp_file(&temp_path).await;
        return Err(err);
    }

    info!("Page written");

    Ok(())
}

async fn write_then_rename(temp_path: &Path, path: &Path, html: &str) -> io::Result<()> {
    fs::write(temp_path, html).await?;
    fs::rename(temp_path, path).await
}

async fn discard_temp_file(temp_path: &Path) {
    match fs::remove_file(temp_path).await {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            warn!("Failed to remove '{}': {}", temp_path.display(), err)
        }
        _ => {}
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());

    path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
}
