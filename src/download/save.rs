//! Save every download option of a result to a directory.
//!
//! File names are `<stem>-<option id>.<ext>`, sanitized. Bodies are streamed
//! to a `<name>.part` file and renamed when complete; a failed download
//! leaves no file behind.

use crate::core::error::AppResult;
use crate::core::validation::sanitize_filename;
use crate::render::{DownloadOption, Results};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// HTTP client used for media downloads.
pub fn build_client(user_agent: &str) -> AppResult<Client> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Target file name for one option.
pub fn file_name(stem: &str, option: &DownloadOption) -> String {
    sanitize_filename(&format!("{}-{}.{}", stem, option.id, option.kind.extension()))
}

/// Download all options in order. Stops at the first failure.
pub async fn save_all(client: &Client, results: &Results, stem: &str, dir: &Path) -> AppResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut saved = Vec::with_capacity(results.options.len());
    for option in &results.options {
        let path = dir.join(file_name(stem, option));
        let bytes = save_one(client, &option.href, &path).await?;
        log::info!("Saved {} ({} bytes) to {}", option.label, bytes, path.display());
        saved.push(path);
    }
    Ok(saved)
}

/// Download into `<path>.part`, renamed to `path` once the body is complete.
async fn save_one(client: &Client, href: &str, path: &Path) -> AppResult<u64> {
    let partial = partial_path(path);
    match write_body(client, href, &partial).await {
        Ok(written) => {
            tokio::fs::rename(&partial, path).await?;
            Ok(written)
        }
        Err(err) => {
            if let Err(e) = tokio::fs::remove_file(&partial).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove partial download {}: {}", partial.display(), e);
                }
            }
            Err(err)
        }
    }
}

async fn write_body(client: &Client, href: &str, path: &Path) -> AppResult<u64> {
    let response = client.get(href).send().await?.error_for_status()?;

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
