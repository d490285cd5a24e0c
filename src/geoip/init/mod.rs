//! GeoIP database discovery and bootstrap.
//!
//! This module finds a directory holding both GeoLite2 databases, downloading
//! them into the bot's home directory when no such directory exists.

mod download;
mod locate;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

pub use download::{build_download_urls, download_databases};
pub use locate::{find_database_dir, has_database_pair};

/// Where to look for the databases and how to fetch them when absent.
#[derive(Debug, Clone)]
pub struct Bootstrap<'a> {
    /// Directories to search, highest priority first
    pub search_paths: &'a [PathBuf],
    /// Operator-configured directory, if any (only used for diagnostics)
    pub configured: Option<&'a Path>,
    /// URLs fetched, in order, when no directory holds the databases
    /// (see [`build_download_urls`])
    pub download_urls: &'a [String],
    /// Directory downloads are written to
    pub download_dir: &'a Path,
}

/// Returns a directory containing both databases, downloading them if needed.
///
/// `before_download` runs once, right before the first download starts, so the
/// caller can tell the user to wait. It is not called when a directory is
/// found on disk.
///
/// # Errors
///
/// Returns the first download, write or extraction error. Also fails when the
/// downloads finish but `download_dir` still lacks either database, as happens
/// when a server answers with something other than a database or archive.
/// Files fetched before the failure are not used.
pub async fn locate_or_fetch<F>(
    client: &reqwest::Client,
    bootstrap: &Bootstrap<'_>,
    before_download: F,
) -> Result<PathBuf>
where
    F: FnOnce(),
{
    if let Some(dir) = find_database_dir(bootstrap.search_paths, bootstrap.configured) {
        return Ok(dir);
    }

    log::info!(
        "Downloading GeoIP database files to {}",
        bootstrap.download_dir.display()
    );
    before_download();

    download_databases(client, bootstrap.download_urls, bootstrap.download_dir).await?;

    if !has_database_pair(bootstrap.download_dir) {
        bail!(
            "Download finished but database files are missing from {}",
            bootstrap.download_dir.display()
        );
    }

    log::info!("GeoIP database downloads complete");
    Ok(bootstrap.download_dir.to_path_buf())
}
