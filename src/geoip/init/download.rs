//! GeoIP database downloads.

use std::path::Path;

use anyhow::{Context, Result};
use url::{form_urlencoded, Url};

use crate::config::{KEYLESS_MIRROR_TEMPLATE, MAXMIND_DOWNLOAD_BASE, MAX_GEOIP_DOWNLOAD_SIZE};
use crate::geoip::extract::{maybe_decompress_targz, write_file_atomically};
use crate::geoip::types::Edition;

/// Builds one download URL per edition.
///
/// With a license key the URLs point at MaxMind's direct download endpoint and
/// return `.tar.gz` archives. Without one they point at the keyless mirror,
/// which serves the raw `.mmdb` files.
pub fn build_download_urls(editions: &[Edition], license_key: Option<&str>) -> Vec<String> {
    match license_key {
        Some(key) => editions
            .iter()
            .map(|edition| {
                let params = form_urlencoded::Serializer::new(String::new())
                    .append_pair("license_key", key)
                    .append_pair("suffix", "tar.gz")
                    .append_pair("edition_id", &edition.edition_id())
                    .finish();
                format!("{}?{}", MAXMIND_DOWNLOAD_BASE, params)
            })
            .collect(),
        None => editions
            .iter()
            .map(|edition| KEYLESS_MIRROR_TEMPLATE.replace("{edition}", edition.name()))
            .collect(),
    }
}

/// Downloads every URL into `download_dir`, unpacking archives as it goes.
///
/// Each URL is saved under its final path segment. The first failed download
/// aborts the whole run; nothing is retried.
pub async fn download_databases(
    client: &reqwest::Client,
    urls: &[String],
    download_dir: &Path,
) -> Result<()> {
    tokio::fs::create_dir_all(download_dir)
        .await
        .with_context(|| format!("Failed to create download directory: {:?}", download_dir))?;

    for url in urls {
        let display_url = redact_license_key(url);
        log::debug!("GeoIP Source URL: {}", display_url);

        let file_name = download_file_name(url)?;
        let full_path = download_dir.join(&file_name);

        let bytes = download_with_size_limit(client, url)
            .await
            .with_context(|| format!("Failed to download GeoIP database from {}", display_url))?;
        write_file_atomically(&full_path, &bytes)?;
        log::debug!("Saved {} bytes to {}", bytes.len(), full_path.display());

        // MaxMind serves archives, the mirror serves raw files
        maybe_decompress_targz(&full_path, download_dir, true)?;
    }

    Ok(())
}

/// Returns the final path segment of `url`, used as the local file name.
fn download_file_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Failed to parse URL: {}", url))?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("URL has no file name: {}", redact_license_key(url)))
}

/// Replaces the `license_key` query value so URLs can be logged.
fn redact_license_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(name, _)| name == "license_key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "license_key" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

/// Downloads a database with size limit enforcement
async fn download_with_size_limit(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "No error details".to_string());
        return Err(anyhow::anyhow!(
            "Failed to download GeoIP database: {} - {}",
            status,
            error_body.trim()
        ));
    }

    if let Some(content_length) = response.content_length() {
        if content_length > MAX_GEOIP_DOWNLOAD_SIZE as u64 {
            return Err(anyhow::anyhow!(
                "GeoIP database too large: {} bytes (max: {} bytes)",
                content_length,
                MAX_GEOIP_DOWNLOAD_SIZE
            ));
        }
    }

    let downloaded_bytes = response.bytes().await?.to_vec();

    // content-length may be missing or wrong
    if downloaded_bytes.len() > MAX_GEOIP_DOWNLOAD_SIZE {
        return Err(anyhow::anyhow!(
            "GeoIP database too large: {} bytes (max: {} bytes)",
            downloaded_bytes.len(),
            MAX_GEOIP_DOWNLOAD_SIZE
        ));
    }

    Ok(downloaded_bytes)
}
