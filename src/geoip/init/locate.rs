//! Database directory discovery.

use std::path::{Path, PathBuf};

use crate::geoip::types::Edition;

/// Returns the first directory in `search_paths` that holds both databases.
///
/// A directory holding only one of the two files is skipped. `configured` is
/// the operator's override directory; a warning is logged if it is searched
/// and comes up empty.
pub fn find_database_dir(search_paths: &[PathBuf], configured: Option<&Path>) -> Option<PathBuf> {
    for dir in search_paths {
        if has_database_pair(dir) {
            log::info!("Using GeoIP database from {}", dir.display());
            return Some(dir.clone());
        }

        if configured == Some(dir.as_path()) {
            log::warn!(
                "GeoIP path configured but DB not found in {}",
                dir.display()
            );
        }
    }

    None
}

/// Checks whether `dir` contains both the City and the ASN database files.
pub fn has_database_pair(dir: &Path) -> bool {
    let mut found = true;
    for edition in [Edition::City, Edition::Asn] {
        let path = dir.join(edition.file_name());
        if !path.is_file() {
            log::debug!(
                "{} database file {} does not exist",
                edition.name(),
                path.display()
            );
            found = false;
        }
    }
    found
}
