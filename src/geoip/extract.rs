//! Archive extraction utilities.
//!
//! MaxMind serves databases as `.tar.gz` archives while the keyless mirror
//! serves raw `.mmdb` files. A downloaded file is unpacked only if it turns out
//! to be an archive.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;
use tempfile::NamedTempFile;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const USTAR_MAGIC_OFFSET: usize = 257;
const USTAR_MAGIC: &[u8] = b"ustar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    Gzip,
    Tar,
}

fn detect_archive(bytes: &[u8]) -> Option<ArchiveKind> {
    if bytes.starts_with(&GZIP_MAGIC) {
        return Some(ArchiveKind::Gzip);
    }
    let magic = bytes.get(USTAR_MAGIC_OFFSET..USTAR_MAGIC_OFFSET + USTAR_MAGIC.len())?;
    (magic == USTAR_MAGIC).then_some(ArchiveKind::Tar)
}

/// Extracts `.mmdb` members from `source` into `target` if it is an archive.
///
/// Every regular member whose name contains `.mmdb` is written to `target`
/// under its base name, dropping any directory prefix. The archive is removed
/// afterwards when `delete_after_decompression` is set. A file that is not a
/// tar archive (plain or gzip-compressed) is left untouched.
///
/// Returns whether `source` was treated as an archive.
pub fn maybe_decompress_targz(
    source: &Path,
    target: &Path,
    delete_after_decompression: bool,
) -> Result<bool> {
    let bytes = std::fs::read(source)
        .with_context(|| format!("Failed to read downloaded file {}", source.display()))?;

    let members = match detect_archive(&bytes) {
        Some(ArchiveKind::Gzip) => read_mmdb_members(Archive::new(GzDecoder::new(bytes.as_slice()))),
        Some(ArchiveKind::Tar) => read_mmdb_members(Archive::new(bytes.as_slice())),
        None => {
            log::debug!("{} is not an archive; leaving it alone", source.display());
            return Ok(false);
        }
    };

    let members = match members {
        Ok(members) => members,
        Err(e) => {
            log::debug!(
                "{} is not a readable archive ({:#}); leaving it alone",
                source.display(),
                e
            );
            return Ok(false);
        }
    };

    for (file_name, data) in members {
        let destination = target.join(&file_name);
        write_file_atomically(&destination, &data)?;
        log::info!(
            "Extracted {} from {} ({} bytes)",
            file_name,
            source.display(),
            data.len()
        );
    }

    if delete_after_decompression {
        std::fs::remove_file(source)
            .with_context(|| format!("Failed to remove archive {}", source.display()))?;
    }

    Ok(true)
}

/// Reads all `.mmdb` members of an archive into memory, keyed by base name.
fn read_mmdb_members<R: Read>(mut archive: Archive<R>) -> Result<Vec<(String, Vec<u8>)>> {
    let entries = archive
        .entries()
        .with_context(|| "Failed to read tar archive entries")?;

    let mut members = Vec::new();
    for entry_result in entries {
        let mut entry = entry_result.with_context(|| "Failed to read tar entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry
            .path()
            .with_context(|| "Failed to get entry path")?
            .into_owned();
        if !path.to_string_lossy().contains(".mmdb") {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let file_name = file_name.to_string_lossy().into_owned();

        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .with_context(|| format!("Failed to read {} from archive", path.display()))?;
        members.push((file_name, data));
    }

    Ok(members)
}

/// Writes `data` to `destination` through a temporary file in the same
/// directory, so readers never observe a partially written database.
pub(crate) fn write_file_atomically(destination: &Path, data: &[u8]) -> Result<()> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(data)
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    // Temporary files are created owner-only; databases are world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to set permissions on {}", destination.display()))?;
    }
    temp.persist(destination)
        .with_context(|| format!("Failed to move file into place at {}", destination.display()))?;

    Ok(())
}
