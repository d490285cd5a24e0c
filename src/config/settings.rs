//! Host-facing plugin settings.
//!
//! The chat host owns configuration parsing; it hands the plugin a [`Settings`]
//! value built from its core home directory and the `[ip]` section.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::constants::SYSTEM_GEOIP_DIR;

/// The `[ip]` configuration section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoIpSection {
    /// Directory containing the GeoIP database files.
    ///
    /// A relative value is interpreted relative to the directory holding the
    /// host's configuration file.
    #[serde(default, rename = "GeoIP_db_path")]
    pub db_path: Option<PathBuf>,

    /// License key for downloading database files from MaxMind.
    #[serde(default)]
    pub maxmind_license_key: Option<String>,
}

impl GeoIpSection {
    /// Returns the configured database directory, resolved against `config_dir`.
    ///
    /// An empty value counts as unset.
    pub fn db_dir(&self, config_dir: &Path) -> Option<PathBuf> {
        let path = self.db_path.as_ref()?;
        if path.as_os_str().is_empty() {
            return None;
        }
        if path.is_absolute() {
            Some(path.clone())
        } else {
            Some(config_dir.join(path))
        }
    }

    /// Returns the license key, treating an empty or blank key as absent.
    pub fn license_key(&self) -> Option<&str> {
        self.maxmind_license_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Everything the plugin needs from the host's configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Bot home directory; missing databases are downloaded here.
    pub homedir: PathBuf,

    /// Directory the host's configuration file lives in.
    #[serde(default)]
    pub config_dir: PathBuf,

    /// The `[ip]` section.
    #[serde(default, rename = "ip")]
    pub geoip: GeoIpSection,
}

impl Settings {
    /// Creates settings with an empty `[ip]` section.
    pub fn new(homedir: impl Into<PathBuf>) -> Self {
        Self {
            homedir: homedir.into(),
            config_dir: PathBuf::new(),
            geoip: GeoIpSection::default(),
        }
    }

    /// The configured override directory, if any.
    pub fn configured_db_dir(&self) -> Option<PathBuf> {
        self.geoip.db_dir(&self.config_dir)
    }

    /// Directories searched for the database pair, highest priority first:
    /// configured directory, bot home directory, then the system directory.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        if let Some(configured) = self.configured_db_dir() {
            paths.push(configured);
        }
        paths.push(self.homedir.clone());
        paths.push(PathBuf::from(SYSTEM_GEOIP_DIR));
        paths
    }
}
