use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub export: Option<ExportConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    /// Request timeout in seconds; 0 disables the timeout.
    pub timeout_secs: Option<u64>,
    pub aadhaar_endpoint: Option<String>,
    pub pan_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/cardscan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cardscan").join("config.toml"))
}

/// Load config by cascading CWD `.cardscan.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".cardscan.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let over_server = overlay.server.unwrap_or_default();
    let base_export = base.export.unwrap_or_default();
    let over_export = overlay.export.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let over_display = overlay.display.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            base_url: over_server.base_url.or(base_server.base_url),
            timeout_secs: over_server.timeout_secs.or(base_server.timeout_secs),
            aadhaar_endpoint: over_server
                .aadhaar_endpoint
                .or(base_server.aadhaar_endpoint),
            pan_endpoint: over_server.pan_endpoint.or(base_server.pan_endpoint),
        }),
        export: Some(ExportConfig {
            dir: over_export.dir.or(base_export.dir),
        }),
        display: Some(DisplayConfig {
            theme: over_display.theme.or(base_display.theme),
            fps: over_display.fps.or(base_display.fps),
        }),
    }
}

impl ConfigFile {
    /// Client settings from this file, with defaults for anything unset.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        let Some(server) = &self.server else {
            return config;
        };
        if let Some(url) = &server.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = server.timeout_secs {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(path) = &server.aadhaar_endpoint {
            config.aadhaar_endpoint = path.clone();
        }
        if let Some(path) = &server.pan_endpoint {
            config.pan_endpoint = path.clone();
        }
        config
    }

    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export
            .as_ref()
            .and_then(|e| e.dir.as_ref())
            .map(PathBuf::from)
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn fps(&self) -> Option<u32> {
        self.display.as_ref().and_then(|d| d.fps)
    }
}
