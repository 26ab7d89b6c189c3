use anyhow::{bail, Context, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::date_utils::parse_utc_offset;
use crate::qr::QrSize;
use crate::view::{NowPolicy, ViewOptions};

pub const CONFIG_FILE: &str = ".receipt-view.toml";

/// Configuration for receipt-view
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields, title = "receipt-view Configuration")]
pub struct Config {
    /// How receipt pages are displayed
    pub display: DisplayConfig,
    /// QR code rendering
    pub qr: QrConfig,
    /// Verification table storage
    pub tables: TablesConfig,
}

/// How receipt pages are displayed
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Start in 12-hour mode
    pub hour12: bool,
    /// Offset times are shown in: "local", "UTC", or "+HH:MM"
    pub utc_offset: String,
    /// Append the About block with the toggle button
    pub footer: bool,
    /// Whether a toggle re-reads the clock
    pub now_policy: NowPolicy,
}

/// QR code rendering
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct QrConfig {
    /// Width and height of the HTML QR image
    pub size: u32,
}

/// Verification table storage
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct TablesConfig {
    /// Directory holding generated tables (default: platform data dir)
    pub dir: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hour12: true,
            utc_offset: "local".into(),
            footer: true,
            now_policy: NowPolicy::Captured,
        }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self { size: 300 }
    }
}

impl Config {
    /// Load config from .receipt-view.toml, searching up from the given directory
    pub fn load(start_dir: &Path) -> Result<Self> {
        if let Some(path) = find_config_file(start_dir) {
            log::debug!("using config {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// View options described by this config.
    pub fn view_options(&self) -> Result<ViewOptions> {
        let Some(offset) = parse_utc_offset(&self.display.utc_offset) else {
            bail!("invalid utc_offset: {:?}", self.display.utc_offset);
        };
        Ok(ViewOptions {
            hour12: self.display.hour12,
            offset,
            qr_size: QrSize::square(self.qr.size),
            show_footer: self.display.footer,
            now_policy: self.display.now_policy,
        })
    }

    /// Directory for generated tables: configured, else `<data dir>/receipt-view`.
    pub fn tables_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.tables.dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("receipt-view"))
            .context("cannot determine data directory; set tables.dir")
    }
}

/// Search for .receipt-view.toml from start_dir upward
fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// JSON schema of the config file, pretty-printed.
pub fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(Config);
    Ok(serde_json::to_string_pretty(&schema)?)
}
