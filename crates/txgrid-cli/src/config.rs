// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use txgrid_app::window::{DEFAULT_BUFFER_ROWS, DEFAULT_ROW_HEIGHT_PX};
use txgrid_app::{DEFAULT_DEBOUNCE, GridOptions, MAX_DEBOUNCE, RowGeometry};

const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "TXGRID_CONFIG_PATH";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            grid: Grid::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Grid {
    pub row_height_px: Option<u64>,
    pub buffer_rows: Option<u64>,
    pub debounce: Option<String>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            row_height_px: Some(DEFAULT_ROW_HEIGHT_PX),
            buffer_rows: Some(DEFAULT_BUFFER_ROWS),
            debounce: Some("300ms".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub dir: Option<String>,
    pub filter: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(txgrid_data::APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [data], [grid], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.grid.row_height_px == Some(0) {
            bail!(
                "grid.row_height_px in {} must be positive, got 0",
                path.display()
            );
        }

        if let Some(debounce) = &self.grid.debounce {
            let delay = parse_duration(debounce)
                .with_context(|| format!("grid.debounce in {}", path.display()))?;
            if delay > MAX_DEBOUNCE {
                bail!(
                    "grid.debounce in {} must be at most {}s, got {debounce:?}",
                    path.display(),
                    MAX_DEBOUNCE.as_secs()
                );
            }
        }

        if let Some(data_path) = &self.data.path
            && data_path.trim().is_empty()
        {
            bail!("data.path in {} is empty; remove it or set a file path", path.display());
        }

        Ok(())
    }

    /// `[data].path` wins over `TXGRID_DATA_PATH`, which wins over the
    /// platform data directory.
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => txgrid_data::default_data_path(),
        }
    }

    pub fn debounce(&self) -> Result<Duration> {
        match &self.grid.debounce {
            Some(raw) => parse_duration(raw),
            None => Ok(DEFAULT_DEBOUNCE),
        }
    }

    pub fn grid_options(&self) -> Result<GridOptions> {
        let row_height_px = self.grid.row_height_px.unwrap_or(DEFAULT_ROW_HEIGHT_PX);
        let buffer_rows = self.grid.buffer_rows.unwrap_or(DEFAULT_BUFFER_ROWS);
        let geometry = RowGeometry::new(row_height_px, buffer_rows)
            .ok_or_else(|| anyhow!("grid.row_height_px must be positive"))?;
        Ok(GridOptions {
            geometry,
            debounce: self.debounce()?,
            ..GridOptions::default()
        })
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log.dir {
            return Ok(PathBuf::from(dir));
        }
        let data_root = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("cannot resolve log directory; set [log].dir"))?;
        Ok(data_root.join(txgrid_data::APP_NAME).join("logs"))
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# txgrid config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Default is TXGRID_DATA_PATH, then the platform data dir\n# (for example ~/.local/share/txgrid/transactions.json)\n# path = \"/absolute/path/to/transactions.json\"\n\n[grid]\nrow_height_px = {}\nbuffer_rows = {}\ndebounce = \"300ms\"\n\n[log]\n# dir = \"/absolute/path/to/logs\"\n# RUST_LOG overrides this filter\nfilter = \"{}\"\n",
            path.display(),
            DEFAULT_ROW_HEIGHT_PX,
            DEFAULT_BUFFER_ROWS,
            DEFAULT_LOG_FILTER,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 300ms or 1s)")
}
