// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Splittab", "splittab"));

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    let config_dir = proj.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config dir")?;
    Ok(config_dir.join("config.json"))
}

fn read_file() -> Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Read config at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse config at {}", path.display()))
}

/// Resolve the backend base URL: CLI flag, then SPLITTAB_API_URL, then
/// the config file, then the default.
pub fn api_url(cli_override: Option<&str>) -> Result<String> {
    if let Some(url) = cli_override {
        return Ok(url.trim_end_matches('/').to_string());
    }
    if let Ok(url) = std::env::var("SPLITTAB_API_URL") {
        if !url.is_empty() {
            return Ok(url.trim_end_matches('/').to_string());
        }
    }
    if let Some(url) = read_file()?.api_url {
        return Ok(url.trim_end_matches('/').to_string());
    }
    Ok(DEFAULT_API_URL.to_string())
}

pub fn set_api_url(url: &str) -> Result<PathBuf> {
    let path = config_path()?;
    let cfg = ConfigFile {
        api_url: Some(url.trim_end_matches('/').to_string()),
    };
    fs::write(&path, serde_json::to_string_pretty(&cfg)?)
        .with_context(|| format!("Write config at {}", path.display()))?;
    Ok(path)
}
