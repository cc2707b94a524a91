//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Unknown fields are rejected so a typo does not silently fall back to a
//! default.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor, write_new_private};
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "preserve_times", default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_times: Option<bool>,
    #[serde(rename = "fsync", default, deserialize_with = "de_bool_trimmed_opt")]
    fsync: Option<bool>,
}

// Accept " true " / "1" / "yes" and friends; anything else counts as unset.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }))
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("config <log_level>")?;
    }
    cfg.log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    });
    cfg.preserve_times = parsed.preserve_times.unwrap_or(false);
    cfg.fsync = parsed.fsync.unwrap_or(false);
    Ok(cfg)
}

/// Load a Config from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Load the config from [`default_config_path`]. A missing file yields the
/// defaults, except when `$BLUEPRINT_COPY_CONFIG` names it explicitly.
pub fn load_config() -> Result<Config> {
    let explicit = std::env::var_os(super::CONFIG_ENV).is_some();
    let path = default_config_path()?;
    if !path.exists() {
        if explicit {
            bail!("config file named by {} does not exist: {}", super::CONFIG_ENV, path.display());
        }
        return Ok(Config::default());
    }
    load_config_from_xml_path(&path)
}

/// Write a commented template config to `path` (never overwrites).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/blueprint_copy.log".into());

    let content = format!(
        "<!--\n  blueprint_copy configuration (XML)\n\n    log_level       -> quiet | normal | info | debug\n    log_file        -> also write logs to this file (optional; empty = stderr only)\n    preserve_times  -> copy access/modification times too (true/false)\n    fsync           -> flush every copied file to disk before moving on (true/false)\n\n  CLI flags override these values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <!-- <log_file>{}</log_file> -->\n  <preserve_times>false</preserve_times>\n  <fsync>false</fsync>\n</config>\n",
        suggested_log
    );

    write_new_private(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
