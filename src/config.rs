//! Configuration loading and resolution.
//!
//! The effective configuration for one invocation is merged from three
//! layers, highest precedence first: explicit CLI flags, the per-user
//! config file, built-in defaults. The credential has no default, so a
//! missing or credential-less config file is fatal. Optional values that
//! are present but malformed fall back to the built-in default with a
//! warning rather than failing the whole resolution.

use crate::error::{GlimpseError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Fallback temperature applied when the config file carries a malformed
/// temperature value. An absent value is not defaulted: it stays `None`
/// and is omitted from the request so the remote default applies.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Config file section holding the OpenRouter settings.
const CONFIG_SECTION: &str = "openrouter";

/// The merged (credential, model, temperature) for one invocation.
/// Built once, immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
}

/// Default per-user config file location: `<config dir>/glimpse/config.ini`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        })
        .join("glimpse")
        .join("config.ini")
}

/// Resolve the effective configuration from the config file at `path`
/// merged with CLI overrides.
///
/// Fails with [`GlimpseError::Config`] when the file is absent or
/// unreadable, or when `api_key` is missing or empty.
pub fn resolve(
    path: &Path,
    cli_model: Option<&str>,
    cli_temperature: Option<f32>,
) -> Result<EffectiveConfig> {
    if !path.exists() {
        return Err(GlimpseError::Config(format!(
            "config file not found: {} (create it with an [openrouter] section containing api_key)",
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        GlimpseError::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;

    let section = parse_ini_section(&contents, CONFIG_SECTION);

    let api_key = section
        .get("api_key")
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| {
            GlimpseError::Config(format!(
                "missing api_key under [{CONFIG_SECTION}] in {}",
                path.display()
            ))
        })?;

    let file_model = section.get("model").filter(|v| !v.is_empty()).cloned();
    let file_temperature = section
        .get("temperature")
        .and_then(|raw| match raw.parse::<f32>() {
            Ok(t) if (0.0..=1.0).contains(&t) => Some(t),
            _ => {
                tracing::warn!(
                    "invalid temperature {raw:?} in config file, using default {DEFAULT_TEMPERATURE}"
                );
                Some(DEFAULT_TEMPERATURE)
            }
        });

    Ok(EffectiveConfig {
        api_key,
        model: cli_model
            .map(str::to_string)
            .or(file_model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        temperature: cli_temperature.or(file_temperature),
    })
}

/// Minimal INI scanner: returns the key/value pairs of one named section.
///
/// Lines outside the section, comments (`#` or `;`), and lines without an
/// `=` are ignored. Values keep everything after the first `=`, trimmed.
fn parse_ini_section(contents: &str, section: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut in_section = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim().eq_ignore_ascii_case(section);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    map
}
