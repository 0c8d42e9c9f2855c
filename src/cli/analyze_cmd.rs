//! `glimpse <image>` — send one image plus a prompt for analysis.

use crate::client::OpenRouterClient;
use crate::config;
use crate::error::{GlimpseError, Result};
use std::path::Path;

/// Image extensions accepted for analysis. Name-based only, no content
/// sniffing.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Run the analyze command. Prints exactly the extracted answer to stdout.
///
/// Preconditions are checked in a fixed order, each fatal: config
/// resolution (which requires the config file to exist), image path
/// existence, then the extension allow-list.
pub async fn run(
    client: &OpenRouterClient,
    image_path: &Path,
    prompt: &str,
    config_path: &Path,
    cli_model: Option<&str>,
    cli_temperature: Option<f32>,
) -> Result<()> {
    let config = config::resolve(config_path, cli_model, cli_temperature)?;

    if !image_path.exists() {
        return Err(GlimpseError::Validation(format!(
            "image file not found: {}",
            image_path.display()
        )));
    }
    validate_extension(image_path)?;

    let image_bytes = std::fs::read(image_path).map_err(|source| GlimpseError::Encoding {
        path: image_path.to_path_buf(),
        source,
    })?;

    let answer = client.analyze(&image_bytes, prompt, &config).await?;
    println!("{answer}");
    Ok(())
}

/// Reject paths whose extension is not on the allow-list
/// (case-insensitive).
pub fn validate_extension(path: &Path) -> Result<()> {
    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if supported {
        Ok(())
    } else {
        Err(GlimpseError::Validation(format!(
            "unsupported image format: {} (use JPG or PNG)",
            path.display()
        )))
    }
}
