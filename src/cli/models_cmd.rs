//! `glimpse --list-models` — show which models accept image input.

use crate::cache::CatalogCache;
use crate::catalog::{self, ModelCatalogEntry};
use crate::client::OpenRouterClient;
use crate::error::Result;
use std::fmt::Write as _;

/// How much of the listing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Model IDs only, one per line.
    Compact,
    /// ID, name, context length, per-1K pricing, and description.
    Detailed,
}

/// Placeholder for optional catalog fields the provider did not report.
const UNKNOWN: &str = "Unknown";

/// Descriptions longer than this are cut to 97 characters plus `...`.
const MAX_DESCRIPTION_LEN: usize = 100;

/// Run the list-models command.
pub async fn run(client: &OpenRouterClient, cache: &CatalogCache, mode: ListMode) -> Result<()> {
    let models = catalog::image_capable_models(client, cache).await?;
    print!("{}", render(&models, mode));
    Ok(())
}

/// Render the listing. Split from [`run`] so output can be asserted on
/// without capturing stdout.
pub fn render(models: &[ModelCatalogEntry], mode: ListMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Image-capable models ({} total)", models.len());

    for model in models {
        match mode {
            ListMode::Compact => {
                let _ = writeln!(out, "{}", model.id);
            }
            ListMode::Detailed => {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", model.id);
                let _ = writeln!(out, "  Name:       {}", model.display_name);
                let _ = writeln!(out, "  Context:    {}", format_context(model.context_length));
                let _ = writeln!(out, "  Prompt:     {}", format_price(model.prompt_price));
                let _ = writeln!(out, "  Completion: {}", format_price(model.completion_price));
                let _ = writeln!(
                    out,
                    "  {}",
                    truncate_description(model.description.as_deref().unwrap_or(UNKNOWN))
                );
            }
        }
    }

    out
}

/// Reformat a per-unit price as a per-1K figure, e.g. `$0.0010/1K`.
fn format_price(per_unit: Option<f64>) -> String {
    match per_unit {
        Some(price) => format!("${:.4}/1K", price * 1000.0),
        None => UNKNOWN.to_string(),
    }
}

fn format_context(context_length: Option<u64>) -> String {
    match context_length {
        Some(len) => format!("{len} tokens"),
        None => UNKNOWN.to_string(),
    }
}

/// Cut long descriptions down to their first 97 characters plus `...`.
fn truncate_description(description: &str) -> String {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        let head: String = description.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
