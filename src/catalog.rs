//! Model catalog — raw OpenRouter schema, image-capability filtering, and
//! the cache-or-fetch resolution used by the list-models mode.
//!
//! Resolution order: fresh cache, then network (persisting the raw body on
//! success), then stale cache as a last resort. Only when both the fetch
//! and the cache read fail does the network error propagate.

use crate::cache::CatalogCache;
use crate::client::OpenRouterClient;
use crate::error::{GlimpseError, Result};
use serde::{Deserialize, Deserializer};

/// A model descriptor as the catalog endpoint reports it. Everything past
/// the id is optional; missing fields get placeholder treatment at display
/// time, not here.
#[derive(Debug, Deserialize)]
pub struct RawModel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub context_length: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub architecture: RawArchitecture,
    #[serde(default)]
    pub pricing: RawPricing,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArchitecture {
    #[serde(default)]
    pub input_modalities: Vec<String>,
}

/// Per-unit prices. OpenRouter encodes these as decimal strings
/// ("0.000001"), but numbers are accepted too.
#[derive(Debug, Default, Deserialize)]
pub struct RawPricing {
    #[serde(default, deserialize_with = "de_decimal")]
    pub prompt: Option<f64>,
    #[serde(default, deserialize_with = "de_decimal")]
    pub completion: Option<f64>,
}

fn de_decimal<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Num(f64),
        Str(String),
    }

    Ok(match Option::<Decimal>::deserialize(deserializer)? {
        Some(Decimal::Num(n)) => Some(n),
        Some(Decimal::Str(s)) => s.parse().ok(),
        None => None,
    })
}

/// An image-capable model as presented to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalogEntry {
    pub id: String,
    pub display_name: String,
    pub context_length: Option<u64>,
    pub prompt_price: Option<f64>,
    pub completion_price: Option<f64>,
    pub supports_image_input: bool,
    pub description: Option<String>,
}

impl From<RawModel> for ModelCatalogEntry {
    fn from(raw: RawModel) -> Self {
        let supports_image_input = raw
            .architecture
            .input_modalities
            .iter()
            .any(|m| m == "image");
        Self {
            display_name: raw.name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            context_length: raw.context_length,
            prompt_price: raw.pricing.prompt,
            completion_price: raw.pricing.completion,
            supports_image_input,
            description: raw.description,
        }
    }
}

/// Parse a raw catalog body. The endpoint wraps the descriptors in a
/// `data` array; a bare array body is accepted as a fallback.
pub fn parse_catalog(body: &str) -> serde_json::Result<Vec<RawModel>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let array = match value {
        serde_json::Value::Object(mut obj) => match obj.remove("data") {
            Some(data) => data,
            None => serde_json::Value::Object(obj),
        },
        other => other,
    };
    serde_json::from_value(array)
}

/// Keep only image-capable entries, preserving catalog order.
pub fn filter_image_capable(raw: Vec<RawModel>) -> Vec<ModelCatalogEntry> {
    raw.into_iter()
        .map(ModelCatalogEntry::from)
        .filter(|entry| entry.supports_image_input)
        .collect()
}

/// Resolve the image-capable model list through the cache.
pub async fn image_capable_models(
    client: &OpenRouterClient,
    cache: &CatalogCache,
) -> Result<Vec<ModelCatalogEntry>> {
    if let Some(body) = cache.load_fresh() {
        match parse_catalog(&body) {
            Ok(raw) => {
                tracing::debug!("using fresh catalog cache at {}", cache.path().display());
                return Ok(filter_image_capable(raw));
            }
            // Torn or corrupt cache file: behave as if it were absent.
            Err(e) => tracing::warn!("ignoring unreadable catalog cache: {e}"),
        }
    }

    match client.fetch_catalog().await {
        Ok(body) => {
            cache.store(&body);
            let raw = parse_catalog(&body).map_err(|e| {
                GlimpseError::Network(format!("catalog response was not valid JSON: {e}"))
            })?;
            Ok(filter_image_capable(raw))
        }
        Err(fetch_err) => {
            if let Some(body) = cache.load_any() {
                if let Ok(raw) = parse_catalog(&body) {
                    tracing::warn!(
                        "catalog fetch failed ({fetch_err}), serving stale cache from {}",
                        cache.path().display()
                    );
                    return Ok(filter_image_capable(raw));
                }
            }
            Err(fetch_err)
        }
    }
}
