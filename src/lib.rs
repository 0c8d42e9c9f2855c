//! glimpse — analyze images from the command line with OpenRouter vision
//! models.
//!
//! The library side holds everything testable: config resolution, the
//! catalog cache, catalog filtering, and the HTTP client. The binary in
//! `main.rs` only parses arguments, dispatches, and maps errors to exit
//! codes.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use cache::CatalogCache;
pub use catalog::ModelCatalogEntry;
pub use client::OpenRouterClient;
pub use config::EffectiveConfig;
pub use error::GlimpseError;
