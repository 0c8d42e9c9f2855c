use clap::Parser;
use glimpse::cli::analyze_cmd;
use glimpse::cli::models_cmd::{self, ListMode};
use glimpse::{CatalogCache, GlimpseError, OpenRouterClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glimpse",
    about = "Analyze images using OpenRouter vision models",
    version
)]
struct Cli {
    /// Path to the image file (JPG or PNG)
    image_path: Option<PathBuf>,

    /// Prompt to send with the image
    #[arg(long, short, default_value = "Describe what you see in the image")]
    prompt: String,

    /// Override the configured model (e.g. "mistralai/mistral-medium-3",
    /// "openai/o4-mini")
    #[arg(long, short)]
    model: Option<String>,

    /// Override the configured sampling temperature (0.0 to 1.0)
    #[arg(long, short)]
    temperature: Option<f32>,

    /// List image-capable models (IDs only) and exit
    #[arg(long, conflicts_with_all = ["image_path", "list_models_with_details"])]
    list_models: bool,

    /// List image-capable models with pricing and context details and exit
    #[arg(long, conflicts_with = "image_path")]
    list_models_with_details: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Warnings go to stderr by default; RUST_LOG opens up the rest.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = OpenRouterClient::new();

    let result = if cli.list_models || cli.list_models_with_details {
        let mode = if cli.list_models_with_details {
            ListMode::Detailed
        } else {
            ListMode::Compact
        };
        models_cmd::run(&client, &CatalogCache::default_cache(), mode).await
    } else {
        match cli.image_path {
            None => Err(GlimpseError::Validation(
                "missing image path (or use --list-models)".to_string(),
            )),
            Some(image_path) => {
                analyze_cmd::run(
                    &client,
                    &image_path,
                    &cli.prompt,
                    &glimpse::config::default_config_path(),
                    cli.model.as_deref(),
                    cli.temperature,
                )
                .await
            }
        }
    };

    // Consistent exit codes: 0=success, 1=error.
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
