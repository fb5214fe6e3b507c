use anyhow::Context;
use clap::Parser;
use nosmarket_core::{Config, OutputFormat};
use nosmarket_ocr::ListingCapture;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nosmarket")]
#[command(about = "Read an item name and price out of a marketplace listing capture")]
struct Args {
    /// OCR text file, or an image with --image. Reads text from stdin when omitted.
    input: Option<PathBuf>,

    /// Treat INPUT as a listing screenshot and run OCR on it
    #[arg(long, requires = "input")]
    image: bool,

    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(long)]
    format: Option<OutputFormat>,
}

/// What gets handed to whoever stores or edits the listing next.
#[derive(Debug, Serialize)]
struct CaptureOutput<'a> {
    item_name: &'a str,
    item_price: &'a str,
    /// Numeric price when `item_price` is a number.
    price_value: Option<String>,
    price_fell_back: bool,
    date: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nosmarket=info,nosmarket_ocr=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(args.config.as_ref())?;
    let format = args.format.unwrap_or(config.output.format);

    let capture = if args.image {
        let path = args.input.as_deref().context("--image needs an input file")?;
        capture_image(&config, path).await?
    } else {
        let text = read_text(args.input.as_ref()).await?;
        ListingCapture::new(text, chrono::Local::now().naive_local())
    };

    let output = CaptureOutput {
        item_name: &capture.record.item_name,
        item_price: &capture.record.item_price,
        price_value: capture.record.price_value().map(|p| p.to_string()),
        price_fell_back: capture.price_fell_back,
        date: capture.date_stamp(&config.output.date_format),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Plain => {
            println!("{}\t{}\t{}", output.item_name, output.item_price, output.date)
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let Some(project_dirs) = directories::ProjectDirs::from("com", "nosmarket", "NosMarket")
    else {
        tracing::debug!("No platform config directory, using defaults");
        return Ok(Config::default());
    };
    let path = project_dirs.config_dir().join("config.toml");
    tracing::debug!("Loading config: {}", path.display());
    Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

async fn read_text(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read OCR text from {}", path.display())),
        None => {
            let text = tokio::task::spawn_blocking(|| {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).map(|_| buf)
            })
            .await??;
            Ok(text)
        }
    }
}

#[cfg(feature = "tesseract")]
async fn capture_image(config: &Config, path: &std::path::Path) -> anyhow::Result<ListingCapture> {
    use nosmarket_ocr::{ListingPipeline, TesseractRecognizer};

    let pipeline = ListingPipeline::new(TesseractRecognizer::from_settings(&config.ocr));
    pipeline
        .process_file(path)
        .await
        .with_context(|| format!("Failed to process {}", path.display()))
}

#[cfg(not(feature = "tesseract"))]
async fn capture_image(_config: &Config, _path: &std::path::Path) -> anyhow::Result<ListingCapture> {
    Err(nosmarket_ocr::OcrError::NotAvailable.into())
}
