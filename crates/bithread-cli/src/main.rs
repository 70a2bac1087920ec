use anyhow::{Context, Result};
use bithread_acquire::FetchOptions;
use bithread_generate::{GeminiClient, GeminiConfig};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bithread")]
#[command(about = "Turn a web page into bilingual (Indonesian/English) Twitter threads")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// Website URL to scrape (prompted for when omitted)
    #[arg(short, long)]
    url: Option<String>,

    /// Product name to feature in the thread (prompted for when omitted)
    #[arg(short, long)]
    product: Option<String>,

    /// Directory for thread_id.txt and thread_en.txt
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: PathBuf,

    /// Gemini model identifier (e.g., "gemini-1.5-pro-latest")
    #[arg(short, long)]
    model: Option<String>,

    /// Seconds to wait for the Gemini API before giving up
    #[arg(long, default_value_t = 120)]
    gemini_timeout: u64,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; the key may come from the real environment
    dotenv::dotenv().ok();
    init_tracing(&cli);

    println!("=== Bilingual Crypto Thread Generator ===");
    println!("Input URL website untuk dibuat thread edukasi bilingual\n");

    let url = match cli.url {
        Some(url) => url.trim().to_string(),
        None => read_answer("Website URL")?,
    };
    let product_name = match cli.product {
        Some(product) => product.trim().to_string(),
        None => read_answer("Product Name")?,
    };

    let mut config = GeminiConfig::from_env()
        .with_timeout(Duration::from_secs(cli.gemini_timeout));
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation will fail");
    }
    let client = GeminiClient::new(config)?;

    run(&url, &product_name, &client, &cli.output_dir).await?;
    Ok(())
}

/// Scrape `url`, generate both threads, write them to `output_dir` and print
/// the preview. Returns the written paths.
///
/// A scrape or generation failure returns early, before any file is written.
async fn run(
    url: &str,
    product_name: &str,
    client: &GeminiClient,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    // Step 1: scrape
    println!("\n🔍 Scraping: {url}");
    let page = bithread_acquire::fetch_with(url, &FetchOptions::default())
        .await
        .context("Failed to scrape website")?;
    println!("✅ Retrieved {} characters", page.retrieved_chars);

    // Step 2: generate
    println!("\n🌐 Generating bilingual content...");
    tracing::info!(product = %product_name, model = %client.config().model, "Generating threads");
    let raw = client
        .generate(&page.text, product_name)
        .await
        .context("Failed to generate content")?;

    // Step 3 + 4: split and pack
    let threads = bithread_format::build_threads(&raw);

    let paths = bithread_format::output::write_threads(&threads, output_dir)?;

    print!("{}", bithread_format::output::render_preview(&threads));
    print!("{}", bithread_format::output::render_saved(&threads, &paths));

    Ok(paths)
}

fn init_tracing(cli: &Cli) {
    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr so the thread preview on stdout stays clean
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

/// Prompt on stdout and read one trimmed line from stdin.
fn read_answer(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .with_context(|| format!("Failed to read {label}"))?;
    Ok(answer.trim().to_string())
}
