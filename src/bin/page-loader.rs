//! Command line interface: download one page for offline viewing.

use clap::Parser;
use page_loader::{error_chain, loader::PageLoaderBuilder, StyleOptions};
use reqwest::header::{HeaderValue, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Download a web page and its same-host images, stylesheets and scripts.
#[derive(Debug, Parser)]
#[command(name = "page-loader", version)]
#[command(about = "Download a web page for offline viewing", long_about = None)]
struct Cli {
    /// Absolute http(s) URL of the page.
    url: String,

    /// Directory to save the page into.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Retry transient failures up to N times per resource.
    #[arg(long, default_value = "0", value_name = "N")]
    retries: u32,

    /// Timeout of every request, in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Fetch up to N assets at once.
    #[arg(long, default_value = "8", value_name = "N")]
    concurrency: usize,

    /// User-Agent header sent with every request.
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Hide the progress bars.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let mut builder = PageLoaderBuilder::new()
        .retries(cli.retries)
        .concurrent_downloads(cli.concurrency);
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if cli.quiet {
        builder = builder.style_options(StyleOptions::hidden());
    }
    if let Some(ua) = cli.user_agent {
        match HeaderValue::from_str(&ua) {
            Ok(value) => builder = builder.header(USER_AGENT, value),
            Err(e) => {
                eprintln!("page-loader error: invalid user agent {:?}: {}", ua, e);
                std::process::exit(1);
            }
        }
    }

    let output = match cli.output {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_default(),
    };

    match builder.build().download(&cli.url, &output).await {
        Ok(result) => println!("{}", result.into_page_file().display()),
        Err(err) => {
            eprintln!("page-loader error: {}", error_chain(&err));
            std::process::exit(1);
        }
    }
}
