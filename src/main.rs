//! researchnet - Research Network Preprocessor
//!
//! Fetches an institution's papers from OpenAlex, derives citation and
//! collaboration networks plus timeline/histogram datasets, and serves them to
//! a dashboard.
//!
//! ## Usage
//!
//! ```bash
//! researchnet fetch --max-papers 200 --output papers.json
//! researchnet preprocess --input papers.json --data-dir ./data
//! researchnet serve --data-dir ./data --port 5000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use researchnet::{
    artifacts::{ArtifactStore, NetworkArtifacts},
    config::{DuplicateAuthorPolicy, NetworkConfig, DEFAULT_MIN_COLLABORATION_WEIGHT},
    openalex,
    paper::{self, DatasetStats},
    server,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Research Network Preprocessor
#[derive(Parser)]
#[command(name = "researchnet")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch papers from OpenAlex into a JSON file
    Fetch {
        /// OpenAlex institution id
        #[arg(long, default_value = openalex::DEFAULT_INSTITUTION)]
        institution: String,

        /// OpenAlex concept id
        #[arg(long, default_value = openalex::DEFAULT_CONCEPT)]
        concept: String,

        /// First publication year (default: current year - 5)
        #[arg(long)]
        ylo: Option<i32>,

        /// Last publication year (default: current year)
        #[arg(long)]
        yhi: Option<i32>,

        /// Maximum number of papers to fetch
        #[arg(long, default_value = "200")]
        max_papers: usize,

        /// Results per page
        #[arg(long, default_value = "50")]
        per_page: usize,

        /// Contact email for the OpenAlex polite pool
        #[arg(long, default_value = openalex::DEFAULT_MAILTO)]
        mailto: String,

        /// Delay between page requests in milliseconds
        #[arg(long, default_value = "100")]
        delay_ms: u64,

        /// Output file
        #[arg(short, long, default_value = "papers.json")]
        output: PathBuf,
    },

    /// Build networks, timeline and histograms from a paper file
    Preprocess {
        /// Paper list produced by `fetch`
        #[arg(short, long, default_value = "papers.json")]
        input: PathBuf,

        /// Directory for the JSON artifacts
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Minimum number of shared papers for a collaboration link
        #[arg(long, default_value_t = DEFAULT_MIN_COLLABORATION_WEIGHT)]
        min_weight: u32,

        /// Count an author listed twice on one paper only once
        #[arg(long)]
        dedupe_authors: bool,

        /// Also write timeline and collaboration links as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Run the read-only HTTP API over preprocessed artifacts
    Serve {
        /// Directory holding the JSON artifacts
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print statistics for a paper file
    Stats {
        /// Paper list produced by `fetch`
        #[arg(short, long, default_value = "papers.json")]
        input: PathBuf,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Fetch {
            institution,
            concept,
            ylo,
            yhi,
            max_papers,
            per_page,
            mailto,
            delay_ms,
            output,
        } => {
            let defaults = openalex::FetchOptions::default();
            let options = openalex::FetchOptions {
                institution,
                concept,
                ylo: ylo.unwrap_or(defaults.ylo),
                yhi: yhi.unwrap_or(defaults.yhi),
                max_papers,
                per_page,
                mailto,
                request_delay: Duration::from_millis(delay_ms),
                ..defaults
            };
            run_fetch(&options, output).await
        }
        Commands::Preprocess {
            input,
            data_dir,
            min_weight,
            dedupe_authors,
            csv,
        } => {
            let config = NetworkConfig {
                min_collaboration_weight: min_weight,
                duplicate_authors: if dedupe_authors {
                    DuplicateAuthorPolicy::OncePerPaper
                } else {
                    DuplicateAuthorPolicy::PerOccurrence
                },
                ..Default::default()
            };
            run_preprocess(input, data_dir, &config, csv)
        }
        Commands::Serve {
            data_dir,
            port,
            host,
        } => run_server(data_dir, host, port).await,
        Commands::Stats { input } => {
            let papers = paper::load_papers(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            print_stats(&DatasetStats::from_papers(&papers));
            Ok(())
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn run_fetch(options: &openalex::FetchOptions, output: PathBuf) -> Result<()> {
    println!("Fetching up to {} papers from OpenAlex...", options.max_papers);

    let papers = openalex::fetch_papers(options)
        .await
        .context("OpenAlex fetch failed")?;

    paper::save_papers(&output, &papers)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved {} papers to {}", papers.len(), output.display());

    print_stats(&DatasetStats::from_papers(&papers));
    Ok(())
}

fn run_preprocess(
    input: PathBuf,
    data_dir: PathBuf,
    config: &NetworkConfig,
    csv: bool,
) -> Result<()> {
    let papers = paper::load_papers(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let artifacts =
        NetworkArtifacts::build(&papers, config).context("Invalid network configuration")?;

    let store = ArtifactStore::new(data_dir);
    store.save_all(&artifacts).context("Failed to save artifacts")?;
    if csv {
        store.export_csv(&artifacts).context("Failed to export CSV")?;
    }

    info!(dir = ?store.dir(), "Preprocessing complete");
    println!("\n✓ All preprocessing complete! Results in: {}", store.dir().display());
    Ok(())
}

async fn run_server(data_dir: PathBuf, host: String, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    println!("Starting API server at http://{}", addr);
    let store = ArtifactStore::new(data_dir);
    server::run(&store, addr).await.context("Server error")?;
    Ok(())
}

fn print_stats(stats: &DatasetStats) {
    println!("\n=== Statistics ===");
    println!("Total papers: {}", stats.total_papers);
    if let Some((min, max)) = stats.year_range {
        println!("Year range: {} - {}", min, max);
    }
    println!("Total citations: {}", stats.total_citations);
    println!("Average citations per paper: {:.1}", stats.mean_citations);
}
