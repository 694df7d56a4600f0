//! jobscout CLI - escalating job posting scraper command line interface.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use jobscout::{JobQuery, Pipeline, ResultSource};

/// jobscout - job posting URL scraper with escalating retrieval strategies
#[derive(Parser)]
#[command(name = "jobscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for job posting URLs
    Search(SearchArgs),

    /// List the escalation chain
    Strategies,
}

#[derive(Parser)]
struct SearchArgs {
    /// Job search term, e.g. "python developer"
    term: String,

    /// Region/country code
    #[arg(short, long, default_value = "IN")]
    region: String,

    /// Maximum number of URLs to display (text and compact formats)
    #[arg(short, long, default_value = "25")]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// One URL per line
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Strategies => list_strategies(),
    }
}

fn list_strategies() -> Result<()> {
    println!("Escalation chain (tried in order, cheapest first):\n");
    println!("  linkedin-http     - direct HTTP fetch with a static parse (threshold 5)");
    #[cfg(feature = "headless")]
    println!("  linkedin-browser  - headless Chrome, scrolls for lazy content (threshold 3)");
    println!("  indeed            - secondary listing site (threshold 3)");
    println!("  synthetic         - deterministic placeholders when nothing live is trustworthy");
    println!();
    println!("Usage: jobscout search \"python developer\" -r US");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    // Case-normalize the term before it reaches the pipeline.
    let query = JobQuery::new(args.term.to_lowercase()).with_region(args.region);

    let pipeline = Pipeline::with_default_strategies();
    let links = pipeline.run(&query).await;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&links)?);
        }
        OutputFormat::Compact => {
            for url in links.urls.iter().take(args.limit) {
                println!("{}", url);
            }
        }
        OutputFormat::Text => {
            println!(
                "Found {} job links in {}ms (source: {})\n",
                links.len(),
                links.duration_ms,
                source_label(links.source)
            );
            for (i, url) in links.urls.iter().take(args.limit).enumerate() {
                println!("{:3}. {}", i + 1, url);
            }
            if links.len() > args.limit {
                println!("\n... and {} more (raise --limit to see them)", links.len() - args.limit);
            }
            if links.source == ResultSource::Synthetic {
                println!("\nNote: no live strategy was trustworthy; these are placeholder links.");
            }
        }
    }

    Ok(())
}

fn source_label(source: ResultSource) -> &'static str {
    match source {
        ResultSource::Live => "live",
        ResultSource::Synthetic => "synthetic",
        ResultSource::Manual => "manual",
    }
}
