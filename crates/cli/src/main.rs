use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{RecommendationResponse, RecommendationService, RecommenderConfig};
use rand::seq::IndexedRandom;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// ReelMatch - content-based movie recommendations
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Recommend movies similar to one you like", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(short, long, global = true, default_value = "data/movies.csv")]
    data_file: PathBuf,

    /// JSON config file (top_k, match_cutoff, max_matches, vectorizer)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the fuzzy title-match cutoff (0.0 - 1.0)
    #[arg(long, global = true)]
    cutoff: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title; prompts on stdin when omitted
        #[arg(long)]
        title: Option<String>,

        /// Number of recommendations to return
        #[arg(long)]
        top_k: Option<usize>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog titles that fuzzily match a query
    Search {
        #[arg(long)]
        title: String,

        /// Maximum number of matches to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Run benchmark to test query latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Fit the model (this may take a moment)
    println!("Loading movie catalog from {}...", cli.data_file.display());
    let start = Instant::now();
    let data_file = cli.data_file.clone();
    let build_config = config.clone();
    let service = tokio::task::spawn_blocking(move || {
        RecommendationService::load(&data_file, build_config)
    })
    .await
    .context("Model build task panicked")?
    .with_context(|| format!("Failed to build model from {}", cli.data_file.display()))?;
    let service = Arc::new(service);
    println!(
        "{} Built model for {} movies in {:?}",
        "✓".green(),
        service.snapshot().catalog().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { title, top_k, json } => {
            handle_recommend(&service, title, top_k.unwrap_or(config.top_k), json).await?
        }
        Commands::Search { title, limit } => handle_search(&service, &title, limit)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent, config.top_k).await?,
    }

    Ok(())
}

/// Config file (if any), then command-line overrides
fn load_config(cli: &Cli) -> Result<RecommenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    if let Some(cutoff) = cli.cutoff {
        config = config.with_match_cutoff(cutoff);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    title: Option<String>,
    top_k: usize,
    json: bool,
) -> Result<()> {
    let title = match title {
        Some(title) => title,
        None => prompt_title()?,
    };

    let response = service
        .recommend_async(title.clone(), top_k)
        .await
        .with_context(|| format!("No recommendations for '{}'", title))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_recommendations(&response);
    }
    Ok(())
}

/// Ask for a title on stdin
fn prompt_title() -> Result<String> {
    print!("Enter your favourite movie name : ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read movie name")?;

    let title = line.trim().to_string();
    if title.is_empty() {
        bail!("No movie name given");
    }
    Ok(title)
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str, limit: usize) -> Result<()> {
    let model = service.snapshot();
    let matches = model.search(title, limit)?;

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  No titles match (cutoff {})", model.config().match_cutoff);
    }
    for title_match in matches {
        let index = model
            .catalog()
            .index_of_title(&title_match.title)
            .map(|i| i.to_string())
            .unwrap_or_default();
        println!(
            "{}: {} (ratio {:.3})",
            index,
            title_match.title,
            title_match.score
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: Arc<RecommendationService>,
    requests: usize,
    concurrent: usize,
    top_k: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be greater than 0");
    }

    // Random catalog titles as queries
    let titles: Vec<String> = {
        let model = service.snapshot();
        let catalog_titles = model.catalog().titles();
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| catalog_titles.choose(&mut rng).cloned())
            .collect()
    };
    info!(
        "Running {} requests with concurrency {}",
        titles.len(),
        concurrent
    );

    let semaphore = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for title in titles {
        let service = service.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            service.recommend_async(title, top_k).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of sorted, non-empty timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Helper function to format and print recommendations
fn print_recommendations(response: &RecommendationResponse) {
    if response.resolved.title != response.query {
        println!(
            "{} '{}' matched '{}' ({:.2})",
            "→".yellow(),
            response.query,
            response.resolved.title,
            response.resolved.match_score
        );
    }

    println!("{}", "Movies suggested for you :".bold().blue());
    for rec in &response.recommendations {
        println!(
            "{}. {} - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title,
            rec.score
        );
    }
}
