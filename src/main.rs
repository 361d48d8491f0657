use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use citegraph::config::{load_config, CiteGraphConfig, CONFIG_FILENAME};
use citegraph::corpus::{write_artifact, Corpus};
use citegraph::errors::CiteGraphError;
use citegraph::extraction::extract_citations;
use citegraph::index::VolumeIndex;
use citegraph::pipeline::CitationPipeline;
use citegraph::resolution::FallbackPolicy;

/// Resolves U. S. Reports citations inside judicial opinions.
#[derive(Parser)]
#[command(name = "citegraph", about = "Resolves U. S. Reports citations inside judicial opinions")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every citation in a corpus and write the cited corpus
    Resolve {
        /// Corpus JSON file or directory of JSON shards
        input: PathBuf,
        /// Output artifact path
        #[arg(short, long, default_value = "cites.json")]
        output: PathBuf,
        /// Config file (default: citegraph.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Keep opinion text in the output artifact
        #[arg(short, long)]
        keep_text: bool,
        /// Fallback strategy (first-below or greatest-below)
        #[arg(short, long)]
        strategy: Option<String>,
        /// Process records on a single thread
        #[arg(long)]
        sequential: bool,
        /// Emit records in canonical (volume, date, page) order
        #[arg(long)]
        sort: bool,
        /// Print the metrics as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the citations found in a text file (or stdin)
    Extract {
        /// Text file to scan (default: stdin)
        file: Option<PathBuf>,
    },
    /// Show per-volume statistics for a corpus
    Stats {
        /// Corpus JSON file or directory of JSON shards
        input: PathBuf,
        /// Config file (default: citegraph.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "citegraph=debug" } else { "citegraph=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> citegraph::errors::Result<()> {
    match cli.command {
        Commands::Resolve {
            input,
            output,
            config,
            keep_text,
            strategy,
            sequential,
            sort,
            json,
        } => {
            let mut cfg = resolve_config(&input, config.as_deref())?;
            if keep_text {
                cfg.keep_text = true;
            }
            if let Some(name) = strategy {
                cfg.fallback = FallbackPolicy::from_str(&name).ok_or_else(|| {
                    CiteGraphError::Config {
                        message: format!(
                            "unknown fallback strategy '{}' (expected first-below or greatest-below)",
                            name
                        ),
                    }
                })?;
            }
            if sequential {
                cfg.parallel = false;
            }
            if sort {
                cfg.sort_output = true;
            }

            let corpus = Corpus::load(&input, &cfg)?;
            let result = CitationPipeline::new(cfg).run(&corpus)?;
            let digest = write_artifact(&output, &result.records)?;
            tracing::info!(path = %output.display(), digest = %digest, "output artifact written");

            let report = result.report();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "report": report,
                        "counts": result.metrics,
                        "digest": digest,
                    }))?
                );
            } else {
                println!("Cites: {}", report);
                println!(
                    "  Exact: {}  Modified: {}  Self: {}  Unresolved: {}  Dangling: {}  Uncorroborated: {}",
                    result.metrics.exact,
                    result.metrics.modified,
                    result.metrics.self_citations,
                    result.metrics.unresolved,
                    result.metrics.dangling,
                    result.metrics.uncorroborated
                );
                println!("  Wrote {} records to {} ({})", result.records.len(), output.display(), digest);
            }
        }
        Commands::Extract { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path).map_err(|e| CiteGraphError::File {
                    message: e.to_string(),
                    path: path.display().to_string(),
                })?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let citations = extract_citations(&text)?;
            println!("{}", serde_json::to_string_pretty(&citations)?);
        }
        Commands::Stats {
            input,
            config,
            json,
        } => {
            let cfg = resolve_config(&input, config.as_deref())?;
            let corpus = Corpus::load(&input, &cfg)?;
            let index = VolumeIndex::build(corpus.records());
            let counts = index.volume_counts();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "records": corpus.len(),
                        "distinct_numbers": index.len(),
                        "max_volume": index.max_volume(),
                        "volumes": counts,
                    }))?
                );
            } else {
                println!("Corpus Status");
                println!("  Records:    {}", corpus.len());
                println!("  Numbers:    {}", index.len());
                println!("  Max volume: {}", index.max_volume());
                if !counts.is_empty() {
                    println!("\n  Records by volume:");
                    for (volume, count) in &counts {
                        println!("    {}: {}", volume, count);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Loads the config from an explicit path, or from `citegraph.toml` beside
/// the corpus input (inside it, for a directory).
fn resolve_config(input: &Path, explicit: Option<&Path>) -> citegraph::errors::Result<CiteGraphConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None if input.is_dir() => input.join(CONFIG_FILENAME),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILENAME),
    };
    load_config(&path)
}
