//! mcqgraph CLI: generate multiple-choice questions from a concept graph
//!
//! Works against the in-memory backend (optionally seeded from a concept
//! file) or a Neo4j server given with `--url`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use mcqgraph::backend::{self, GraphBackend, RemoteGraph};
use mcqgraph::sample::{self, load_concepts, neurotransmitters};
use mcqgraph::{
    BackendConfig, FakeWordRequest, FakeWordSynthesizer, McqConfig, McqGenerator, WordSplitter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mcqgraph", version, about = "Multiple-choice questions from a concept graph")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "MCQGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Neo4j HTTP URL; switches to the remote backend
    #[arg(long, global = true, env = "MCQGRAPH_URL")]
    url: Option<String>,

    /// Neo4j user name
    #[arg(long, global = true, env = "MCQGRAPH_USERNAME")]
    username: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "MCQGRAPH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate questions
    Generate {
        /// Seed of the first question; later ones use seed+1, seed+2, ...
        #[arg(long)]
        seed: Option<u64>,

        /// Concept file to load before generating
        #[arg(long)]
        concepts: Option<PathBuf>,

        /// Number of questions
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Replace the graph with the contents of a concept file
    Load {
        #[arg(long)]
        concepts: PathBuf,
    },
    /// Blend fake words from a list of real ones
    FakeWords {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        limit: usize,

        #[arg(long)]
        threshold: Option<f64>,

        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show the prefix/suffix pairs of words
    Split {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Node and relationship counts
    Stats,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Generate {
            seed,
            concepts,
            count,
        } => run_generate(&config, seed, concepts.as_deref(), count, &cli.format).await,
        Commands::Load { concepts } => run_load(&config, &concepts, &cli.format).await,
        Commands::FakeWords {
            seed,
            limit,
            threshold,
            words,
        } => {
            let threshold = threshold.unwrap_or(config.generator.fake_word_threshold);
            run_fake_words(words, seed, limit, threshold, &cli.format)
        }
        Commands::Split { words } => run_split(&words, &cli.format),
        Commands::Stats => run_stats(&config, &cli.format).await,
    }
}

/// File config (or defaults) with command-line overrides applied
fn resolve_config(cli: &Cli) -> anyhow::Result<McqConfig> {
    let mut config = match &cli.config {
        Some(path) => McqConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => McqConfig::default(),
    };

    if let Some(url) = &cli.url {
        let (database, radius) = match &config.backend {
            BackendConfig::Remote { database, radius, .. } => (database.clone(), *radius),
            BackendConfig::Memory { similarity, .. } => ("neo4j".to_string(), similarity.radius()),
        };
        config.backend = BackendConfig::Remote {
            url: url.clone(),
            database,
            username: cli.username.clone(),
            password: cli.password.clone(),
            radius,
        };
    }
    config.validate()?;
    Ok(config)
}

/// Open the configured backend; an in-memory graph without a concept file gets the sample graph
async fn open_backend(config: &McqConfig) -> anyhow::Result<Arc<dyn GraphBackend>> {
    let graph = backend::from_config(&config.backend).await?;
    if let BackendConfig::Memory { concepts: None, .. } = &config.backend {
        load_concepts(graph.as_ref(), &neurotransmitters()).await?;
    }
    Ok(graph)
}

async fn run_generate(
    config: &McqConfig,
    seed: Option<u64>,
    concepts: Option<&Path>,
    count: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let graph = open_backend(config).await?;
    if let Some(path) = concepts {
        let map = sample::read_concepts(path)
            .with_context(|| format!("reading concepts {}", path.display()))?;
        load_concepts(graph.as_ref(), &map).await?;
    }

    let generator = McqGenerator::new(graph)?.with_config(config.generator.clone());
    let mut questions = Vec::with_capacity(count);
    for i in 0..count {
        let seed = seed.map(|s| s.wrapping_add(i as u64));
        questions.push((seed, generator.generate(seed).await?));
    }

    match format {
        OutputFormat::Json => {
            let mcqs: Vec<_> = questions.iter().map(|(_, mcq)| mcq).collect();
            println!("{}", serde_json::to_string_pretty(&mcqs)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Seed", "Topic", "Answer", "Choices"]);
            for (seed, mcq) in &questions {
                table.add_row(vec![
                    seed.map_or_else(|| "-".to_string(), |s| s.to_string()),
                    mcq.topic.clone(),
                    mcq.answer.clone(),
                    mcq.choices.join(", "),
                ]);
            }
            println!("{}", table);
            println!("{} question(s)", questions.len());
        }
    }

    Ok(())
}

async fn run_load(config: &McqConfig, concepts: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let map = sample::read_concepts(concepts)
        .with_context(|| format!("reading concepts {}", concepts.display()))?;

    let graph: Arc<dyn GraphBackend> = match &config.backend {
        BackendConfig::Remote { url, .. } => {
            let remote = RemoteGraph::from_config(&config.backend)?;
            remote.ensure_schema().await?;
            info!("Schema ready at {}", url);
            Arc::new(remote)
        }
        BackendConfig::Memory { .. } => backend::from_config(&config.backend).await?,
    };

    load_concepts(graph.as_ref(), &map).await?;
    print_stats(graph.as_ref(), format).await
}

fn run_fake_words(
    words: Vec<String>,
    seed: Option<u64>,
    limit: usize,
    threshold: f64,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let splitter = WordSplitter::english()?;
    let request = FakeWordRequest::new(words)
        .limit(limit)
        .threshold(threshold)
        .seed(seed);
    let pairs = FakeWordSynthesizer::new(&splitter).generate_pairs(&request);

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = pairs
                .into_iter()
                .map(|(base, fake)| (base, serde_json::Value::String(fake)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Table => {
            if pairs.is_empty() {
                println!("(no fake words above {})", threshold);
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["Base", "Fake"]);
            for (base, fake) in pairs {
                table.add_row(vec![base, fake]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_split(words: &[String], format: &OutputFormat) -> anyhow::Result<()> {
    let splitter = WordSplitter::english()?;

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = words
                .iter()
                .map(|word| {
                    let pairs = splitter
                        .split(word)
                        .into_iter()
                        .map(|p| serde_json::json!([p.prefix, p.suffix]))
                        .collect();
                    (word.clone(), serde_json::Value::Array(pairs))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Word", "Pairs"]);
            for word in words {
                let pairs: Vec<String> = splitter.split(word).iter().map(|p| p.to_string()).collect();
                table.add_row(vec![word.clone(), pairs.join("  ")]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

async fn run_stats(config: &McqConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let graph = open_backend(config).await?;
    print_stats(graph.as_ref(), format).await
}

async fn print_stats(graph: &dyn GraphBackend, format: &OutputFormat) -> anyhow::Result<()> {
    let stats = graph.stats().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Table => {
            println!("Nodes:         {}", stats.nodes);
            println!("Relationships: {}", stats.relationships);
        }
    }

    Ok(())
}
