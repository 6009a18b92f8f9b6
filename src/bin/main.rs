use anyhow::Context;
use clap::{Parser, Subcommand};
use graph_corpus::prelude::*;
use graph_corpus::SyntheticKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graph-corpus")]
#[command(about = "Sample and cache subgraph corpora for graph representation learning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build (or load) the cached splits of one dataset
    Prepare {
        /// JSON config file; flags given alongside it override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(short, long)]
        dataset: Option<String>,
        /// One of train, val, test; all three when omitted
        #[arg(short, long)]
        stage: Option<Stage>,
        #[arg(short, long)]
        num_samples: Option<usize>,
        #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
        budget: Option<Vec<usize>>,
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated algorithm ids
        #[arg(short, long, value_delimiter = ',')]
        algorithms: Option<Vec<AlgorithmId>>,
        #[arg(short, long)]
        workers: Option<usize>,
        #[arg(short, long)]
        task: Option<TaskType>,
        /// Generate the dataset with this synthetic generator instead of reading raw files
        #[arg(long)]
        synthetic: Option<SyntheticKind>,
    },
    /// Print statistics of a cached split
    Inspect {
        #[arg(short, long)]
        root: PathBuf,
        #[arg(short, long)]
        dataset: String,
        #[arg(short, long, default_value = "train")]
        stage: Stage,
    },
}

fn print_summary(stage: Stage, handle: &DatasetHandle) {
    let (nodes, edges) = handle
        .iter()
        .fold((0usize, 0usize), |(n, e), s| (n + s.num_nodes(), e + s.num_edges()));
    let mean = |total: usize| if handle.is_empty() { 0.0 } else { total as f64 / handle.len() as f64 };
    println!(
        "{:<6} {:>8} samples  {:>8.1} nodes/sample  {:>8.1} edges/sample",
        stage,
        handle.len(),
        mean(nodes),
        mean(edges)
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare {
            config,
            root,
            dataset,
            stage,
            num_samples,
            budget,
            seed,
            algorithms,
            workers,
            task,
            synthetic,
        } => {
            let mut corpus = match &config {
                Some(path) => CorpusConfig::from_json_file(path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => CorpusConfig::default(),
            };
            if let Some(root) = root {
                corpus.root = root;
            }
            if let Some(dataset) = dataset {
                corpus.dataset = dataset;
            }
            if let Some(num_samples) = num_samples {
                corpus.num_samples = num_samples;
            }
            if let Some(budget) = budget {
                corpus.node_budget_range = (budget[0], budget[1]);
            }
            if let Some(seed) = seed {
                corpus.seed = seed;
            }
            if let Some(algorithms) = algorithms {
                corpus.algorithms = algorithms;
            }
            if workers.is_some() {
                corpus.workers = workers;
            }
            if let Some(task) = task {
                corpus.task = task;
            }
            corpus.validate()?;

            let local = LocalSource::new(&corpus.root);
            let source: Box<dyn GraphSource> = match synthetic {
                Some(kind) => {
                    let mut generator = SyntheticSource::new(corpus.seed);
                    generator.register(corpus.dataset.clone(), kind)?;
                    Box::new(CachedSource::new(local, generator))
                }
                None => Box::new(local),
            };

            let prepared = match stage {
                Some(stage) => vec![(stage, prepare_split(source.as_ref(), &corpus.for_stage(stage))?)],
                None => prepare_splits(source.as_ref(), &corpus)?,
            };

            println!("{} ({})", corpus.dataset, corpus.dataset_root().display());
            for (stage, handle) in &prepared {
                print_summary(*stage, handle);
            }
        }
        Commands::Inspect { root, dataset, stage } => {
            let cache = SplitCache::new(root.join(&dataset));
            let split = cache
                .load(stage)
                .with_context(|| format!("loading {} split of {}", stage, dataset))?;

            println!("{} {} task={}", dataset, cache.split_path(stage).display(), split.task());
            println!(
                "node width {}, edge width {}, {} nodes, {} edges in total",
                split.storage().node_width,
                split.storage().edge_width,
                split.total_nodes(),
                split.total_edges()
            );
            print_summary(stage, &DatasetHandle::new(dataset, split));
        }
    }

    Ok(())
}
