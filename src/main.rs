use clap::Parser;
use corpus_rank::{iterate_pagerank, sample_pagerank_with, Corpus, RankTable};
use rand::{rngs::SmallRng, SeedableRng};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Rank the pages of a directory of hyperlinked HTML files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the `.html` pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, default_value_t = 0.85)]
    damping: f64,

    /// Number of steps the random surfer takes
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Seed for the random surfer; drawn at random when absent
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> corpus_rank::Result<()> {
    let corpus = Corpus::crawl(&cli.corpus)?;
    info!(pages = corpus.len(), corpus = %cli.corpus.display(), "corpus loaded");

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "sampling");
    let rng = SmallRng::seed_from_u64(seed);
    let ranks = sample_pagerank_with(&corpus, cli.damping, cli.samples, rng)?;
    report(
        &format!("PageRank Results from Sampling (n = {})", cli.samples),
        &ranks,
    );

    let ranks = iterate_pagerank(&corpus, cli.damping)?;
    report("PageRank Results from Iteration", &ranks);
    Ok(())
}

fn report(title: &str, ranks: &RankTable) {
    println!("{title}");
    for (page, rank) in ranks.iter() {
        println!("  {page}: {rank:.4}");
    }
}
