pub mod iterated;
pub mod sampled;
mod traits;
pub use self::traits::*;
mod transition;
pub use self::transition::transition_model;

use crate::{Corpus, RankTable};
use rand::Rng;

/// Estimates the PageRank of every page by random-surfer sampling, drawing
/// on the thread-local generator.
pub fn sample_pagerank(
    corpus: &Corpus,
    damping_factor: f64,
    sample_count: usize,
) -> crate::Result<RankTable> {
    sample_pagerank_with(corpus, damping_factor, sample_count, rand::rng())
}

pub fn sample_pagerank_with<R: Rng>(
    corpus: &Corpus,
    damping_factor: f64,
    sample_count: usize,
    rng: R,
) -> crate::Result<RankTable> {
    let cfg = sampled::Config {
        damping: damping_factor,
        samples: sample_count,
    };
    let res = sampled::SampledPageRank::new(corpus.graph(), &cfg, rng)?.calc()?;
    Ok(corpus.rank_table(res.page_rank()))
}

/// Computes the PageRank of every page by iterating to a fixed point.
pub fn iterate_pagerank(corpus: &Corpus, damping_factor: f64) -> crate::Result<RankTable> {
    let cfg = iterated::Config {
        damping: damping_factor,
        ..Default::default()
    };
    let res = iterated::IteratedPageRank::new(corpus.graph(), &cfg)?.calc()?;
    Ok(corpus.rank_table(res.page_rank()))
}
