use super::*;
use crate::{error::check_damping, *};
use algograph::graph::{QueryableGraph, VertexId};
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    seq::IndexedRandom,
    Rng,
};
use std::{cell::RefCell, collections::HashMap};
use tracing::debug;

/// PageRank by walking a random surfer through the graph.
///
/// The surfer starts on a uniformly chosen vertex and takes `samples` steps
/// following [`transition_model`]. The rank of a vertex is the fraction of
/// steps spent on it.
pub struct SampledPageRank<'a, G, R>
where
    G: QueryableGraph,
    R: Rng,
{
    graph: &'a G,
    samples: usize,
    vertices: Vec<VertexId>,
    transitions: HashMap<VertexId, WeightedIndex<f64>, ahash::RandomState>,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

impl<'a, G: QueryableGraph, R: Rng> SampledPageRank<'a, G, R> {
    pub fn new(g: &'a G, config: &Config, rng: R) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(Error::NoSamples);
        }
        if g.vertex_size() == 0 {
            return Err(Error::EmptyCorpus);
        }
        let vertices: Vec<_> = g.iter_vertices().collect();
        let mut transitions = HashMap::with_hasher(ahash::RandomState::new());
        for u in vertices.iter().copied() {
            let dist = transition_model(g, u, config.damping);
            let weights: Vec<f64> = vertices.iter().map(|v| *dist.get(v).unwrap()).collect();
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
                return Err(Error::Distribution {
                    page: format!("{u:?}"),
                    sum,
                });
            }
            transitions.insert(u, WeightedIndex::new(&weights)?);
        }
        Ok(Self {
            graph: g,
            samples: config.samples,
            vertices,
            transitions,
            rng: RefCell::new(rng),
        })
    }
}

impl<G: QueryableGraph, R: Rng> PageRank for SampledPageRank<'_, G, R> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = self.rng.borrow_mut();
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0usize)).collect();
        let mut cur = *self.vertices.choose(&mut *rng).unwrap();
        for _ in 0..self.samples {
            *visits.get_mut(&cur).unwrap() += 1;
            let next = self.transitions.get(&cur).unwrap().sample(&mut *rng);
            cur = self.vertices[next];
        }
        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        debug!(
            samples = self.samples,
            vertices = self.graph.vertex_size(),
            "page rank sampled"
        );
        Ok(Self::Result { page_rank, visits })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a, G: QueryableGraph> {
    graph: &'a G,
    result: &'a self::Result,
}

impl<G: QueryableGraph> std::fmt::Debug for ResultDebug<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).unwrap();
            let c = self.result.visits.get(&v).unwrap();
            writeln!(f, "{v:?}: {p:?}, {c}")?;
        }
        Ok(())
    }
}
