use super::*;
use crate::{error::check_damping, *};
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace, warn};

/// PageRank by power iteration.
///
/// Starting from the uniform distribution, all ranks are updated at once
/// from the previous round until no rank moves by more than `epsilon`.
/// Rank held by a vertex without out-links is spread over all vertices.
pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    dead_ends: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub iterations: usize,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        check_damping(config.damping)?;
        let epsilon = config.epsilon;
        if epsilon.is_nan() || epsilon <= 0.0 {
            return Err(Error::Tolerance(epsilon));
        }
        if config.max_iterations == 0 {
            return Err(Error::NoIterations);
        }
        if g.vertex_size() == 0 {
            return Err(Error::EmptyCorpus);
        }
        let mut dead_ends = vec![];
        let mut transitions = BTreeMap::new();
        for u in g.iter_vertices() {
            let n = g.out_edges(&u).count();
            if n == 0 {
                dead_ends.push(u);
                continue;
            }
            let unit = 1.0 / (n as f64);
            for v in g.out_edges(&u).map(|e| e.sink) {
                if let Some(w) = transitions.get_mut(&(u, v)) {
                    *w += unit;
                } else {
                    transitions.insert((u, v), unit);
                }
            }
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            epsilon,
            max_iterations: config.max_iterations,
            transitions,
            dead_ends,
        })
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let damping = self.damping;
        let n = self.graph.vertex_size() as f64;
        let mut p: HashMap<_, _, ahash::RandomState> =
            self.graph.iter_vertices().map(|v| (v, 1.0 / n)).collect();
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        for iteration in 1..=self.max_iterations {
            let dangling: f64 = self.dead_ends.iter().map(|v| p.get(v).unwrap()).sum();
            let base = (1.0 - damping) / n + damping * dangling / n;
            for v in self.graph.iter_vertices() {
                r.insert(v, base);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p.get(v0).unwrap();
                let to = r.get_mut(v1).unwrap();
                *to += damping * from * w;
            }

            delta.clear();
            for v in self.graph.iter_vertices() {
                let a = p.get(&v).unwrap();
                let b = r.get(&v).unwrap();
                delta.insert(v, b - a);
            }

            let residual = norm_inf(&delta);
            trace!(iteration, residual, "page rank step");
            if residual <= self.epsilon {
                debug!(iterations = iteration, residual, "page rank converged");
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    iterations: iteration,
                });
            }

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }
        warn!(
            iterations = self.max_iterations,
            residual = norm_inf(&delta),
            "page rank did not converge"
        );
        Err(Error::NotConverged {
            iterations: self.max_iterations,
        })
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
        writeln!(f, "iterations: {}", self.result.iterations)?;
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).unwrap();
            let d = self.result.delta.get(&v).unwrap();
            writeln!(f, "{v:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
