use algograph::graph::*;
use std::collections::HashMap;

/// One step of the random surfer standing on `page`.
///
/// With probability `damping` the surfer follows one of the out-links of
/// `page`, otherwise it jumps to a vertex chosen uniformly. A vertex without
/// out-links always jumps uniformly, whatever the damping.
///
/// Panics if `page` is not a vertex of `g`.
pub fn transition_model<G: QueryableGraph>(
    g: &G,
    page: VertexId,
    damping: f64,
) -> HashMap<VertexId, f64, ahash::RandomState> {
    assert!(g.contains_vertex(&page), "{page:?}");
    let n = g.vertex_size() as f64;
    let k = g.out_edges(&page).count();
    if k == 0 {
        return g.iter_vertices().map(|v| (v, 1.0 / n)).collect();
    }
    let mut dist: HashMap<_, _, ahash::RandomState> = g
        .iter_vertices()
        .map(|v| (v, (1.0 - damping) / n))
        .collect();
    let unit = damping / (k as f64);
    for e in g.out_edges(&page) {
        *dist.get_mut(&e.sink).unwrap() += unit;
    }
    dist
}
