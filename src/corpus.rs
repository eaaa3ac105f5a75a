use crate::{page_rank::transition_model, Error};
use algograph::graph::*;
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::Path,
};
use tracing::debug;

/// Page name to PageRank estimate, ordered by page name.
pub type RankTable = BTreeMap<String, f64>;

/// Page name to the probability of visiting it next.
pub type Distribution = BTreeMap<String, f64>;

const LINK_PATTERN: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// A closed set of pages and the links among them.
///
/// Every link target is itself a page of the corpus and no page links to
/// itself. Each page is a vertex of a directed graph; each distinct link is
/// one edge.
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    vertices: BTreeMap<String, VertexId>,
    pages: HashMap<VertexId, String, ahash::RandomState>,
}

impl Corpus {
    /// Builds a corpus from pages and their outgoing links.
    ///
    /// Links to pages that are not listed, and links of a page to itself,
    /// are dropped. A page listed twice gets the union of its links.
    pub fn from_links<I, P, L, T>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let raw = {
            let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
            for (page, targets) in links {
                raw.entry(page.into())
                    .or_default()
                    .extend(targets.into_iter().map(Into::into));
            }
            raw
        };
        let mut graph = directed::TreeBackedGraph::new();
        let vertices: BTreeMap<String, VertexId> = raw
            .keys()
            .map(|page| (page.clone(), graph.add_vertex()))
            .collect();
        for (page, targets) in raw.iter() {
            let u = *vertices.get(page).unwrap();
            for target in targets.iter() {
                if target == page {
                    continue;
                }
                if let Some(v) = vertices.get(target) {
                    graph.add_edge(u, *v);
                }
            }
        }
        let pages = vertices.iter().map(|(p, v)| (*v, p.clone())).collect();
        Self {
            graph,
            vertices,
            pages,
        }
    }

    /// Reads every `.html` file directly under `dir` as a page named after
    /// its file name, linking it to the pages its anchors point at.
    pub fn crawl<P: AsRef<Path>>(dir: P) -> crate::Result<Self> {
        let dir = dir.as_ref();
        let pattern = Regex::new(LINK_PATTERN)?;
        let mut links = vec![];
        for entry in fs::read_dir(dir).map_err(io_error(dir))? {
            let entry = entry.map_err(io_error(dir))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.ends_with(".html") {
                continue;
            }
            let path = entry.path();
            let contents = fs::read_to_string(&path).map_err(io_error(&path))?;
            let targets: Vec<String> = pattern
                .captures_iter(&contents)
                .map(|c| c[1].to_string())
                .collect();
            links.push((name.to_string(), targets));
        }
        let res = Self::from_links(links);
        debug!(
            dir = %dir.display(),
            pages = res.len(),
            links = res.graph.edge_size(),
            "crawled corpus"
        );
        Ok(res)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.vertices.contains_key(page)
    }

    /// Page names in sorted order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.keys().map(String::as_str)
    }

    /// Sorted names of the pages `page` links to, or `None` for an unknown
    /// page.
    pub fn links(&self, page: &str) -> Option<Vec<&str>> {
        let u = self.vertex(page)?;
        let mut res: Vec<&str> = self
            .graph
            .out_edges(&u)
            .map(|e| self.pages.get(&e.sink).unwrap().as_str())
            .collect();
        res.sort_unstable();
        Some(res)
    }

    pub fn vertex(&self, page: &str) -> Option<VertexId> {
        self.vertices.get(page).copied()
    }

    pub fn page(&self, vertex: VertexId) -> Option<&str> {
        self.pages.get(&vertex).map(String::as_str)
    }

    pub fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }

    /// Names the vertices of a result computed over [`Corpus::graph`].
    pub fn rank_table(&self, ranks: &HashMap<VertexId, f64, ahash::RandomState>) -> RankTable {
        self.vertices
            .iter()
            .map(|(page, v)| (page.clone(), ranks.get(v).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Where a random surfer on `page` goes next.
    pub fn transition_model(&self, page: &str, damping: f64) -> crate::Result<Distribution> {
        crate::error::check_damping(damping)?;
        let u = self
            .vertex(page)
            .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
        let dist = transition_model(&self.graph, u, damping);
        Ok(self.rank_table(&dist))
    }
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for page in self.pages() {
            m.entry(&page, &self.links(page).unwrap_or_default());
        }
        m.finish()
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use quickcheck_macros::quickcheck;
    use tempfile::TempDir;

    #[test]
    fn drops_self_and_foreign_links() {
        let corpus = Corpus::from_links([
            ("a", vec!["a", "b", "x"]),
            ("b", vec!["c", "c"]),
            ("c", vec![]),
        ]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.links("a").unwrap(), vec!["b"]);
        assert_eq!(corpus.links("b").unwrap(), vec!["c"]);
        assert!(corpus.links("c").unwrap().is_empty());
        assert!(corpus.links("x").is_none());
        assert!(!corpus.contains("x"));
        assert_eq!(corpus.graph().edge_size(), 2);
    }

    #[test]
    fn repeated_page_merges_links() {
        let corpus = Corpus::from_links([
            ("a", vec!["b"]),
            ("b", vec![]),
            ("a", vec!["c"]),
            ("c", vec![]),
        ]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.links("a").unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn empty() {
        let corpus = Corpus::from_links(Vec::<(String, Vec<String>)>::new());
        assert!(corpus.is_empty());
        assert_eq!(corpus.pages().count(), 0);
    }

    #[test]
    fn vertices_and_pages_agree() {
        let corpus = Corpus::from_links([("b", vec!["a"]), ("a", vec![])]);
        assert_eq!(corpus.pages().collect::<Vec<_>>(), vec!["a", "b"]);
        for page in corpus.pages() {
            let v = corpus.vertex(page).unwrap();
            assert_eq!(corpus.page(v), Some(page));
        }
    }

    #[test]
    fn named_transition_model() {
        let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec![])]);
        let dist = corpus.transition_model("a", 0.8).unwrap();
        assert_close(dist["a"], 0.1);
        assert_close(dist["b"], 0.9);
        let dist = corpus.transition_model("b", 0.8).unwrap();
        assert_close(dist["a"], 0.5);
        assert_close(dist["b"], 0.5);

        assert!(matches!(
            corpus.transition_model("c", 0.8),
            Err(Error::UnknownPage(p)) if p == "c"
        ));
        assert!(matches!(
            corpus.transition_model("a", 1.5),
            Err(Error::Damping(_))
        ));
    }

    #[test]
    fn crawl_directory() {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, contents: &str| {
            fs::write(dir.path().join(name), contents).unwrap();
        };
        write(
            "1.html",
            r#"<html><body>
            <a href="2.html">Two</a>
            <a class="x" href="3.html">Three</a>
            <a href="1.html">Self</a>
            <a href="https://example.com/">Elsewhere</a>
            </body></html>"#,
        );
        write("2.html", r#"<p><a  href="3.html">Three</a></p>"#);
        write("3.html", "<p>no links</p>");
        write("notes.txt", r#"<a href="1.html">ignored</a>"#);

        let corpus = Corpus::crawl(dir.path()).unwrap();
        assert_eq!(
            corpus.pages().collect::<Vec<_>>(),
            vec!["1.html", "2.html", "3.html"]
        );
        assert_eq!(corpus.links("1.html").unwrap(), vec!["2.html", "3.html"]);
        assert_eq!(corpus.links("2.html").unwrap(), vec!["3.html"]);
        assert!(corpus.links("3.html").unwrap().is_empty());
    }

    #[test]
    fn crawl_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        match Corpus::crawl(&missing) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("{other:?}"),
        }
    }

    #[quickcheck]
    fn links_stay_inside(c: RandomCorpus) {
        let corpus = c.corpus();
        assert_eq!(corpus.len(), c.links.len());
        for page in corpus.pages() {
            let links = corpus.links(page).unwrap();
            assert!(links.iter().all(|l| corpus.contains(l)), "{corpus:?}");
            assert!(!links.contains(&page), "{corpus:?}");
        }
    }
}
