use crate::Corpus;
use quickcheck::{Arbitrary, Gen};

pub fn assert_close(trial: f64, oracle: f64) {
    assert!((trial - oracle).abs() < 1e-9, "{trial} vs {oracle}");
}

pub fn page_name(i: usize) -> String {
    format!("{i}.html")
}

#[derive(Debug, Clone)]
pub struct RandomCorpus {
    pub links: Vec<(String, Vec<String>)>,
}

impl RandomCorpus {
    pub fn corpus(&self) -> Corpus {
        Corpus::from_links(self.links.iter().cloned())
    }
}

impl Arbitrary for RandomCorpus {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 8;

        let n: usize = usize::arbitrary(g) % N + 1;
        let mut links: Vec<(String, Vec<String>)> =
            (0..n).map(|i| (page_name(i), vec![])).collect();
        for _ in 0..(usize::arbitrary(g) % (2 * n + 1)) {
            let u = usize::arbitrary(g) % n;
            // occasionally point outside the corpus, which must be dropped
            let v = usize::arbitrary(g) % (n + 1);
            links[u].1.push(page_name(v));
        }
        Self { links }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Damping(pub f64);

impl Arbitrary for Damping {
    fn arbitrary(g: &mut Gen) -> Self {
        let x = u32::arbitrary(g) % 19 + 1;
        Self(f64::from(x) * 0.05)
    }
}
