use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus has no pages")]
    EmptyCorpus,

    #[error("damping factor must lie in (0, 1), got {0}")]
    Damping(f64),

    #[error("sample count must be at least 1")]
    NoSamples,

    #[error("convergence tolerance must be positive, got {0}")]
    Tolerance(f64),

    #[error("iteration bound must be at least 1")]
    NoIterations,

    #[error("page not in corpus: {0}")]
    UnknownPage(String),

    #[error("transition distribution of {page} sums to {sum}")]
    Distribution { page: String, sum: f64 },

    #[error("invalid sampling weights: {0}")]
    Weights(#[from] rand::distr::weighted::Error),

    #[error("page rank did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("link pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether the error stems from the arguments handed to an engine,
    /// as opposed to the computation or the corpus on disk.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyCorpus
                | Self::Damping(_)
                | Self::NoSamples
                | Self::Tolerance(_)
                | Self::NoIterations
                | Self::UnknownPage(_)
                | Self::Distribution { .. }
                | Self::Weights(_)
        )
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::Damping(damping))
    }
}
