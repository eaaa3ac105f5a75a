//! PageRank over a closed corpus of hyperlinked pages.
//!
//! Two independent estimators are offered: a random surfer walking the
//! corpus ([`sample_pagerank`]) and power iteration to the fixed point
//! ([`iterate_pagerank`]). Both treat a page without links as linking to
//! every page.

mod common;
pub use self::common::*;
mod corpus;
pub use self::corpus::{Corpus, Distribution, RankTable};
mod error;
pub use self::error::{Error, Result};

pub mod page_rank;
pub use self::page_rank::{iterate_pagerank, sample_pagerank, sample_pagerank_with};

#[cfg(test)]
mod testing;
