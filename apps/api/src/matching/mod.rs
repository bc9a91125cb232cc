// Match scoring: skill normalization, extraction and comparison, semantic
// scoring (embedding-backed or mock), score blending and job ranking.
// All embedding calls go through embedding_client; no direct HTTP here.

pub mod comparison;
pub mod extraction;
pub mod gap_analysis;
pub mod handlers;
pub mod ranking;
pub mod semantic;
pub mod similarity;
pub mod skills;

#[cfg(test)]
pub(crate) mod test_support;
