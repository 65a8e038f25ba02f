// Ranking — TF-IDF vector space, MMR selection, and the ranker that runs them.

pub mod mmr;
pub mod ranker;
pub mod vectorize;
