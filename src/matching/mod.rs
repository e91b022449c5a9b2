//! Embedding-based matching of profiles against job postings

pub mod embeddings;
pub mod similarity;
pub mod catalog;
pub mod matcher;
pub mod embedding_manager;

pub use catalog::{JobCatalog, JobListing};
pub use embeddings::{HashingEmbedder, StaticModelEmbedder, TextEmbedder};
pub use matcher::{JobMatch, JobMatcher, DEFAULT_TOP_N};
