//! Topic clustering for term-weighted document corpora.
//!
//! `topika` groups a corpus of documents into a fixed number of topics with
//! hard-assignment K-Means clustering over TF-IDF style term-weight
//! vectors. Corpus ingestion and term weighting happen upstream; the crate
//! consumes a [`corpus::VectorProvider`] and produces centroids, per-document
//! cluster assignments, persisted model files, and a top-terms report per
//! topic.

pub mod clustering;
pub mod config;
pub mod corpus;
pub mod error;
pub mod types;

// Explicit exports for better API clarity
pub use clustering::{
    DistanceMetric, Initializer, KMeansModel, PlusPlus, RandomK, RunState, RunSummary,
    SquaredEuclidean, TopicTerm,
};
pub use config::{KMeansParams, KMeansSection, Settings};
pub use corpus::{SparseCorpus, TermDictionary, VectorProvider};
pub use error::{
    ClusteringError, ClusteringResult, ConfigError, CorpusError, CorpusResult, PersistError,
    PersistResult,
};
pub use types::{ClusterId, DocId, TermId};
