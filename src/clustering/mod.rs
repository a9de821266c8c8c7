//! K-Means topic clustering over term-weight vectors.
//!
//! The engine consumes a finished [`crate::corpus::VectorProvider`],
//! densifies its sparse weights, seeds centroids with a swappable
//! [`Initializer`], and iterates Lloyd's algorithm until an assignment pass
//! changes nothing or the iteration ceiling is hit. Results persist to
//! three plain-text files and report as the top terms of each centroid.

pub mod distance;
pub mod init;
pub mod model;
pub mod persist;
pub mod report;

// Re-export core types for public API
pub use distance::{DistanceMetric, SquaredEuclidean, nearest};
pub use init::{Initializer, PlusPlus, RandomK};
pub use model::{KMeansModel, RunState, RunSummary};
pub use persist::{load_assignments, load_matrix};
pub use report::{TopicTerm, print_topics, top_terms};
