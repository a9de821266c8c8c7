//! Error types for the topic clustering engine.
//!
//! This module provides structured error types using thiserror with
//! actionable error messages.

use crate::types::{ClusterId, TermId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the clustering engine itself.
#[derive(Error, Debug)]
pub enum ClusteringError {
    #[error(
        "Unsupported init-method '{0}'\nSuggestion: Use \"kmeans++\" or \"randk\" in the [kmeans] configuration"
    )]
    InvalidInitMethod(String),

    #[error(
        "Invalid cluster count: {topics} topics for {docs} documents\nSuggestion: Use between 1 and num_docs topics"
    )]
    InvalidClusterCount { topics: usize, docs: usize },

    #[error(
        "Cannot compute mean of empty cluster {0}\nSuggestion: Reduce the topic count or use kmeans++ initialization to spread the centroids"
    )]
    EmptyCluster(ClusterId),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(
        "Term id {term} is out of range for a vocabulary of {num_terms} terms\nSuggestion: Ensure the corpus and vocabulary files describe the same index"
    )]
    TermOutOfRange { term: TermId, num_terms: usize },
}

/// Errors raised while loading a corpus from disk.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed corpus file '{path}' at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Errors raised while saving or loading model files.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write model file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read model file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed model file '{path}' at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Errors raised while validating the kmeans configuration section.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing kmeans configuration parameter '{0}'")]
    MissingKey(&'static str),
}

/// Result type alias for clustering operations.
pub type ClusteringResult<T> = Result<T, ClusteringError>;

/// Result type alias for corpus loading.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Result type alias for model persistence.
pub type PersistResult<T> = Result<T, PersistError>;
