//! Corpus adapter for the clustering engine.
//!
//! Corpus ingestion, tokenization, and term weighting all happen upstream;
//! the engine only consumes a finished vector provider. This module defines
//! the two capabilities it needs -- sparse term weights per document and term
//! text for reporting -- plus `SparseCorpus`, an in-memory implementation
//! that can also be loaded from a pre-vectorized corpus file.
//!
//! # Corpus file format
//!
//! One document per line, whitespace-separated `term_id:weight` pairs:
//!
//! ```text
//! 0:0.8 3:1.2
//! 1:0.5
//! ```
//!
//! The optional vocabulary file carries one term per line; the line number
//! is the term id.

use crate::error::{CorpusError, CorpusResult};
use crate::types::{DocId, TermId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Supplies one sparse weight vector per document over a fixed vocabulary.
///
/// Term weights (e.g. TF-IDF) are computed by the provider; the engine
/// densifies them and never looks back.
pub trait VectorProvider {
    /// Number of documents in the corpus.
    fn num_docs(&self) -> usize;

    /// Size of the term vocabulary.
    fn num_terms(&self) -> usize;

    /// Sparse `(term, weight)` pairs for one document. Terms absent from
    /// the slice have weight zero.
    fn term_weights(&self, doc: DocId) -> &[(TermId, f64)];
}

/// Maps term ids back to their text for topic reporting.
pub trait TermDictionary {
    /// Returns the text of a term, or `None` if the id is unknown.
    fn term_text(&self, term: TermId) -> Option<&str>;
}

/// In-memory sparse corpus with an optional attached vocabulary.
#[derive(Debug, Clone)]
pub struct SparseCorpus {
    rows: Vec<Vec<(TermId, f64)>>,
    num_terms: usize,
    vocabulary: Option<Vec<String>>,
}

impl SparseCorpus {
    /// Creates a corpus from sparse rows over a vocabulary of `num_terms`.
    pub fn new(rows: Vec<Vec<(TermId, f64)>>, num_terms: usize) -> Self {
        Self {
            rows,
            num_terms,
            vocabulary: None,
        }
    }

    /// Creates a corpus with an attached vocabulary; the vocabulary size
    /// fixes `num_terms`.
    pub fn with_vocabulary(rows: Vec<Vec<(TermId, f64)>>, vocabulary: Vec<String>) -> Self {
        let num_terms = vocabulary.len();
        Self {
            rows,
            num_terms,
            vocabulary: Some(vocabulary),
        }
    }

    /// Loads a corpus from a pre-vectorized corpus file and an optional
    /// vocabulary file.
    ///
    /// Without a vocabulary the vocabulary size is inferred as the largest
    /// term id seen plus one.
    pub fn from_files(corpus_path: &Path, vocab_path: Option<&Path>) -> CorpusResult<Self> {
        let file = File::open(corpus_path).map_err(|source| CorpusError::FileRead {
            path: corpus_path.to_path_buf(),
            source,
        })?;

        let mut rows = Vec::new();
        let mut max_term: Option<u32> = None;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| CorpusError::FileRead {
                path: corpus_path.to_path_buf(),
                source,
            })?;

            let mut row = Vec::new();
            for token in line.split_whitespace() {
                let (term, weight) = parse_pair(token, corpus_path, line_no + 1)?;
                max_term = Some(max_term.map_or(term.get(), |m| m.max(term.get())));
                row.push((term, weight));
            }
            rows.push(row);
        }

        let inferred = max_term.map_or(0, |m| m as usize + 1);
        let corpus = match vocab_path {
            Some(path) => {
                let vocabulary = load_vocabulary(path)?;
                if inferred > vocabulary.len() {
                    return Err(CorpusError::Malformed {
                        path: corpus_path.to_path_buf(),
                        line: 0,
                        reason: format!(
                            "corpus references term id {} but vocabulary has only {} terms",
                            inferred - 1,
                            vocabulary.len()
                        ),
                    });
                }
                Self::with_vocabulary(rows, vocabulary)
            }
            None => Self::new(rows, inferred),
        };

        Ok(corpus)
    }
}

fn parse_pair(token: &str, path: &Path, line: usize) -> CorpusResult<(TermId, f64)> {
    let malformed = |reason: String| CorpusError::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let (term, weight) = token
        .split_once(':')
        .ok_or_else(|| malformed(format!("expected 'term:weight', got '{token}'")))?;

    let term: u32 = term
        .parse()
        .map_err(|e| malformed(format!("invalid term id '{term}': {e}")))?;
    let weight: f64 = weight
        .parse()
        .map_err(|e| malformed(format!("invalid weight '{weight}': {e}")))?;

    Ok((TermId::new(term), weight))
}

fn load_vocabulary(path: &Path) -> CorpusResult<Vec<String>> {
    let file = File::open(path).map_err(|source| CorpusError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    BufReader::new(file)
        .lines()
        .map(|line| {
            line.map_err(|source| CorpusError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

impl VectorProvider for SparseCorpus {
    fn num_docs(&self) -> usize {
        self.rows.len()
    }

    fn num_terms(&self) -> usize {
        self.num_terms
    }

    fn term_weights(&self, doc: DocId) -> &[(TermId, f64)] {
        &self.rows[doc.index()]
    }
}

impl TermDictionary for SparseCorpus {
    fn term_text(&self, term: TermId) -> Option<&str> {
        self.vocabulary
            .as_ref()
            .and_then(|v| v.get(term.index()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_in_memory_corpus() {
        let rows = vec![
            vec![(TermId::new(0), 1.0), (TermId::new(2), 0.5)],
            vec![(TermId::new(1), 2.0)],
        ];
        let corpus = SparseCorpus::new(rows, 3);

        assert_eq!(corpus.num_docs(), 2);
        assert_eq!(corpus.num_terms(), 3);
        assert_eq!(corpus.term_weights(DocId::new(1)), &[(TermId::new(1), 2.0)]);
        assert_eq!(corpus.term_text(TermId::new(0)), None);
    }

    #[test]
    fn test_vocabulary_lookup() {
        let rows = vec![vec![(TermId::new(0), 1.0)]];
        let corpus =
            SparseCorpus::with_vocabulary(rows, vec!["apple".to_string(), "pear".to_string()]);

        assert_eq!(corpus.num_terms(), 2);
        assert_eq!(corpus.term_text(TermId::new(1)), Some("pear"));
        assert_eq!(corpus.term_text(TermId::new(2)), None);
    }

    #[test]
    fn test_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.txt");
        let vocab_path = dir.path().join("vocab.txt");

        let mut f = File::create(&corpus_path).unwrap();
        writeln!(f, "0:0.8 2:1.5").unwrap();
        writeln!(f, "1:0.25").unwrap();
        let mut f = File::create(&vocab_path).unwrap();
        writeln!(f, "alpha\nbeta\ngamma").unwrap();

        let corpus = SparseCorpus::from_files(&corpus_path, Some(&vocab_path)).unwrap();
        assert_eq!(corpus.num_docs(), 2);
        assert_eq!(corpus.num_terms(), 3);
        assert_eq!(
            corpus.term_weights(DocId::new(0)),
            &[(TermId::new(0), 0.8), (TermId::new(2), 1.5)]
        );
        assert_eq!(corpus.term_text(TermId::new(2)), Some("gamma"));
    }

    #[test]
    fn test_from_files_without_vocab_infers_size() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.txt");
        let mut f = File::create(&corpus_path).unwrap();
        writeln!(f, "4:1.0").unwrap();

        let corpus = SparseCorpus::from_files(&corpus_path, None).unwrap();
        assert_eq!(corpus.num_terms(), 5);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.txt");
        let mut f = File::create(&corpus_path).unwrap();
        writeln!(f, "0:1.0").unwrap();
        writeln!(f, "not-a-pair").unwrap();

        let err = SparseCorpus::from_files(&corpus_path, None).unwrap_err();
        match err {
            CorpusError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_vocab_too_small_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.txt");
        let vocab_path = dir.path().join("vocab.txt");
        let mut f = File::create(&corpus_path).unwrap();
        writeln!(f, "3:1.0").unwrap();
        let mut f = File::create(&vocab_path).unwrap();
        writeln!(f, "only\ntwo").unwrap();

        assert!(SparseCorpus::from_files(&corpus_path, Some(&vocab_path)).is_err());
    }
}
