//! Plain-text persistence for clustering models.
//!
//! A saved model is three files named by a caller-supplied prefix, all
//! whitespace-separated, newline-terminated, written in ascending index
//! order with no header and no checksum:
//!
//! - `<prefix>.docs` -- one line per document, `num_terms` weights
//! - `<prefix>.centroids` -- one line per cluster, `num_terms` weights
//! - `<prefix>.clusters` -- one line per document: `<doc_id> <cluster_id>`
//!
//! I/O failures propagate as-is; there is no partial-write cleanup.

use crate::clustering::model::KMeansModel;
use crate::error::{PersistError, PersistResult};
use crate::types::{ClusterId, DocId};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

impl KMeansModel {
    /// Saves document vectors, centroids, and assignments under `prefix`.
    pub fn save(&self, prefix: &str) -> PersistResult<()> {
        write_matrix(&PathBuf::from(format!("{prefix}.docs")), self.documents())?;
        write_matrix(
            &PathBuf::from(format!("{prefix}.centroids")),
            self.centroids(),
        )?;
        write_assignments(
            &PathBuf::from(format!("{prefix}.clusters")),
            self.assignments(),
        )?;
        Ok(())
    }
}

fn write_matrix(path: &Path, rows: &[Vec<f64>]) -> PersistResult<()> {
    let file = File::create(path).map_err(|source| PersistError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut write = || -> std::io::Result<()> {
        for row in rows {
            let mut first = true;
            for weight in row {
                if !first {
                    write!(writer, " ")?;
                }
                write!(writer, "{weight}")?;
                first = false;
            }
            writeln!(writer)?;
        }
        writer.flush()
    };

    write().map_err(|source| PersistError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_assignments(path: &Path, assignments: &[ClusterId]) -> PersistResult<()> {
    let file = File::create(path).map_err(|source| PersistError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut write = || -> std::io::Result<()> {
        for (d_id, cluster) in assignments.iter().enumerate() {
            writeln!(writer, "{d_id} {cluster}")?;
        }
        writer.flush()
    };

    write().map_err(|source| PersistError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a `.docs` or `.centroids` file back into a row-major matrix.
pub fn load_matrix(path: &Path) -> PersistResult<Vec<Vec<f64>>> {
    let file = File::open(path).map_err(|source| PersistError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| PersistError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let row: Vec<f64> = line
            .split_whitespace()
            .map(|token| {
                token.parse().map_err(|e| PersistError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    reason: format!("invalid weight '{token}': {e}"),
                })
            })
            .collect::<PersistResult<_>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reads a `.clusters` file back into `(doc, cluster)` pairs.
pub fn load_assignments(path: &Path) -> PersistResult<Vec<(DocId, ClusterId)>> {
    let file = File::open(path).map_err(|source| PersistError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pairs = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| PersistError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |reason: String| PersistError::Malformed {
            path: path.to_path_buf(),
            line: line_no + 1,
            reason,
        };

        let (doc, cluster) = line
            .split_once(' ')
            .ok_or_else(|| malformed("expected '<doc_id> <cluster_id>'".to_string()))?;
        let doc: u32 = doc
            .parse()
            .map_err(|e| malformed(format!("invalid doc id '{doc}': {e}")))?;
        let cluster: u32 = cluster
            .trim()
            .parse()
            .map_err(|e| malformed(format!("invalid cluster id '{cluster}': {e}")))?;

        pairs.push((DocId::new(doc), ClusterId::new(cluster)));
    }

    Ok(pairs)
}
