//! The K-Means model: densification, assignment, update, and the
//! iterate-until-stable loop.
//!
//! A run is a single-threaded batch computation over two dense matrices:
//! `num_docs x num_terms` document vectors, written once during
//! initialization and read-only afterward, and `num_topics x num_terms`
//! centroids, overwritten in place by every update pass. Documents are
//! processed in ascending id order, so for a given corpus and a given
//! initialization draw the output is deterministic.

use crate::clustering::distance::{DistanceMetric, SquaredEuclidean, nearest};
use crate::clustering::init::Initializer;
use crate::corpus::VectorProvider;
use crate::error::{ClusteringError, ClusteringResult};
use crate::types::{ClusterId, DocId};
use rand::RngCore;
use tracing::{debug, info};

/// Terminal state of a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// An assignment pass changed no document.
    Converged,
    /// The iteration ceiling was hit before a zero-change pass.
    MaxItersReached,
}

/// Outcome of [`KMeansModel::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// How the run terminated.
    pub state: RunState,
    /// Number of assignment/update iterations executed.
    pub iterations: u64,
    /// Total within-cluster sum-of-squares at termination.
    pub inertia: f64,
}

/// Hard-assignment centroid clustering over term-weight vectors.
pub struct KMeansModel {
    documents: Vec<Vec<f64>>,
    centroids: Vec<Vec<f64>>,
    assignments: Vec<ClusterId>,
    num_terms: usize,
    num_topics: usize,
    metric: Box<dyn DistanceMetric>,
}

impl KMeansModel {
    /// Creates a model sized to the provider's corpus, using squared
    /// Euclidean distance.
    ///
    /// Matrices are allocated here and populated by [`Self::run`] (or
    /// [`Self::init_documents`] / [`Self::init_centroids`] directly). Every
    /// document starts assigned to cluster 0.
    pub fn new(provider: &dyn VectorProvider, num_topics: usize) -> ClusteringResult<Self> {
        Self::with_metric(provider, num_topics, Box::new(SquaredEuclidean))
    }

    /// Creates a model with an explicit distance metric.
    pub fn with_metric(
        provider: &dyn VectorProvider,
        num_topics: usize,
        metric: Box<dyn DistanceMetric>,
    ) -> ClusteringResult<Self> {
        let num_docs = provider.num_docs();
        let num_terms = provider.num_terms();

        if num_topics == 0 || num_topics > num_docs {
            return Err(ClusteringError::InvalidClusterCount {
                topics: num_topics,
                docs: num_docs,
            });
        }

        Ok(Self {
            documents: vec![vec![0.0; num_terms]; num_docs],
            centroids: vec![vec![0.0; num_terms]; num_topics],
            assignments: vec![ClusterId::new(0); num_docs],
            num_terms,
            num_topics,
            metric,
        })
    }

    /// Densifies the provider's sparse term weights into the document
    /// matrix. Terms the provider never mentions stay at weight 0.
    pub fn init_documents(&mut self, provider: &dyn VectorProvider) -> ClusteringResult<()> {
        info!(
            docs = self.documents.len(),
            terms = self.num_terms,
            "storing term-weight vectors"
        );

        for (d_id, document) in self.documents.iter_mut().enumerate() {
            for &(term, weight) in provider.term_weights(DocId::new(d_id as u32)) {
                if term.index() >= self.num_terms {
                    return Err(ClusteringError::TermOutOfRange {
                        term,
                        num_terms: self.num_terms,
                    });
                }
                document[term.index()] = weight;
            }
        }

        Ok(())
    }

    /// Produces the initial centroids with the given strategy.
    pub fn init_centroids(&mut self, initializer: &dyn Initializer, rng: &mut dyn RngCore) {
        self.centroids = initializer.select_centroids(
            &self.documents,
            self.num_topics,
            self.metric.as_ref(),
            rng,
        );
        info!(
            method = initializer.name(),
            count = self.centroids.len(),
            "initialized centroids"
        );
    }

    /// Finds the nearest centroid for a vector, searching all `num_topics`
    /// centroids. Ties go to the lowest-indexed centroid.
    pub fn find_nearest(&self, vector: &[f64]) -> (ClusterId, f64) {
        nearest(vector, &self.centroids, self.metric.as_ref())
    }

    /// Re-assigns one document to its nearest centroid.
    ///
    /// Returns `true` if the assignment changed.
    pub fn assign_document(&mut self, doc: DocId) -> bool {
        let (cluster, _) = self.find_nearest(&self.documents[doc.index()]);
        if cluster == self.assignments[doc.index()] {
            return false;
        }
        self.assignments[doc.index()] = cluster;
        true
    }

    /// Recomputes every centroid as the term-wise mean of its assigned
    /// documents, overwriting in place.
    ///
    /// A cluster with no assigned documents has no mean; that is fatal and
    /// aborts the run mid-iteration with no automatic recovery.
    pub fn update_centroids(&mut self) -> ClusteringResult<()> {
        let mut sums = vec![vec![0.0f64; self.num_terms]; self.num_topics];
        let mut sizes = vec![0usize; self.num_topics];

        for (document, cluster) in self.documents.iter().zip(&self.assignments) {
            sizes[cluster.index()] += 1;
            for (sum, value) in sums[cluster.index()].iter_mut().zip(document) {
                *sum += value;
            }
        }

        for (c_id, ((centroid, sum), &size)) in self
            .centroids
            .iter_mut()
            .zip(&sums)
            .zip(&sizes)
            .enumerate()
        {
            if size == 0 {
                return Err(ClusteringError::EmptyCluster(ClusterId::new(c_id as u32)));
            }
            debug!(cluster = c_id, docs = size, "computed cluster mean");
            for (value, total) in centroid.iter_mut().zip(sum) {
                *value = total / size as f64;
            }
        }

        Ok(())
    }

    /// Runs one full iteration: an assignment pass over every document in
    /// ascending id order followed by a centroid update.
    ///
    /// Returns the number of assignments that changed.
    pub fn step(&mut self) -> ClusteringResult<usize> {
        let mut changed = 0;
        for d_id in 0..self.documents.len() {
            if self.assign_document(DocId::new(d_id as u32)) {
                changed += 1;
            }
        }
        self.update_centroids()?;
        Ok(changed)
    }

    /// Drives the full clustering run: vectorize, seed centroids, then
    /// iterate until an assignment pass changes nothing or `max_iters`
    /// passes complete.
    pub fn run(
        &mut self,
        provider: &dyn VectorProvider,
        initializer: &dyn Initializer,
        max_iters: u64,
        rng: &mut dyn RngCore,
    ) -> ClusteringResult<RunSummary> {
        self.init_documents(provider)?;
        self.init_centroids(initializer, rng);

        for iteration in 1..=max_iters {
            let changed = self.step()?;
            info!(iteration, changed, "iteration complete");

            if changed == 0 {
                return Ok(RunSummary {
                    state: RunState::Converged,
                    iterations: iteration,
                    inertia: self.inertia(),
                });
            }
        }

        Ok(RunSummary {
            state: RunState::MaxItersReached,
            iterations: max_iters,
            inertia: self.inertia(),
        })
    }

    /// Total sum-of-squares distance between every document and its
    /// assigned centroid. Non-increasing across iterations of a run.
    pub fn inertia(&self) -> f64 {
        self.documents
            .iter()
            .zip(&self.assignments)
            .map(|(document, cluster)| {
                self.metric
                    .distance(document, &self.centroids[cluster.index()])
            })
            .sum()
    }

    /// Number of documents in the model.
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    /// Size of the term vocabulary.
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// Number of clusters.
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// The dense document matrix.
    pub fn documents(&self) -> &[Vec<f64>] {
        &self.documents
    }

    /// The centroid matrix.
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Current cluster assignment per document.
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }
}
