//! Centroid initialization strategies.
//!
//! Two strategies are selectable through the `init-method` configuration
//! key: `"randk"` draws centroids uniformly at random, `"kmeans++"` biases
//! selection toward documents far from already-chosen centroids. Both copy
//! document vectors verbatim as the initial centroids and take an injected
//! RNG so runs are seedable and reproducible.

use crate::clustering::distance::{DistanceMetric, nearest};
use crate::error::{ClusteringError, ClusteringResult};
use rand::{Rng, RngCore};
use tracing::debug;

/// Strategy for producing the initial centroid matrix.
pub trait Initializer {
    /// Configuration name of this strategy.
    fn name(&self) -> &'static str;

    /// Selects `num_topics` initial centroids from `documents`.
    ///
    /// Callers guarantee `1 <= num_topics <= documents.len()`.
    fn select_centroids(
        &self,
        documents: &[Vec<f64>],
        num_topics: usize,
        metric: &dyn DistanceMetric,
        rng: &mut dyn RngCore,
    ) -> Vec<Vec<f64>>;
}

/// Uniform random selection.
///
/// Each of the `num_topics` picks is an independent uniform draw, so the
/// same document can be drawn twice and yield duplicate initial centroids.
/// That matches the historical behavior and is deliberately left in place;
/// a duplicate surfaces later as an empty-cluster error during the first
/// update pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomK;

impl Initializer for RandomK {
    fn name(&self) -> &'static str {
        "randk"
    }

    fn select_centroids(
        &self,
        documents: &[Vec<f64>],
        num_topics: usize,
        _metric: &dyn DistanceMetric,
        rng: &mut dyn RngCore,
    ) -> Vec<Vec<f64>> {
        (0..num_topics)
            .map(|_| {
                let d_id = rng.random_range(0..documents.len());
                documents[d_id].clone()
            })
            .collect()
    }
}

/// K-means++ seeding.
///
/// The first centroid is a uniform draw. Each subsequent slot `c` draws a
/// document with probability proportional to its squared distance to the
/// nearest of the `c` centroids chosen so far, spreading the initial
/// centroids out. With `num_topics = 1` this degenerates to a single
/// uniform draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlusPlus;

impl Initializer for PlusPlus {
    fn name(&self) -> &'static str {
        "kmeans++"
    }

    fn select_centroids(
        &self,
        documents: &[Vec<f64>],
        num_topics: usize,
        metric: &dyn DistanceMetric,
        rng: &mut dyn RngCore,
    ) -> Vec<Vec<f64>> {
        let mut centroids = Vec::with_capacity(num_topics);

        let first = rng.random_range(0..documents.len());
        centroids.push(documents[first].clone());

        let mut weights = vec![0.0f64; documents.len()];
        for _ in 1..num_topics {
            // Weight each document by its distance to the nearest centroid
            // chosen so far; `nearest` searches only the slots filled in.
            let mut total = 0.0;
            for (d_id, document) in documents.iter().enumerate() {
                let (_, distance) = nearest(document, &centroids, metric);
                weights[d_id] = distance;
                total += distance;
            }

            let d_id = sample_weighted(&weights, total, rng);
            centroids.push(documents[d_id].clone());
        }

        debug!(count = centroids.len(), "initialized centroids");
        centroids
    }
}

/// Draws an index from an unnormalized weight distribution by cumulative
/// scan. Falls back to a uniform draw when every weight is zero (all
/// documents coincide with an already-chosen centroid).
fn sample_weighted(weights: &[f64], total: f64, rng: &mut dyn RngCore) -> usize {
    if total <= 0.0 {
        return rng.random_range(0..weights.len());
    }

    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut choice = 0;

    for (d_id, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        choice = d_id;
        cumulative += weight;
        if cumulative > target {
            break;
        }
    }

    // Rounding may leave the scan short of `target`; the last
    // positive-weight index then wins.
    choice
}

/// Resolves an `init-method` configuration string to its strategy.
///
/// Any string other than `"kmeans++"` or `"randk"` is an
/// invalid-configuration error.
pub fn from_name(name: &str) -> ClusteringResult<Box<dyn Initializer>> {
    match name {
        "kmeans++" => Ok(Box::new(PlusPlus)),
        "randk" => Ok(Box::new(RandomK)),
        other => Err(ClusteringError::InvalidInitMethod(other.to_string())),
    }
}
