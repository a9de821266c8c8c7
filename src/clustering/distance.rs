//! Distance computation between document vectors and centroids.
//!
//! The engine only ever compares distances, so the squared Euclidean
//! distance is used without taking the square root: relative ordering is
//! preserved and the sqrt is wasted work.

use crate::types::ClusterId;

/// Dissimilarity between two equal-length vectors.
///
/// Swappable at the model seam so alternative metrics can be tested in
/// isolation; `SquaredEuclidean` is the only metric shipped.
pub trait DistanceMetric: Send + Sync {
    /// Computes the dissimilarity score between `a` and `b`. Lower is closer.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Sum-of-squares distance: `sum((a[i] - b[i])^2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquaredEuclidean;

impl DistanceMetric for SquaredEuclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "vectors must have the same length");

        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let diff = x - y;
                diff * diff
            })
            .sum()
    }
}

/// Finds the centroid nearest to `vector` among `centroids`.
///
/// Returns the winning cluster and its distance. Ties go to the
/// lowest-indexed centroid. The kmeans++ seeding search over only the first
/// `c` chosen centroids is expressed by slicing the centroid matrix before
/// the call.
///
/// # Panics
/// Panics if `centroids` is empty.
pub fn nearest(
    vector: &[f64],
    centroids: &[Vec<f64>],
    metric: &dyn DistanceMetric,
) -> (ClusterId, f64) {
    assert!(!centroids.is_empty(), "no centroids to search");

    let mut best = 0;
    let mut best_distance = metric.distance(vector, &centroids[0]);

    for (c_id, centroid) in centroids.iter().enumerate().skip(1) {
        let distance = metric.distance(vector, centroid);
        if distance < best_distance {
            best = c_id;
            best_distance = distance;
        }
    }

    (ClusterId::new(best as u32), best_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean() {
        let metric = SquaredEuclidean;

        assert_eq!(metric.distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(metric.distance(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        // No sqrt: twice the offset quadruples the score
        assert_eq!(metric.distance(&[0.0], &[2.0]), 4.0);
        assert_eq!(metric.distance(&[0.0], &[4.0]), 16.0);
    }

    #[test]
    fn test_nearest_picks_minimum() {
        let centroids = vec![vec![10.0, 10.0], vec![0.0, 0.0], vec![5.0, 5.0]];
        let (cluster, distance) = nearest(&[1.0, 1.0], &centroids, &SquaredEuclidean);

        assert_eq!(cluster, ClusterId::new(1));
        assert_eq!(distance, 2.0);
    }

    #[test]
    fn test_nearest_tie_breaks_to_lowest_index() {
        // Centroids 0 and 2 are equidistant from the query
        let centroids = vec![vec![1.0, 0.0], vec![9.0, 9.0], vec![-1.0, 0.0]];
        let (cluster, distance) = nearest(&[0.0, 0.0], &centroids, &SquaredEuclidean);

        assert_eq!(cluster, ClusterId::new(0));
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn test_nearest_respects_slice_limit() {
        let centroids = vec![vec![10.0], vec![0.0]];
        // Searching only the first centroid must ignore the closer second one
        let (cluster, _) = nearest(&[0.0], &centroids[..1], &SquaredEuclidean);
        assert_eq!(cluster, ClusterId::new(0));
    }
}
