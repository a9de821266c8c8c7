//! Topic reporting: the highest-weighted terms of each cluster centroid.
//!
//! Only the requested top-N terms are needed, so ranking uses a bounded
//! min-heap of size N per cluster instead of sorting the full vocabulary.

use crate::clustering::model::KMeansModel;
use crate::corpus::TermDictionary;
use crate::types::TermId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::io;

/// One ranked term of a topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicTerm {
    pub term: TermId,
    pub weight: f64,
}

impl PartialOrd for TopicTerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for TopicTerm {}

impl Ord for TopicTerm {
    /// Higher weight ranks higher; equal weights rank the lower term id
    /// higher, keeping the ordering total and deterministic. Weights come
    /// from means of finite inputs and are never NaN.
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.term.cmp(&self.term))
    }
}

/// Returns the `limit` highest-weighted terms of one centroid, descending
/// by weight, ties broken by ascending term id.
pub fn top_terms(centroid: &[f64], limit: usize) -> Vec<TopicTerm> {
    if limit == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<TopicTerm>> = BinaryHeap::with_capacity(limit + 1);
    for (t_id, &weight) in centroid.iter().enumerate() {
        heap.push(Reverse(TopicTerm {
            term: TermId::new(t_id as u32),
            weight,
        }));
        if heap.len() > limit {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(term)| term)
        .collect()
}

/// Writes the top `num_terms` terms of every cluster to `out`.
///
/// Clusters appear in ascending id order, each preceded by a 1-based
/// `Cluster <n>` header; term lines are `<text>\t<weight>`. Term ids the
/// dictionary cannot resolve fall back to `term#<id>`.
pub fn print_topics<W: io::Write>(
    model: &KMeansModel,
    dictionary: &dyn TermDictionary,
    num_terms: usize,
    out: &mut W,
) -> io::Result<()> {
    for (c_id, centroid) in model.centroids().iter().enumerate() {
        writeln!(out, "Cluster {}", c_id + 1)?;
        for topic_term in top_terms(centroid, num_terms) {
            match dictionary.term_text(topic_term.term) {
                Some(text) => writeln!(out, "{text}\t{}", topic_term.weight)?,
                None => writeln!(out, "term#{}\t{}", topic_term.term, topic_term.weight)?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
