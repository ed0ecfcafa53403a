//! Clustering pipeline: cluster-count selection and method comparison

use crate::error::Result;
use crate::ml::features::ScaledMatrix;
use crate::ml::{clustering, metrics};
use std::ops::RangeInclusive;

/// Candidate cluster counts tried during selection.
pub const K_RANGE: RangeInclusive<usize> = 2..=5;

/// Outcome of the full clustering run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Silhouette score per candidate count, in ascending k order.
    pub kmeans_scores: Vec<(usize, f64)>,
    /// Candidate with the highest score; the lowest k wins ties.
    pub optimal_k: usize,
    /// K-means labels at `optimal_k`, one per player.
    pub kmeans_labels: Vec<usize>,
    /// Agglomerative labels at `optimal_k`, one per player.
    pub agglomerative_labels: Vec<usize>,
    /// Silhouette score of the agglomerative labeling.
    pub agglomerative_score: f64,
}

/// Run K-means selection over [`K_RANGE`], then the agglomerative
/// comparison at the chosen count.
///
/// # Errors
/// Returns error if clustering or silhouette scoring fails for any
/// candidate count
pub fn run_pipeline(scaled: &ScaledMatrix) -> Result<AnalysisResult> {
    let mut kmeans_scores = Vec::new();
    let mut optimal_k = 0usize;
    let mut best_score = f64::NEG_INFINITY;

    for k in K_RANGE {
        let labels = clustering::kmeans(scaled, k)?;
        let score = metrics::silhouette(scaled, &labels)?;

        // Strictly greater keeps the lowest k on ties
        if score > best_score {
            best_score = score;
            optimal_k = k;
        }
        kmeans_scores.push((k, score));
    }

    // Same seed, so this reproduces the winning labeling
    let kmeans_labels = clustering::kmeans(scaled, optimal_k)?;

    let agglomerative_labels = clustering::agglomerative(scaled, optimal_k)?;
    let agglomerative_score = metrics::silhouette(scaled, &agglomerative_labels)?;

    Ok(AnalysisResult {
        kmeans_scores,
        optimal_k,
        kmeans_labels,
        agglomerative_labels,
        agglomerative_score,
    })
}
