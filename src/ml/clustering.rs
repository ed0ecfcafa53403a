use crate::error::{PclustError, Result};
use crate::ml::features::ScaledMatrix;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Fixed seed so repeated runs assign identical labels.
pub const KMEANS_SEED: u64 = 42;

/// Perform K-means clustering on the scaled features
///
/// The rng is seeded with [`KMEANS_SEED`], so the labels are deterministic
/// for a given input.
///
/// # Errors
/// Returns error if `k` is zero, exceeds the sample count, or the fit fails
pub fn kmeans(features: &ScaledMatrix, k: usize) -> Result<Vec<usize>> {
    let n_samples = features.n_samples();

    if k == 0 {
        return Err(PclustError::Ml("k must be at least 1".into()));
    }
    if n_samples < k {
        return Err(PclustError::Ml(format!(
            "Cannot create {k} clusters with only {n_samples} samples"
        )));
    }

    let array = features.to_array()?;
    let dataset = DatasetBase::from(array);

    let rng = Xoshiro256Plus::seed_from_u64(KMEANS_SEED);
    let model = KMeans::params_with_rng(k, rng)
        .max_n_iterations(300)
        .tolerance(1e-4)
        .fit(&dataset)
        .map_err(|e| PclustError::Ml(format!("K-means failed: {e}")))?;

    let predictions = model.predict(&dataset);
    Ok(predictions.iter().copied().collect())
}

/// Agglomerative clustering with average linkage on Euclidean distances.
///
/// Starts from singleton clusters and repeatedly merges the pair with the
/// smallest mean pairwise distance until `k` clusters remain. Ties keep the
/// first pair found, so the result is deterministic without a seed. Labels
/// are numbered by the smallest row index in each cluster.
///
/// # Errors
/// Returns error if `k` is zero or exceeds the sample count
pub fn agglomerative(features: &ScaledMatrix, k: usize) -> Result<Vec<usize>> {
    let n_samples = features.n_samples();

    if k == 0 {
        return Err(PclustError::Ml("k must be at least 1".into()));
    }
    if n_samples < k {
        return Err(PclustError::Ml(format!(
            "Cannot create {k} clusters with only {n_samples} samples"
        )));
    }

    let dist = pairwise_distances(features);

    // Each cluster is a list of row indices
    let mut clusters: Vec<Vec<usize>> = (0..n_samples).map(|i| vec![i]).collect();

    while clusters.len() > k {
        let mut best = (0usize, 1usize);
        let mut best_dist = f64::INFINITY;

        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let d = average_linkage(&dist, &clusters[i], &clusters[j]);
                if d < best_dist {
                    best_dist = d;
                    best = (i, j);
                }
            }
        }

        let merged = clusters.remove(best.1);
        clusters[best.0].extend(merged);
    }

    // Number clusters by their smallest member so labels are stable
    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by_key(|&c| clusters[c].iter().copied().min().unwrap_or(usize::MAX));

    let mut labels = vec![0usize; n_samples];
    for (label, &c) in order.iter().enumerate() {
        for &row in &clusters[c] {
            labels[row] = label;
        }
    }

    Ok(labels)
}

/// Full Euclidean distance matrix between all sample pairs.
fn pairwise_distances(features: &ScaledMatrix) -> Vec<Vec<f64>> {
    let n = features.n_samples();
    let mut dist = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = features.data[i]
                .iter()
                .zip(features.data[j].iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    dist
}

/// Mean pairwise distance between the members of two clusters.
#[allow(clippy::cast_precision_loss)]
fn average_linkage(dist: &[Vec<f64>], a: &[usize], b: &[usize]) -> f64 {
    let mut sum = 0.0;
    for &i in a {
        for &j in b {
            sum += dist[i][j];
        }
    }
    sum / (a.len() * b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::FeatureMatrix;

    /// Two tight blobs of four points each, far apart.
    fn create_clusterable_matrix() -> ScaledMatrix {
        let features = FeatureMatrix {
            names: vec!["x".to_string(), "y".to_string()],
            data: vec![
                vec![1.0, 1.0],
                vec![1.1, 1.1],
                vec![0.9, 0.9],
                vec![1.0, 1.2],
                vec![10.0, 10.0],
                vec![10.1, 10.1],
                vec![9.9, 9.9],
                vec![10.0, 10.2],
            ],
        };
        features.standardize()
    }

    #[test]
    fn test_kmeans_two_blobs() {
        let scaled = create_clusterable_matrix();
        let labels = kmeans(&scaled, 2).expect("run kmeans");

        assert_eq!(labels.len(), 8);
        // Both blobs end up homogeneous
        assert!(labels[..4].iter().all(|&l| l == labels[0]));
        assert!(labels[4..].iter().all(|&l| l == labels[4]));
        assert_ne!(labels[0], labels[4]);
    }

    #[test]
    fn test_kmeans_is_deterministic() {
        let scaled = create_clusterable_matrix();
        let first = kmeans(&scaled, 3).expect("first run");
        let second = kmeans(&scaled, 3).expect("second run");

        assert_eq!(first, second);
    }

    #[test]
    fn test_kmeans_rejects_bad_k() {
        let scaled = create_clusterable_matrix();
        assert!(kmeans(&scaled, 0).is_err());
        assert!(kmeans(&scaled, 9).is_err());
    }

    #[test]
    fn test_agglomerative_two_blobs() {
        let scaled = create_clusterable_matrix();
        let labels = agglomerative(&scaled, 2).expect("run agglomerative");

        assert_eq!(labels.len(), 8);
        // Row 0 belongs to the first-numbered cluster
        assert_eq!(labels[0], 0);
        assert!(labels[..4].iter().all(|&l| l == 0));
        assert!(labels[4..].iter().all(|&l| l == 1));
    }

    #[test]
    fn test_agglomerative_singletons() {
        let scaled = create_clusterable_matrix();
        let labels = agglomerative(&scaled, 8).expect("run agglomerative");

        // k == n leaves every point in its own cluster, numbered by row
        assert_eq!(labels, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_agglomerative_is_deterministic() {
        let scaled = create_clusterable_matrix();
        let first = agglomerative(&scaled, 3).expect("first run");
        let second = agglomerative(&scaled, 3).expect("second run");

        assert_eq!(first, second);
    }

    #[test]
    fn test_agglomerative_rejects_bad_k() {
        let scaled = create_clusterable_matrix();
        assert!(agglomerative(&scaled, 0).is_err());
        assert!(agglomerative(&scaled, 9).is_err());
    }
}
