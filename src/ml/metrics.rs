use crate::error::{PclustError, Result};
use crate::ml::features::ScaledMatrix;
use linfa::metrics::SilhouetteScore;
use linfa::DatasetBase;
use ndarray::Array1;

/// Silhouette score in [-1, 1] for a labeling of the scaled features.
///
/// # Errors
/// Returns error if the label count does not match the sample count, fewer
/// than 2 samples are present, fewer than 2 clusters are populated, or the
/// score comes out non-finite (degenerate features)
pub fn silhouette(features: &ScaledMatrix, labels: &[usize]) -> Result<f64> {
    let n_samples = features.n_samples();

    if labels.len() != n_samples {
        return Err(PclustError::Ml(format!(
            "Label count {} does not match sample count {n_samples}",
            labels.len()
        )));
    }
    if n_samples < 2 {
        return Err(PclustError::Ml(
            "Silhouette requires at least 2 samples".into(),
        ));
    }

    let mut distinct = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(PclustError::Ml(
            "Silhouette requires at least 2 non-empty clusters".into(),
        ));
    }

    let array = features.to_array()?;
    let dataset = DatasetBase::from((array, Array1::from_vec(labels.to_vec())));

    let score = dataset
        .silhouette_score()
        .map_err(|e| PclustError::Ml(format!("Silhouette scoring failed: {e}")))?;

    if !score.is_finite() {
        return Err(PclustError::Ml(
            "Silhouette score is not finite (degenerate features)".into(),
        ));
    }

    Ok(score)
}
