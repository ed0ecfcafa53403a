use crate::error::{PclustError, Result};
use crate::table::PlayerTable;
use ndarray::Array2;

/// Feature column names, in matrix column order.
pub const FEATURE_NAMES: [&str; 4] = [
    "Goals_per_match",
    "Assists_per_match",
    "Passes_per_match",
    "Tackles_per_match",
];

/// Per-match rate features, one row per player.
///
/// Rows are aligned by index with the player table, so cluster labels map
/// back to players directly.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Collect the derived rate columns from the player table.
    #[must_use]
    pub fn from_table(table: &PlayerTable) -> Self {
        let data = table
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.goals_per_match,
                    row.assists_per_match,
                    row.passes_per_match,
                    row.tackles_per_match,
                ]
            })
            .collect();

        Self {
            names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            data,
        }
    }

    /// Get number of samples (rows)
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.data.len()
    }

    /// Get number of features (columns)
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Standardize each column to zero mean and unit variance.
    ///
    /// Uses the population standard deviation. A constant column scales to
    /// all zeros instead of dividing by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn standardize(&self) -> ScaledMatrix {
        let n = self.n_samples();
        let d = self.n_features();

        let mut means = vec![0.0; d];
        let mut std_devs = vec![0.0; d];

        if n == 0 {
            return ScaledMatrix {
                names: self.names.clone(),
                data: Vec::new(),
                means,
                std_devs,
            };
        }

        for row in &self.data {
            for (i, &val) in row.iter().enumerate() {
                means[i] += val;
            }
        }
        for mean in &mut means {
            *mean /= n as f64;
        }

        for row in &self.data {
            for (i, &val) in row.iter().enumerate() {
                std_devs[i] += (val - means[i]).powi(2);
            }
        }
        for std_dev in &mut std_devs {
            *std_dev = (*std_dev / n as f64).sqrt();
        }

        let data: Vec<Vec<f64>> = self
            .data
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, &val)| {
                        if std_devs[i] < f64::EPSILON {
                            0.0 // Constant column
                        } else {
                            (val - means[i]) / std_devs[i]
                        }
                    })
                    .collect()
            })
            .collect();

        ScaledMatrix {
            names: self.names.clone(),
            data,
            means,
            std_devs,
        }
    }
}

/// Standardized feature matrix with the scaling parameters kept around.
#[derive(Debug, Clone)]
pub struct ScaledMatrix {
    pub names: Vec<String>,
    pub data: Vec<Vec<f64>>,
    #[allow(dead_code)]
    pub means: Vec<f64>,
    #[allow(dead_code)]
    pub std_devs: Vec<f64>,
}

impl ScaledMatrix {
    /// Get number of samples
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.data.len()
    }

    /// Get number of features
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Convert to flat `Vec<f64>` (row-major)
    #[must_use]
    pub fn to_flat(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    /// Build an `ndarray` matrix for the linfa calls.
    ///
    /// # Errors
    /// Returns error if the shape does not match the data length
    pub fn to_array(&self) -> Result<Array2<f64>> {
        Array2::from_shape_vec((self.n_samples(), self.n_features()), self.to_flat())
            .map_err(|e| PclustError::Ml(format!("Failed to create array: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PlayerTable;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_table() -> PlayerTable {
        let content = "\
Player,Team,Matches,Goals,Assists,Passes,Tackles
a,X,10,10,5,100,20
b,X,20,10,5,400,10
c,Y,30,15,5,1200,60
d,Y,40,4,5,1600,80";
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write content");
        let mut table = PlayerTable::from_path(file.path(), false).expect("parse csv");
        table.derive_rates();
        table
    }

    #[test]
    fn test_from_table_shape_and_order() {
        let table = create_test_table();
        let features = FeatureMatrix::from_table(&table);

        assert_eq!(features.n_samples(), 4);
        assert_eq!(features.n_features(), 4);
        assert_eq!(features.names, FEATURE_NAMES.to_vec());
        // first row: 10/10, 5/10, 100/10, 20/10
        assert_eq!(features.data[0], vec![1.0, 0.5, 10.0, 2.0]);
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let table = create_test_table();
        let features = FeatureMatrix::from_table(&table);
        let scaled = features.standardize();

        let n = scaled.n_samples() as f64;
        for col in 0..scaled.n_features() {
            let values: Vec<f64> = scaled.data.iter().map(|row| row[col]).collect();
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            if scaled.std_devs[col] < f64::EPSILON {
                continue;
            }
            assert!(mean.abs() < 1e-10, "column {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-10, "column {col} variance {var}");
        }
    }

    #[test]
    fn test_standardize_constant_column_is_zero() {
        let table = create_test_table();
        let features = FeatureMatrix::from_table(&table);
        let scaled = features.standardize();

        // Assists_per_match is 0.5, 0.25, 0.1666.., 0.125 - not constant.
        // Build a constant column directly instead.
        let constant = FeatureMatrix {
            names: vec!["c".to_string()],
            data: vec![vec![3.0], vec![3.0], vec![3.0]],
        };
        let scaled_const = constant.standardize();
        for row in &scaled_const.data {
            assert_eq!(row[0], 0.0);
        }

        // Non-constant columns keep finite values
        for row in &scaled.data {
            assert!(row.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_standardize_empty() {
        let features = FeatureMatrix {
            names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            data: Vec::new(),
        };
        let scaled = features.standardize();
        assert_eq!(scaled.n_samples(), 0);
    }

    #[test]
    fn test_to_array() {
        let table = create_test_table();
        let scaled = FeatureMatrix::from_table(&table).standardize();
        let array = scaled.to_array().expect("build array");

        assert_eq!(array.shape(), &[4, 4]);
    }
}
