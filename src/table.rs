use crate::error::{PclustError, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

/// Column names the input file must provide, with these exact headers.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Player", "Team", "Matches", "Goals", "Assists", "Passes", "Tackles",
];

/// One player with raw season counts and derived per-match rates.
///
/// The rate fields stay at zero until [`PlayerTable::derive_rates`] runs.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Matches")]
    pub matches: u32,
    #[serde(rename = "Goals")]
    pub goals: u32,
    #[serde(rename = "Assists")]
    pub assists: u32,
    #[serde(rename = "Passes")]
    pub passes: u32,
    #[serde(rename = "Tackles")]
    pub tackles: u32,

    #[serde(skip)]
    pub goals_per_match: f64,
    #[serde(skip)]
    pub assists_per_match: f64,
    #[serde(skip)]
    pub passes_per_match: f64,
    #[serde(skip)]
    pub tackles_per_match: f64,
}

/// Player statistics table, preserving input row order.
#[derive(Debug, Clone)]
pub struct PlayerTable {
    pub rows: Vec<PlayerRow>,
}

impl PlayerTable {
    /// Parse a CSV or TSV file of player statistics.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a required column is
    /// missing, or a count column fails to parse as an integer.
    pub fn from_path(path: &Path, is_tsv: bool) -> Result<Self> {
        let delimiter = if is_tsv { b'\t' } else { b',' };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(PclustError::Schema(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: PlayerRow = record?;
            rows.push(row);
        }

        Ok(Self { rows })
    }

    /// Get number of players
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clamp zero match counts to 1 in place, then fill the per-match rates.
    ///
    /// The clamp treats a zero-match player as a one-match player so the
    /// divisions stay defined.
    pub fn derive_rates(&mut self) {
        for row in &mut self.rows {
            row.matches = row.matches.max(1);
            let matches = f64::from(row.matches);
            row.goals_per_match = f64::from(row.goals) / matches;
            row.assists_per_match = f64::from(row.assists) / matches;
            row.passes_per_match = f64::from(row.passes) / matches;
            row.tackles_per_match = f64::from(row.tackles) / matches;
        }
    }
}
