//! Console report for the clustering run

use crate::ml::features::FEATURE_NAMES;
use crate::ml::pipeline::AnalysisResult;
use crate::table::PlayerTable;

/// Number of sample rows shown at the end of the report.
const SAMPLE_ROWS: usize = 10;

/// Render the full report: per-candidate scores, the chosen count, the
/// agglomerative comparison, and a sample of labeled players.
#[must_use]
pub fn build_report(table: &PlayerTable, result: &AnalysisResult) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();

    for &(k, score) in &result.kmeans_scores {
        let _ = writeln!(
            out,
            "KMeans with {k} clusters: Silhouette Score = {score:.3}"
        );
    }

    let _ = writeln!(
        out,
        "\nOptimal number of clusters (KMeans): {}",
        result.optimal_k
    );

    let _ = writeln!(
        out,
        "\nAgglomerative Clustering with {} clusters: Silhouette Score = {:.3}",
        result.optimal_k, result.agglomerative_score
    );

    let shown = SAMPLE_ROWS.min(table.len());
    let _ = writeln!(out, "\nSample clustering results (first {shown} players):");
    let _ = writeln!(
        out,
        "{:<20} {:<16} {:>7} {:>7} {:>16} {:>18} {:>17} {:>18}",
        "Player",
        "Team",
        "KMeans",
        "Agglom",
        FEATURE_NAMES[0],
        FEATURE_NAMES[1],
        FEATURE_NAMES[2],
        FEATURE_NAMES[3]
    );

    for (idx, row) in table.rows.iter().take(SAMPLE_ROWS).enumerate() {
        let _ = writeln!(
            out,
            "{:<20} {:<16} {:>7} {:>7} {:>16.3} {:>18.3} {:>17.3} {:>18.3}",
            row.player,
            row.team,
            result.kmeans_labels[idx],
            result.agglomerative_labels[idx],
            row.goals_per_match,
            row.assists_per_match,
            row.passes_per_match,
            row.tackles_per_match
        );
    }

    out
}
