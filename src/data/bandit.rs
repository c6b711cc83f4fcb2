use super::error::{ChartError, Result};
use super::model::{AlgorithmSeries, RunMatrix, TrackLayout};

// ---------------------------------------------------------------------------
// Bandit aggregation: RunMatrix → AlgorithmSeries
// ---------------------------------------------------------------------------

/// Pair runs with labels by position and extract reward/optimality tracks.
///
/// The counts must agree; a surplus on either side is a [`ChartError::Mismatch`]
/// rather than being truncated away.
pub fn aggregate(
    dataset: &str,
    runs: &[RunMatrix],
    labels: &[String],
    layout: TrackLayout,
) -> Result<Vec<AlgorithmSeries>> {
    if runs.len() != labels.len() {
        return Err(ChartError::Mismatch {
            dataset: dataset.to_string(),
            expected: labels.len(),
            found: runs.len(),
        });
    }

    let pairs: Vec<(&str, &RunMatrix)> = labels
        .iter()
        .map(String::as_str)
        .zip(runs.iter())
        .collect();
    aggregate_pairs(dataset, &pairs, layout)
}

/// Explicit label → run variant; listing order plays no part.
pub fn aggregate_mapped(
    dataset: &str,
    entries: &[(String, RunMatrix)],
    layout: TrackLayout,
) -> Result<Vec<AlgorithmSeries>> {
    let pairs: Vec<(&str, &RunMatrix)> = entries
        .iter()
        .map(|(label, run)| (label.as_str(), run))
        .collect();
    aggregate_pairs(dataset, &pairs, layout)
}

fn aggregate_pairs(
    dataset: &str,
    pairs: &[(&str, &RunMatrix)],
    layout: TrackLayout,
) -> Result<Vec<AlgorithmSeries>> {
    let series = pairs
        .iter()
        .map(|(label, run)| series_from_run(label, run, layout))
        .collect::<Result<Vec<_>>>()?;

    // Curves in one chart share the step axis.
    if let Some(first) = series.first() {
        if let Some(odd) = series.iter().find(|s| s.steps() != first.steps()) {
            return Err(ChartError::shape(
                dataset,
                format!(
                    "'{}' has {} step(s) but '{}' has {}",
                    odd.label,
                    odd.steps(),
                    first.label,
                    first.steps()
                ),
            ));
        }
    }

    log::debug!("{dataset}: aggregated {} series", series.len());
    Ok(series)
}

/// Track 0 is the reward curve, track 1 the optimal-action fraction.
pub fn series_from_run(label: &str, run: &RunMatrix, layout: TrackLayout) -> Result<AlgorithmSeries> {
    let mut tracks = run.tracks(layout).into_iter();
    let (Some(reward), Some(optimality)) = (tracks.next(), tracks.next()) else {
        return Err(ChartError::format(
            &run.source,
            format!("expected reward and optimality tracks ({layout} layout)"),
        ));
    };

    if let Some((step, v)) = optimality
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        return Err(ChartError::format(
            &run.source,
            format!("optimality {v} at step {step} is outside [0, 1]"),
        ));
    }

    Ok(AlgorithmSeries {
        label: label.to_string(),
        reward,
        optimality,
        summary: run.summary,
    })
}
