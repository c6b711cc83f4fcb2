use std::fs::File;
use std::path::{Path, PathBuf};

use super::error::{ChartError, Result};
use super::model::{
    DataPointSet, PrototypeSnapshot, PrototypeTrajectorySet, RunMatrix, RunSummary, SweepPoint,
    dataset_name,
};

// ---------------------------------------------------------------------------
// Raw matrix reader
// ---------------------------------------------------------------------------

/// Read a header-less, comma-separated file of floats.
///
/// Every row must have the same number of cells; the first row fixes the
/// width. Blank lines are skipped by the CSV reader; error messages name the
/// physical line in the file.
pub fn read_matrix(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path).map_err(|e| ChartError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        // Width is checked below so the message can name the line.
        .flexible(true)
        .from_reader(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ChartError::format(path, e.to_string()))?;
        // Physical line in the file; blank lines are skipped but still counted.
        let line = record.position().map_or(0, |p| p.line());

        let row = record
            .iter()
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    ChartError::format(path, format!("line {line}, column {j}: '{tok}' is not a number"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(ChartError::format(
                    path,
                    format!(
                        "line {line} has {} column(s), expected {}",
                        row.len(),
                        first.len()
                    ),
                ));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ChartError::format(path, "file contains no rows"));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Bandit result files
// ---------------------------------------------------------------------------

/// List files in `dir` whose extension is one of `suffixes`, sorted by name.
pub fn list_result_files(dir: &Path, suffixes: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ChartError::missing(dir, "not a directory"));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ChartError::from_io(dir, e))? {
        let entry = entry.map_err(|e| ChartError::from_io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if suffixes.iter().any(|s| s.eq_ignore_ascii_case(&ext)) {
            files.push(path);
        } else {
            log::debug!("Skipping {} (unrecognized suffix)", path.display());
        }
    }

    if files.is_empty() {
        return Err(ChartError::missing(
            dir,
            format!("no result files with suffix {}", suffixes.join("/")),
        ));
    }

    files.sort();
    Ok(files)
}

/// Load one bandit result file and split off its footer row.
pub fn load_run_file(path: &Path) -> Result<RunMatrix> {
    let mut rows = read_matrix(path)?;
    if rows.len() < 2 {
        return Err(ChartError::format(
            path,
            "expected at least one data row followed by a footer row",
        ));
    }

    let footer = rows.pop().unwrap_or_default();
    let run = RunMatrix {
        source: path.to_path_buf(),
        rows,
        summary: RunSummary::from_footer(&footer),
    };
    log::debug!(
        "Loaded {}: {} row(s) x {} column(s)",
        run.name(),
        run.n_rows(),
        run.n_cols()
    );
    Ok(run)
}

/// Load every result file of one regime directory, in listing order.
pub fn load_run_directory(dir: &Path, suffixes: &[String]) -> Result<Vec<RunMatrix>> {
    let runs = list_result_files(dir, suffixes)?
        .iter()
        .map(|path| load_run_file(path))
        .collect::<Result<Vec<_>>>()?;
    log::info!("Loaded {} result file(s) from {}", runs.len(), dir.display());
    Ok(runs)
}

// ---------------------------------------------------------------------------
// Quantization files
// ---------------------------------------------------------------------------

/// Load the training observations: one `x,y` pair per line, no footer.
pub fn load_points(path: &Path) -> Result<DataPointSet> {
    let rows = read_matrix(path)?;
    let width = rows[0].len();
    if width != 2 {
        return Err(ChartError::shape(
            dataset_name(path),
            format!("data points have {width} coordinate(s), expected 2"),
        ));
    }
    let points = rows.into_iter().map(|r| [r[0], r[1]]).collect();
    Ok(DataPointSet::new(points))
}

/// Load prototype snapshots: one iteration per line, `x0,y0,x1,y1,...`.
pub fn load_trajectory(path: &Path) -> Result<PrototypeTrajectorySet> {
    let name = dataset_name(path);
    let rows = read_matrix(path)?;
    let width = rows[0].len();
    if width % 2 != 0 {
        return Err(ChartError::shape(
            &name,
            format!("{width} column(s) cannot hold 2-D prototype coordinates"),
        ));
    }

    let snapshots = rows
        .iter()
        .map(|row| {
            PrototypeSnapshot(row.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
        })
        .collect();
    PrototypeTrajectorySet::new(&name, snapshots)
}

/// Load the quantization-error sweep.
///
/// A single column holds one error per configured candidate count, in order.
/// Two columns hold explicit `K,error` pairs and are relayed unchanged.
pub fn load_sweep(path: &Path, candidate_counts: &[usize]) -> Result<Vec<SweepPoint>> {
    let rows = read_matrix(path)?;
    match rows[0].len() {
        1 => {
            if rows.len() != candidate_counts.len() {
                return Err(ChartError::Mismatch {
                    dataset: dataset_name(path),
                    expected: candidate_counts.len(),
                    found: rows.len(),
                });
            }
            Ok(candidate_counts
                .iter()
                .zip(&rows)
                .map(|(&k, row)| SweepPoint { k, error: row[0] })
                .collect())
        }
        2 => rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let k = row[0];
                if k < 1.0 || k.fract() != 0.0 {
                    return Err(ChartError::format(
                        path,
                        format!("row {}: prototype count {k} is not a positive integer", i + 1),
                    ));
                }
                Ok(SweepPoint {
                    k: k as usize,
                    error: row[1],
                })
            })
            .collect(),
        other => Err(ChartError::format(
            path,
            format!("expected 1 or 2 columns, found {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{scratch_dir, write_file};

    fn csv_only() -> Vec<String> {
        vec!["csv".to_string()]
    }

    #[test]
    fn run_file_drops_footer_into_summary() {
        let dir = scratch_dir("run_footer");
        let path = write_file(&dir, "eps.csv", "0.5,0.1\n0.7,0.4\n0.9,0.8\n812.5,31.2\n");

        let run = load_run_file(&path).unwrap();
        assert_eq!(run.n_rows(), 3);
        assert_eq!(run.n_cols(), 2);
        assert_eq!(run.rows[2], vec![0.9, 0.8]);
        let summary = run.summary.unwrap();
        assert_eq!(summary.mean_total_reward, 812.5);
        assert_eq!(summary.std_dev, 31.2);
    }

    #[test]
    fn whitespace_around_cells_is_tolerated() {
        let dir = scratch_dir("run_trim");
        let path = write_file(&dir, "a.csv", " 1.0 , 2.0\n3.0,4.0 \n");
        assert_eq!(read_matrix(&path).unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn ragged_rows_are_a_format_error() {
        let dir = scratch_dir("run_ragged");
        let path = write_file(&dir, "bad.csv", "1,2\n3\n4,5\n");
        let err = load_run_file(&path).unwrap_err();
        assert!(matches!(err, ChartError::DataFormat { .. }), "{err}");
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(err.to_string().contains("bad.csv"), "{err}");
    }

    #[test]
    fn messages_count_blank_lines() {
        let dir = scratch_dir("run_blank_lines");
        let path = write_file(&dir, "gaps.csv", "1,2\n\n\n3\n");
        let err = read_matrix(&path).unwrap_err();
        assert!(err.to_string().contains("line 4 has 1 column(s)"), "{err}");

        let path = write_file(&dir, "gaps_text.csv", "1,2\n\n3,x\n");
        let err = read_matrix(&path).unwrap_err();
        assert!(err.to_string().contains("line 3, column 1"), "{err}");
    }

    #[test]
    fn non_numeric_cells_are_a_format_error() {
        let dir = scratch_dir("run_text");
        let path = write_file(&dir, "bad.csv", "1,2\n3,abc\n");
        let err = read_matrix(&path).unwrap_err();
        assert!(matches!(err, ChartError::DataFormat { .. }));
        assert!(err.to_string().contains("'abc'"), "{err}");
    }

    #[test]
    fn footer_only_file_is_rejected() {
        let dir = scratch_dir("run_short");
        let path = write_file(&dir, "short.csv", "1,2\n");
        assert!(matches!(
            load_run_file(&path),
            Err(ChartError::DataFormat { .. })
        ));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = scratch_dir("run_empty");
        let path = write_file(&dir, "empty.csv", "");
        assert!(matches!(read_matrix(&path), Err(ChartError::DataFormat { .. })));
    }

    #[test]
    fn directory_listing_filters_suffix_and_sorts() {
        let dir = scratch_dir("listing");
        write_file(&dir, "b.csv", "1,2\n3,4\n");
        write_file(&dir, "a.CSV", "1,2\n3,4\n");
        write_file(&dir, "notes.txt", "not data");

        let files = list_result_files(&dir, &csv_only()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn directory_without_result_files_is_missing_data() {
        let dir = scratch_dir("listing_empty");
        write_file(&dir, "readme.md", "nothing here");
        assert!(matches!(
            list_result_files(&dir, &csv_only()),
            Err(ChartError::MissingData { .. })
        ));
        assert!(matches!(
            load_run_directory(&dir.join("absent"), &csv_only()),
            Err(ChartError::MissingData { .. })
        ));
    }

    #[test]
    fn one_bad_file_fails_the_whole_directory() {
        let dir = scratch_dir("listing_bad");
        write_file(&dir, "a.csv", "1,0.5\n2,0.6\n9,1\n");
        write_file(&dir, "b.csv", "1,0.5\n2\n9,1\n");
        assert!(matches!(
            load_run_directory(&dir, &csv_only()),
            Err(ChartError::DataFormat { .. })
        ));
    }

    #[test]
    fn points_must_be_two_dimensional() {
        let dir = scratch_dir("points");
        let ok = write_file(&dir, "data.csv", "0,0\n1,1\n2,0.5\n");
        assert_eq!(load_points(&ok).unwrap().len(), 3);

        let bad = write_file(&dir, "data3d.csv", "0,0,0\n1,1,1\n");
        assert!(matches!(load_points(&bad), Err(ChartError::Shape { .. })));
    }

    #[test]
    fn trajectory_rows_are_flattened_snapshots() {
        let dir = scratch_dir("trajectory");
        let path = write_file(&dir, "prototypes.csv", "0,0,1,1\n0.1,0.2,0.9,0.8\n0.2,0.3,0.8,0.7\n");
        let set = load_trajectory(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.n_prototypes(), 2);
        assert_eq!(set.last().points(), &[[0.2, 0.3], [0.8, 0.7]]);

        let odd = write_file(&dir, "odd.csv", "0,0,1\n");
        assert!(matches!(load_trajectory(&odd), Err(ChartError::Shape { .. })));
    }

    #[test]
    fn single_column_sweep_pairs_with_candidates() {
        let dir = scratch_dir("sweep_single");
        let path = write_file(&dir, "error.csv", "4.0\n2.5\n1.0\n");
        let sweep = load_sweep(&path, &[1, 2, 3]).unwrap();
        assert_eq!(sweep[1], SweepPoint { k: 2, error: 2.5 });

        assert!(matches!(
            load_sweep(&path, &[1, 2]),
            Err(ChartError::Mismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn two_column_sweep_is_relayed() {
        let dir = scratch_dir("sweep_pairs");
        let path = write_file(&dir, "error.csv", "2,3.5\n5,1.25\n");
        let sweep = load_sweep(&path, &[]).unwrap();
        assert_eq!(
            sweep,
            vec![SweepPoint { k: 2, error: 3.5 }, SweepPoint { k: 5, error: 1.25 }]
        );

        let bad = write_file(&dir, "bad.csv", "2.5,3.5\n");
        assert!(matches!(load_sweep(&bad, &[]), Err(ChartError::DataFormat { .. })));
    }
}
