use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Utc};

use crate::{
    context::{RoutePlan, RowLabel},
    error::Error,
    route::cache::CacheStats,
};

/// Facts about one run, written to the run log.
pub struct RunSummary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub cities: usize,
    pub roads: usize,
    pub plans: &'a [RoutePlan],
    pub stats: CacheStats,
    pub duration: Duration,
}

/// Routes found per row kind, in output order.
pub fn found_per_row(plans: &[RoutePlan]) -> Vec<(RowLabel, usize)> {
    let mut found = Vec::<(RowLabel, usize)>::new();
    for plan in plans {
        for (index, (label, candidate)) in plan.rows().enumerate() {
            if found.len() <= index {
                found.push((label, 0));
            }
            if candidate.is_some() {
                found[index].1 += 1;
            }
        }
    }
    found
}

/// Creates `<directory>/<YYYYmmdd_HHMMSS>.log` and writes the summary to it.
pub fn write_run_log(directory: &Path, summary: &RunSummary<'_>) -> Result<PathBuf, Error> {
    let date = Utc::now();
    let path = directory.join(format!("{}.log", date.format("%Y%m%d_%H%M%S")));

    write_log(directory, &path, &date, summary).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn write_log(
    directory: &Path,
    path: &Path,
    date: &DateTime<Utc>,
    summary: &RunSummary<'_>,
) -> std::io::Result<()> {
    fs::create_dir_all(directory)?;
    fs::write(path, header(date, summary))?;

    let mut file = OpenOptions::new().append(true).open(path)?;

    writeln!(&mut file, "row,found")?;
    for (label, found) in found_per_row(summary.plans) {
        writeln!(&mut file, "{},{}", label, found)?;
    }

    writeln!(&mut file, "---")?;
    writeln!(
        &mut file,
        "cached routes: {}, hits: {}, misses: {}",
        summary.stats.entries, summary.stats.hits, summary.stats.misses
    )?;
    writeln!(
        &mut file,
        "overall execution time: {}",
        summary.duration.as_secs_f64()
    )?;
    file.flush()
}

fn header(date: &DateTime<Utc>, summary: &RunSummary<'_>) -> String {
    format!(
        "date: {}
input: {}
output: {}
cities: {},
roads: {},
requests: {},
---
",
        date.format("%Y-%m-%d %H:%M:%S"),
        summary.input.display(),
        summary.output.display(),
        summary.cities,
        summary.roads,
        summary.plans.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::Weights, route::compromise::Candidate};

    fn plans() -> Vec<RoutePlan> {
        let direct = Candidate {
            path: vec![1, 3],
            cost: Weights::new(11, 1, 1),
        };
        vec![
            RoutePlan {
                optimal: [Some(direct.clone()), Some(direct.clone()), None],
                compromise: Some(direct),
            },
            RoutePlan {
                optimal: [None, None, None],
                compromise: None,
            },
        ]
    }

    #[test]
    fn counts_found_routes() {
        let counts: Vec<usize> = found_per_row(&plans()).into_iter().map(|(_, n)| n).collect();
        assert_eq!(counts, vec![1, 1, 0, 1]);
        assert!(found_per_row(&[]).is_empty());
    }

    #[test]
    fn writes_summary_file() {
        let directory = tempfile::tempdir().unwrap();
        let plans = plans();
        let summary = RunSummary {
            input: Path::new("input.txt"),
            output: Path::new("output.txt"),
            cities: 3,
            roads: 3,
            plans: &plans,
            stats: CacheStats {
                entries: 1,
                hits: 2,
                misses: 1,
            },
            duration: Duration::from_millis(5),
        };

        let path = write_run_log(&directory.path().join("runs"), &summary).unwrap();
        let text = fs::read_to_string(path).unwrap();

        assert!(text.starts_with("date: "));
        assert!(text.contains("requests: 2,"));
        assert!(text.contains("КОМПРОМИСС,1"));
        assert!(text.contains("cached routes: 1, hits: 2, misses: 1"));
    }
}
