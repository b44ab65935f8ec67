use std::{collections::BTreeMap, fs, path::Path};

use crate::{
    context::{RoutePlan, RowLabel},
    error::Error,
    graph::CityId,
    route::{compromise::Candidate, Criterion},
};

pub const NOT_FOUND: &str = "Маршрут не найден";

/// One line per row, four rows per plan, no trailing newline.
pub fn render(plans: &[RoutePlan], cities: &BTreeMap<CityId, String>) -> String {
    plans
        .iter()
        .flat_map(|plan| plan.rows())
        .map(|(label, candidate)| render_row(label, candidate, cities))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_row(
    label: RowLabel,
    candidate: Option<&Candidate>,
    cities: &BTreeMap<CityId, String>,
) -> String {
    match candidate {
        Some(candidate) => {
            let names = candidate
                .path
                .iter()
                .map(|id| match cities.get(id) {
                    Some(name) => name.clone(),
                    None => id.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" -> ");

            let cost = &candidate.cost;
            format!(
                "{}: {} | {}={}, {}={}, {}={}",
                label,
                names,
                Criterion::Distance.tag(),
                cost.distance,
                Criterion::Time.tag(),
                cost.time,
                Criterion::Cost.tag(),
                cost.cost
            )
        }
        None => format!("{}: {}", label, NOT_FOUND),
    }
}

pub fn write_output(path: &Path, text: &str) -> Result<(), Error> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
