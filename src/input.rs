use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    str::FromStr,
};

use tracing::{debug, warn};

use crate::{
    error::{Error, InputError},
    graph::{CityId, Road, Weights},
    route::{Criterion, Request},
};

/// Everything read from an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInput {
    pub cities: BTreeMap<CityId, String>,
    pub roads: Vec<Road>,
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Cities,
    Roads,
    Requests,
}

/// A request before its city names are resolved. Cities may be declared
/// after the requests that use them.
struct PendingRequest<'a> {
    line: usize,
    start: &'a str,
    end: &'a str,
    priorities: Vec<Criterion>,
}

pub fn read_input(path: &Path) -> Result<RouteInput, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_input(&text)?)
}

/// Parses the `[CITIES]`, `[ROADS]` and `[REQUESTS]` sections.
pub fn parse_input(text: &str) -> Result<RouteInput, InputError> {
    let mut input = RouteInput::default();
    let mut road_lines = Vec::<usize>::new();
    let mut pending = Vec::<PendingRequest<'_>>::new();
    let mut section = None;

    for (number, raw) in text.lines().enumerate() {
        let line_number = number + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "[CITIES]" => {
                section = Some(Section::Cities);
                continue;
            }
            "[ROADS]" => {
                section = Some(Section::Roads);
                continue;
            }
            "[REQUESTS]" => {
                section = Some(Section::Requests);
                continue;
            }
            _ => {}
        }

        match section {
            Some(Section::Cities) => {
                let (id, name) = split(line, line_number, ":")?;
                let id = number_at::<CityId>(id, line_number)?;
                input.cities.insert(id, name.to_string());
            }
            Some(Section::Roads) => {
                input.roads.push(parse_road(line, line_number)?);
                road_lines.push(line_number);
            }
            Some(Section::Requests) => pending.push(parse_request(line, line_number)?),
            None => debug!("line {}: outside of any section, ignored", line_number),
        }
    }

    for (road, line) in input.roads.iter().zip(road_lines) {
        for id in [road.from, road.to] {
            if !input.cities.contains_key(&id) {
                return Err(InputError::UndeclaredCity { line, id });
            }
        }
    }

    let by_name = index_by_name(&input.cities);
    for request in pending {
        let resolve = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| InputError::UnknownCity {
                    line: request.line,
                    name: name.to_string(),
                })
        };

        input.requests.push(Request {
            start: resolve(request.start)?,
            end: resolve(request.end)?,
            priorities: request.priorities,
        });
    }

    Ok(input)
}

fn parse_road(line: &str, line_number: usize) -> Result<Road, InputError> {
    let (cities, parameters) = split(line, line_number, ":")?;
    let (from, to) = split(cities, line_number, "-")?;

    let values = parameters
        .split(',')
        .map(|value| number_at::<u32>(value, line_number).map(u64::from))
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [distance, time, cost] => Ok(Road {
            from: number_at(from, line_number)?,
            to: number_at(to, line_number)?,
            weights: Weights::new(*distance, *time, *cost),
        }),
        _ => Err(InputError::RoadParameters {
            line: line_number,
            expected: 3,
            found: values.len(),
        }),
    }
}

fn parse_request(line: &str, line_number: usize) -> Result<PendingRequest<'_>, InputError> {
    let (route, priorities) = split(line, line_number, "|")?;
    let (start, end) = split(route, line_number, "->")?;

    let inner = priorities
        .strip_prefix(&['(', '['][..])
        .and_then(|rest| rest.strip_suffix(&[')', ']'][..]))
        .ok_or_else(|| InputError::Brackets {
            line: line_number,
            found: priorities.to_string(),
        })?;

    //An empty pair of brackets is an empty priority list.
    let priorities = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner
            .split(',')
            .map(|tag| {
                tag.parse::<Criterion>()
                    .map_err(|unknown| InputError::UnknownCriterion {
                        line: line_number,
                        tag: unknown.0,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(PendingRequest {
        line: line_number,
        start,
        end,
        priorities,
    })
}

/// Name to id. A name declared twice resolves to the city declared last.
fn index_by_name(cities: &BTreeMap<CityId, String>) -> HashMap<&str, CityId> {
    let mut by_name = HashMap::<&str, CityId>::new();
    for (id, name) in cities {
        if let Some(previous) = by_name.insert(name.as_str(), *id) {
            warn!(
                "city {:?} is declared as {} and {}, requests use {}",
                name, previous, id, id
            );
        }
    }
    by_name
}

fn split<'a>(
    line: &'a str,
    line_number: usize,
    separator: &'static str,
) -> Result<(&'a str, &'a str), InputError> {
    line.split_once(separator)
        .map(|(left, right)| (left.trim(), right.trim()))
        .ok_or_else(|| InputError::MissingSeparator {
            line: line_number,
            separator,
            line_text: line.to_string(),
        })
}

fn number_at<T>(value: &str, line_number: usize) -> Result<T, InputError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let value = value.trim();
    value.parse::<T>().map_err(|source| InputError::InvalidNumber {
        line: line_number,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::Weights, route::Criterion::*};

    const SAMPLE: &str = "
[CITIES]
1: Москва
2: Санкт-Петербург
3: Тверь

[ROADS]
1 - 2: 700, 8, 1500
1 - 3: 180, 2, 400
3 - 2: 530, 6, 900

[REQUESTS]
Москва -> Санкт-Петербург | (Д,В,С)
Тверь -> Москва | [С, Д]
";

    #[test]
    fn parses_all_sections() {
        let input = parse_input(SAMPLE).unwrap();

        assert_eq!(input.cities.len(), 3);
        assert_eq!(input.cities[&2], "Санкт-Петербург");
        assert_eq!(
            input.roads[2],
            Road {
                from: 3,
                to: 2,
                weights: Weights::new(530, 6, 900)
            }
        );
        assert_eq!(
            input.requests,
            vec![
                Request {
                    start: 1,
                    end: 2,
                    priorities: vec![Distance, Time, Cost]
                },
                Request {
                    start: 3,
                    end: 1,
                    priorities: vec![Cost, Distance]
                },
            ]
        );
    }

    #[test]
    fn requests_may_precede_cities() {
        let input = parse_input("[REQUESTS]\nA -> B | ()\n[CITIES]\n1: A\n2: B\n").unwrap();

        assert_eq!(
            input.requests,
            vec![Request {
                start: 1,
                end: 2,
                priorities: vec![]
            }]
        );
    }

    #[test]
    fn repeated_priorities_are_kept() {
        let input = parse_input("[CITIES]\n1: A\n[REQUESTS]\nA -> A | (С,С)\n").unwrap();
        assert_eq!(input.requests[0].priorities, vec![Cost, Cost]);
    }

    #[test]
    fn unknown_city_name() {
        let err = parse_input("[CITIES]\n1: A\n[REQUESTS]\nA -> Z | (Д)\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownCity { line: 4, ref name } if name == "Z"
        ));
    }

    #[test]
    fn road_to_undeclared_city() {
        let err = parse_input("[CITIES]\n1: A\n[ROADS]\n1 - 5: 1, 1, 1\n").unwrap_err();
        assert!(matches!(err, InputError::UndeclaredCity { line: 4, id: 5 }));
    }

    #[test]
    fn bad_road_parameters() {
        let err = parse_input("[ROADS]\n1 - 2: 1, 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::RoadParameters {
                line: 2,
                expected: 3,
                found: 2
            }
        ));

        let err = parse_input("[ROADS]\n1 - 2: 1, x, 1\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { line: 2, .. }));

        let err = parse_input("[ROADS]\n1 2: 1, 1, 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::MissingSeparator { separator: "-", .. }
        ));
    }

    #[test]
    fn weights_above_u32_are_rejected() {
        let err = parse_input("[ROADS]\n1 - 2: 18446744073709551615, 1, 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidNumber { line: 2, ref value, .. } if value == "18446744073709551615"
        ));

        let input = parse_input("[CITIES]\n1: A\n2: B\n[ROADS]\n1 - 2: 4294967295, 0, 1\n").unwrap();
        assert_eq!(input.roads[0].weights, Weights::new(u64::from(u32::MAX), 0, 1));
    }

    #[test]
    fn bad_priorities() {
        let err = parse_input("[REQUESTS]\nA -> B | Д,В\n").unwrap_err();
        assert!(matches!(err, InputError::Brackets { line: 2, .. }));

        let err = parse_input("[REQUESTS]\nA -> B | (Д,Q)\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownCriterion { line: 2, ref tag } if tag == "Q"
        ));
    }

    #[test]
    fn lines_outside_sections_are_ignored() {
        let input = parse_input("preamble\n[CITIES]\n1: A\n").unwrap();
        assert_eq!(input.cities.len(), 1);
    }
}
