use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

use crate::graph::CityId;

/// Malformed input file. Raised before any graph is built.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: expected `{separator}` in {line_text:?}")]
    MissingSeparator {
        line: usize,
        separator: &'static str,
        line_text: String,
    },

    #[error("line {line}: {value:?} is not an integer between 0 and {}", u32::MAX)]
    InvalidNumber {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: expected {expected} road parameters, found {found}")]
    RoadParameters {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: city {id} is not declared in [CITIES]")]
    UndeclaredCity { line: usize, id: CityId },

    #[error("line {line}: unknown city {name:?}")]
    UnknownCity { line: usize, name: String },

    #[error("line {line}: unknown criterion {tag:?}")]
    UnknownCriterion { line: usize, tag: String },

    #[error("line {line}: priorities must be enclosed in brackets, found {found:?}")]
    Brackets { line: usize, found: String },
}

/// Broken invariant inside the route core. Never expected on valid paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no road between {from} and {to} although the path uses it")]
    MissingRoad { from: CityId, to: CityId },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input")]
    Input(#[from] InputError),

    #[error("route computation failed")]
    Route(#[from] RouteError),
}
