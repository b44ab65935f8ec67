use std::{fmt, str::FromStr};

use crate::graph::{CityId, RoadGraph, Weights};

pub mod cache;
pub mod compromise;
pub mod search;

/// Cities from start to end, both inclusive.
pub type Path = Vec<CityId>;

/// Summed weights of every road on a path.
pub type RouteCost = Weights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Distance,
    Time,
    Cost,
}

impl Criterion {
    /// Row order of the result file.
    pub const ALL: [Criterion; 3] = [Criterion::Distance, Criterion::Time, Criterion::Cost];

    /// The component of `weights` this criterion minimizes.
    pub fn weight(self, weights: &Weights) -> u64 {
        match self {
            Criterion::Distance => weights.distance,
            Criterion::Time => weights.time,
            Criterion::Cost => weights.cost,
        }
    }

    /// Short tag used in the result file, e.g. `Д=10`.
    pub fn tag(self) -> &'static str {
        match self {
            Criterion::Distance => "Д",
            Criterion::Time => "В",
            Criterion::Cost => "С",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Distance => write!(f, "ДЛИНА"),
            Criterion::Time => write!(f, "ВРЕМЯ"),
            Criterion::Cost => write!(f, "СТОИМОСТЬ"),
        }
    }
}

/// One line of the request section, with city names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub start: CityId,
    pub end: CityId,
    pub priorities: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCriterion(pub String);

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    /// Accepts the Cyrillic tags of the input format and their Latin
    /// counterparts.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "Д" | "D" => Ok(Criterion::Distance),
            "В" | "T" => Ok(Criterion::Time),
            "С" | "C" => Ok(Criterion::Cost),
            other => Err(UnknownCriterion(other.to_string())),
        }
    }
}

/// A single route search between two cities for one criterion.
pub trait PathSearch {
    /// Best path from `start` to `end` and its total weight under
    /// `criterion`, or `None` if `end` can't be reached.
    fn search(
        graph: &RoadGraph,
        start: CityId,
        end: CityId,
        criterion: Criterion,
    ) -> Option<(Path, u64)>;
}
