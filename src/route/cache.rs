use std::collections::HashMap;

use crate::{
    error::RouteError,
    graph::{CityId, RoadGraph, Weights},
};

use super::RouteCost;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Memoized route costs, keyed by the exact city sequence.
///
/// Entries are only meaningful for the graph they were computed on; the
/// owning context clears the cache together with the graph.
#[derive(Debug, Default)]
pub struct RouteCostCache {
    entries: HashMap<Vec<CityId>, RouteCost>,
    hits: u64,
    misses: u64,
}

impl RouteCostCache {
    pub fn new() -> Self {
        RouteCostCache::default()
    }

    /// Total distance, time and cost of `path`.
    ///
    /// Fails if two consecutive cities have no road between them, which
    /// means the path wasn't produced by a search on `graph`.
    pub fn cost(&mut self, graph: &RoadGraph, path: &[CityId]) -> Result<RouteCost, RouteError> {
        if let Some(cost) = self.entries.get(path) {
            self.hits += 1;
            return Ok(*cost);
        }
        self.misses += 1;

        let mut total = Weights::default();
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            match graph.edge_weights(from, to) {
                Some(weights) => total += weights,
                None => return Err(RouteError::MissingRoad { from, to }),
            }
        }

        self.entries.insert(path.to_vec(), total);
        Ok(total)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
