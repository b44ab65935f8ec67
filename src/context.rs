use std::fmt;

use tracing::debug;

use crate::{
    error::RouteError,
    graph::RoadGraph,
    route::{
        cache::{CacheStats, RouteCostCache},
        compromise::{select_among, Candidate},
        Criterion, PathSearch, Request,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLabel {
    Optimal(Criterion),
    Compromise,
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Optimal(criterion) => write!(f, "{}", criterion),
            RowLabel::Compromise => write!(f, "КОМПРОМИСС"),
        }
    }
}

/// Result of one request: the optimum per criterion and the compromise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub optimal: [Option<Candidate>; 3],
    pub compromise: Option<Candidate>,
}

impl RoutePlan {
    /// Rows in output order: distance, time, cost, compromise.
    pub fn rows(&self) -> impl Iterator<Item = (RowLabel, Option<&Candidate>)> + '_ {
        Criterion::ALL
            .iter()
            .zip(self.optimal.iter())
            .map(|(criterion, candidate)| (RowLabel::Optimal(*criterion), candidate.as_ref()))
            .chain(std::iter::once((
                RowLabel::Compromise,
                self.compromise.as_ref(),
            )))
    }
}

/// Owns the road graph and the route cost cache for one batch of requests.
///
/// Cached costs are only valid for this graph, so both are dropped together
/// in [`RouteContext::close`].
pub struct RouteContext {
    graph: RoadGraph,
    cache: RouteCostCache,
}

impl RouteContext {
    pub fn new(graph: RoadGraph) -> Self {
        debug!(
            "route context with {} cities and {} roads",
            graph.node_count(),
            graph.edge_count()
        );
        RouteContext {
            graph,
            cache: RouteCostCache::new(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Runs one search per criterion and picks the compromise among the
    /// results. The compromise reuses the per-criterion paths instead of
    /// searching again.
    pub fn plan<S: PathSearch>(&mut self, request: &Request) -> Result<RoutePlan, RouteError> {
        let mut paths = Vec::with_capacity(Criterion::ALL.len());
        let mut optimal: [Option<Candidate>; 3] = [None, None, None];

        for (slot, criterion) in optimal.iter_mut().zip(Criterion::ALL) {
            match S::search(&self.graph, request.start, request.end, criterion) {
                Some((path, weight)) => {
                    debug!(
                        "{} -> {} by {}: {:?} ({})",
                        request.start, request.end, criterion, path, weight
                    );
                    let cost = self.cache.cost(&self.graph, &path)?;
                    *slot = Some(Candidate {
                        path: path.clone(),
                        cost,
                    });
                    paths.push(path);
                }
                None => debug!(
                    "{} -> {} by {}: unreachable",
                    request.start, request.end, criterion
                ),
            }
        }

        let compromise = select_among(&self.graph, &mut self.cache, &paths, &request.priorities)?;

        Ok(RoutePlan {
            optimal,
            compromise,
        })
    }

    /// Ends the batch. Clears cache and edge index and returns the final
    /// cache statistics.
    pub fn close(mut self) -> CacheStats {
        let stats = self.cache.stats();
        self.cache.clear();
        self.graph.clear();
        debug!(
            "route context closed: {} cached routes, {} hits, {} misses",
            stats.entries, stats.hits, stats.misses
        );
        stats
    }
}
