use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::RouteError,
    graph::{CityId, RoadGraph},
};

use super::{cache::RouteCostCache, Criterion, Path, PathSearch, RouteCost};

/// A unique per-criterion optimum together with its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: Path,
    pub cost: RouteCost,
}

/// Searches all three criteria and picks the compromise among their optima.
pub fn select_compromise<S: PathSearch>(
    graph: &RoadGraph,
    cache: &mut RouteCostCache,
    start: CityId,
    end: CityId,
    priorities: &[Criterion],
) -> Result<Option<Path>, RouteError> {
    let optima: Vec<Path> = Criterion::ALL
        .iter()
        .filter_map(|criterion| S::search(graph, start, end, *criterion))
        .map(|(path, _)| path)
        .collect();

    Ok(select_among(graph, cache, &optima, priorities)?.map(|candidate| candidate.path))
}

/// Picks the compromise among already computed optima.
///
/// Each priority keeps only the candidates with the lowest value of its
/// component. Filtering stops once a single candidate is left. Priorities may
/// repeat or leave out criteria; only the order matters.
pub fn select_among<'a, I>(
    graph: &RoadGraph,
    cache: &mut RouteCostCache,
    optima: I,
    priorities: &[Criterion],
) -> Result<Option<Candidate>, RouteError>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut seen = HashSet::<&[CityId]>::new();
    let mut candidates = Vec::<Candidate>::new();

    for path in optima {
        if seen.insert(path.as_slice()) {
            let cost = cache.cost(graph, path)?;
            candidates.push(Candidate {
                path: path.clone(),
                cost,
            });
        }
    }

    for criterion in priorities {
        if candidates.len() <= 1 {
            break;
        }

        let lowest = match candidates.iter().map(|c| criterion.weight(&c.cost)).min() {
            Some(lowest) => lowest,
            None => break,
        };
        candidates.retain(|c| criterion.weight(&c.cost) == lowest);
        debug!("{} <= {}: {} candidates left", criterion, lowest, candidates.len());
    }

    Ok(candidates.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{Road, Weights},
        route::search::Dijkstra,
    };
    use crate::route::Criterion::{Cost, Distance, Time};

    fn road(from: CityId, to: CityId, d: u64, t: u64, c: u64) -> Road {
        Road {
            from,
            to,
            weights: Weights::new(d, t, c),
        }
    }

    // A=1, B=2, C=3
    fn triangle() -> RoadGraph {
        RoadGraph::new(
            [1, 2, 3],
            [
                road(1, 2, 5, 1, 10),
                road(2, 3, 5, 1, 10),
                road(1, 3, 11, 1, 1),
            ],
        )
    }

    fn compromise(graph: &RoadGraph, priorities: &[Criterion]) -> Option<Path> {
        let mut cache = RouteCostCache::new();
        select_compromise::<Dijkstra>(graph, &mut cache, 1, 3, priorities).unwrap()
    }

    #[test]
    fn cost_first_takes_direct_road() {
        assert_eq!(compromise(&triangle(), &[Cost, Distance, Time]), Some(vec![1, 3]));
    }

    #[test]
    fn distance_first_takes_detour() {
        assert_eq!(compromise(&triangle(), &[Distance, Cost, Time]), Some(vec![1, 2, 3]));
    }

    #[test]
    fn single_priority_can_decide() {
        // A→C takes one unit of time, the detour two.
        assert_eq!(compromise(&triangle(), &[Time, Distance]), Some(vec![1, 3]));
    }

    #[test]
    fn ties_are_broken_by_later_priorities() {
        let graph = triangle();
        let mut cache = RouteCostCache::new();
        let optima = vec![vec![1, 2, 3], vec![1, 3]];

        // equal distance, time decides
        let graph_tied = RoadGraph::new(
            [1, 2, 3],
            [road(1, 2, 5, 3, 1), road(2, 3, 5, 3, 1), road(1, 3, 10, 2, 9)],
        );
        let picked = select_among(&graph_tied, &mut cache, &optima, &[Distance, Time, Cost])
            .unwrap()
            .unwrap();
        assert_eq!(picked.path, vec![1, 3]);
        assert_eq!(picked.cost, Weights::new(10, 2, 9));

        let mut cache = RouteCostCache::new();
        let picked = select_among(&graph, &mut cache, &optima, &[Distance, Time, Cost])
            .unwrap()
            .unwrap();
        assert_eq!(picked.cost.distance, 10);
    }

    #[test]
    fn cost_decides_when_distance_and_time_tie() {
        // A-B-C and A-D-C both take distance 10 and time 4, A-D-C is cheaper.
        let graph = RoadGraph::new(
            [1, 2, 3, 4],
            [
                road(1, 2, 5, 2, 6),
                road(2, 3, 5, 2, 6),
                road(1, 4, 4, 1, 2),
                road(4, 3, 6, 3, 3),
                road(1, 3, 20, 20, 20),
            ],
        );
        let mut cache = RouteCostCache::new();
        let optima = vec![vec![1, 2, 3], vec![1, 4, 3], vec![1, 3]];

        let picked = select_among(&graph, &mut cache, &optima, &[Distance, Time, Cost])
            .unwrap()
            .unwrap();

        assert_eq!(picked.path, vec![1, 4, 3]);
        assert_eq!(picked.cost, Weights::new(10, 4, 5));
    }

    #[test]
    fn duplicate_optima_are_merged() {
        let graph = triangle();
        let mut cache = RouteCostCache::new();
        let optima = vec![vec![1, 3], vec![1, 3], vec![1, 3]];

        let picked = select_among(&graph, &mut cache, &optima, &[]).unwrap();

        assert_eq!(picked.map(|c| c.path), Some(vec![1, 3]));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn repeated_and_partial_priorities_are_accepted() {
        let graph = triangle();
        assert_eq!(compromise(&graph, &[Cost, Cost, Cost]), Some(vec![1, 3]));
        assert_eq!(compromise(&graph, &[Distance]), Some(vec![1, 2, 3]));
        // No priorities: first candidate in criterion order, the distance optimum.
        assert_eq!(compromise(&graph, &[]), Some(vec![1, 2, 3]));
    }

    #[test]
    fn nothing_reachable_means_no_compromise() {
        let graph = RoadGraph::new([1, 2, 3], [road(1, 2, 1, 1, 1)]);
        assert_eq!(compromise(&graph, &[Distance, Time, Cost]), None);
    }

    #[test]
    fn costs_come_from_the_cache() {
        let graph = triangle();
        let mut cache = RouteCostCache::new();
        cache.cost(&graph, &[1, 2, 3]).unwrap();

        select_compromise::<Dijkstra>(&graph, &mut cache, 1, 3, &[Time]).unwrap();

        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn invalid_optimum_is_an_error() {
        let graph = RoadGraph::new([1, 2, 3], [road(1, 2, 1, 1, 1)]);
        let mut cache = RouteCostCache::new();

        assert_eq!(
            select_among(&graph, &mut cache, &vec![vec![1, 3]], &[Distance]),
            Err(RouteError::MissingRoad { from: 1, to: 3 })
        );
    }
}
