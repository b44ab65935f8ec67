use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use priority_queue::PriorityQueue;

use crate::graph::{CityId, RoadGraph};

use super::{Criterion, Path, PathSearch};

pub struct Dijkstra;

impl PathSearch for Dijkstra {
    fn search(
        graph: &RoadGraph,
        start: CityId,
        end: CityId,
        criterion: Criterion,
    ) -> Option<(Path, u64)> {
        if !graph.contains(start) {
            return None;
        }
        if start == end {
            return Some((vec![start], 0));
        }

        let mut frontier = PriorityQueue::<CityId, Reverse<u64>>::new();
        let mut distance = HashMap::<CityId, u64>::new();
        let mut parent = HashMap::<CityId, CityId>::new();
        let mut visited = HashSet::<CityId>::new();

        frontier.push(start, Reverse(0));
        distance.insert(start, 0);

        while let Some((current, Reverse(current_weight))) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }

            if current == end {
                return Some((extract_path(&parent, end), current_weight));
            }

            for (neighbor, weights) in graph.neighbors(current) {
                if visited.contains(&neighbor) {
                    continue;
                }

                let candidate = current_weight + criterion.weight(&weights);
                let improved = match distance.get(&neighbor) {
                    Some(known) => candidate < *known,
                    None => true,
                };

                //Re-pushing an item already in the frontier only changes its
                //priority.
                if improved {
                    distance.insert(neighbor, candidate);
                    parent.insert(neighbor, current);
                    frontier.push(neighbor, Reverse(candidate));
                }
            }
        }

        None
    }
}

fn extract_path(parent: &HashMap<CityId, CityId>, target: CityId) -> Path {
    let mut path = vec![target];
    let mut c = target;
    while let Some(&p) = parent.get(&c) {
        path.push(p);
        c = p;
    }
    path.reverse();
    path
}
