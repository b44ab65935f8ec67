use daggy::petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use std::{
    collections::HashMap,
    ops::{Add, AddAssign},
};
use tracing::warn;

pub type CityId = u32;

/// Distance, time and cost of a single road or of a whole route.
///
/// Road weights come in as `u32` from the reader, so sums over a simple path
/// stay far below `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weights {
    pub distance: u64,
    pub time: u64,
    pub cost: u64,
}

impl Weights {
    pub fn new(distance: u64, time: u64, cost: u64) -> Self {
        Weights {
            distance,
            time,
            cost,
        }
    }
}

impl Add for Weights {
    type Output = Weights;

    fn add(self, other: Weights) -> Weights {
        Weights {
            distance: self.distance + other.distance,
            time: self.time + other.time,
            cost: self.cost + other.cost,
        }
    }
}

impl AddAssign for Weights {
    fn add_assign(&mut self, other: Weights) {
        *self = *self + other;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Road {
    pub from: CityId,
    pub to: CityId,
    pub weights: Weights,
}

/// Undirected road network.
///
/// Every road can be traveled in both directions with the same weights. The
/// graph is immutable once built; the edge index is filled during
/// construction so lookups never see a half-built state.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    graph: UnGraph<CityId, Weights>,
    indexation: HashMap<CityId, NodeIndex>,
    edge_index: HashMap<(CityId, CityId), Weights>,
}

impl RoadGraph {
    pub fn new<C, R>(cities: C, roads: R) -> Self
    where
        C: IntoIterator<Item = CityId>,
        R: IntoIterator<Item = Road>,
    {
        let mut graph = UnGraph::<CityId, Weights>::default();
        let mut indexation = HashMap::<CityId, NodeIndex>::new();

        for city in cities {
            indexation
                .entry(city)
                .or_insert_with(|| graph.add_node(city));
        }

        for road in roads {
            let a = *indexation
                .entry(road.from)
                .or_insert_with(|| graph.add_node(road.from));
            let b = *indexation
                .entry(road.to)
                .or_insert_with(|| graph.add_node(road.to));

            //A second declaration of the same pair replaces the first one, so
            //the search and the edge index always agree on the weights.
            if graph.find_edge(a, b).is_some() {
                warn!(
                    "road {} - {} declared more than once, keeping the last one",
                    road.from, road.to
                );
            }
            graph.update_edge(a, b, road.weights);
        }

        let mut road_graph = RoadGraph {
            graph,
            indexation,
            edge_index: HashMap::new(),
        };
        road_graph.build_edge_index();
        road_graph
    }

    fn build_edge_index(&mut self) {
        self.edge_index = HashMap::with_capacity(self.graph.edge_count() * 2);
        for edge in self.graph.edge_references() {
            let a = self.graph[edge.source()];
            let b = self.graph[edge.target()];
            self.edge_index.insert((a, b), *edge.weight());
            self.edge_index.insert((b, a), *edge.weight());
        }
    }

    pub fn contains(&self, city: CityId) -> bool {
        self.indexation.contains_key(&city)
    }

    /// Every road leaving `city`, as `(neighbor, weights)`. Unknown cities
    /// have no neighbors.
    pub fn neighbors(&self, city: CityId) -> impl Iterator<Item = (CityId, Weights)> + '_ {
        self.indexation
            .get(&city)
            .into_iter()
            .flat_map(move |&index| {
                self.graph.edges(index).map(move |edge| {
                    let other = if edge.source() == index {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    (self.graph[other], *edge.weight())
                })
            })
    }

    /// Weights of the road between `from` and `to` in O(1).
    pub fn edge_weights(&self, from: CityId, to: CityId) -> Option<Weights> {
        self.edge_index.get(&(from, to)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn clear(&mut self) {
        self.edge_index.clear();
        self.indexation.clear();
        self.graph.clear();
    }
}
