use tracing::{info, warn};

use crate::{
    context::{RouteContext, RoutePlan},
    error::RouteError,
    graph::RoadGraph,
    input::RouteInput,
    route::{cache::CacheStats, PathSearch},
};

pub struct BatchOutcome {
    pub plans: Vec<RoutePlan>,
    pub stats: CacheStats,
}

/// Plans every request of `input` against one shared route context.
///
/// The context is closed before returning, also when a request failed.
pub fn start<S: PathSearch>(input: &RouteInput) -> Result<BatchOutcome, RouteError> {
    let graph = RoadGraph::new(input.cities.keys().copied(), input.roads.iter().cloned());
    let mut context = RouteContext::new(graph);

    let mut plans = Vec::with_capacity(input.requests.len());
    let mut failure = None;
    for (index, request) in input.requests.iter().enumerate() {
        match context.plan::<S>(request) {
            Ok(plan) => {
                if plan.compromise.is_none() {
                    info!(
                        "request {}: no route from {} to {}",
                        index + 1,
                        request.start,
                        request.end
                    );
                }
                plans.push(plan);
            }
            Err(err) => {
                warn!("request {}: {}", index + 1, err);
                failure = Some(err);
                break;
            }
        }
    }

    let stats = context.close();
    if let Some(err) = failure {
        return Err(err);
    }

    info!(
        "planned {} requests ({} cached routes, {} hits)",
        plans.len(),
        stats.entries,
        stats.hits
    );
    Ok(BatchOutcome { plans, stats })
}
