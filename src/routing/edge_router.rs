use tracing::{debug, debug_span, warn};

use crate::config::{RouterConfig, Strategy};
use crate::geometry::BBox;

use super::astar::route_astar;
use super::direct::route_direct;
use super::square::route_square;
use super::types::{EdgeEndpoints, PathResult, RouteRequest};

/// Picks the configured strategy for each edge and hands back its path.
///
/// `None` always means "keep whatever the host currently draws": no route was
/// found, the search timed out, or live updates are disabled while dragging.
#[derive(Clone, Debug, Default)]
pub struct EdgeRouter {
    config: RouterConfig,
}

impl EdgeRouter {
    pub fn new(config: RouterConfig) -> Self {
        EdgeRouter { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn route(&self, endpoints: &EdgeEndpoints, obstacles: &[BBox]) -> Option<PathResult> {
        self.route_edge(endpoints, obstacles, false)
    }

    /// Like [`EdgeRouter::route`], for edges attached to a node that is being dragged.
    pub fn route_while_dragging(&self, endpoints: &EdgeEndpoints, obstacles: &[BBox]) -> Option<PathResult> {
        self.route_edge(endpoints, obstacles, true)
    }

    /// Replaces `current` with a freshly computed path. A failed computation
    /// leaves `current` untouched. Returns whether `current` was replaced.
    pub fn refresh(
        &self,
        current: &mut Option<PathResult>,
        endpoints: &EdgeEndpoints,
        obstacles: &[BBox],
        dragging: bool,
    ) -> bool {
        match self.route_edge(endpoints, obstacles, dragging) {
            Some(path) => {
                *current = Some(path);
                true
            }
            None => false,
        }
    }

    fn route_edge(&self, endpoints: &EdgeEndpoints, obstacles: &[BBox], dragging: bool) -> Option<PathResult> {
        let _span = debug_span!("route_edge", strategy = ?self.config.strategy, dragging).entered();

        if let Err(err) = self.config.validate() {
            warn!(%err, "refusing to route with an invalid config");
            return None;
        }

        let request = RouteRequest::from_endpoints(endpoints);
        match self.config.strategy {
            Strategy::Direct => Some(route_direct(&request)),
            Strategy::Square => Some(route_square(&request, &self.config)),
            Strategy::AStar => {
                if dragging && !self.config.live_update_during_drag {
                    debug!("skipping grid search during drag");
                    return None;
                }
                route_astar(&request, obstacles, &self.config)
            }
        }
    }
}

/// Computes the route for one edge with a one-off [`EdgeRouter`].
pub fn compute_route(config: &RouterConfig, endpoints: &EdgeEndpoints, obstacles: &[BBox]) -> Option<PathResult> {
    EdgeRouter::new(config.clone()).route(endpoints, obstacles)
}
