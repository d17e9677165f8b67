mod astar;
mod direct;
mod edge_router;
mod grid;
mod obstacles;
mod square;
mod types;

pub use edge_router::{compute_route, EdgeRouter};
pub use types::{EdgeEndpoints, PathResult, RouteRequest};
