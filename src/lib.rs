//! Edge routing for canvas editors.
//!
//! Given two rectangular nodes, the sides their edge attaches to and the
//! other nodes on the canvas, the router computes the waypoints of the edge
//! and a renderable curve through them. Three strategies are available:
//! a straight connector, rule-based orthogonal ("square") routing, and a
//! time-boxed A* search over a uniform grid.
//!
//! ```
//! use canvas_edge_router::{compute_route, BBox, EdgeEndpoints, Position, RouterConfig, Side, Strategy};
//!
//! let endpoints = EdgeEndpoints {
//!     from_node_bbox: BBox::new(-100.0, -20.0, 0.0, 20.0),
//!     from_pos: Position::new(0.0, 0.0),
//!     from_side: Side::Right,
//!     to_node_bbox: BBox::new(100.0, -20.0, 200.0, 20.0),
//!     to_pos: Position::new(100.0, 0.0),
//!     to_side: Side::Left,
//! };
//! let route = compute_route(&RouterConfig::with_strategy(Strategy::Direct), &endpoints, &[]).unwrap();
//! assert_eq!(route.center, Position::new(50.0, 0.0));
//! ```

mod config;
mod error;
pub mod geometry;
mod lib_tracing;
pub mod path;
mod routing;

pub use config::{RouterConfig, Strategy};
pub use error::{ConfigError, TracerError};
pub use geometry::{BBox, Orientation, Position, Side};
pub use lib_tracing::{RouterTracer, TracerGuard};
pub use path::{CurvePath, PathCommand};
pub use routing::{compute_route, EdgeEndpoints, EdgeRouter, PathResult, RouteRequest};
