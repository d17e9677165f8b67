use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Position, Side};
use crate::path::CurvePath;

/// Endpoint geometry of one edge as supplied by the host canvas.
///
/// `from_pos`/`to_pos` are the rendered endpoints and may be offset from the
/// node side (for example by an arrowhead gap).
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeEndpoints {
    #[serde(rename = "fromNodeBBox")]
    pub from_node_bbox: BBox,
    pub from_pos: Position,
    pub from_side: Side,
    #[serde(rename = "toNodeBBox")]
    pub to_node_bbox: BBox,
    pub to_pos: Position,
    pub to_side: Side,
}

/// Resolved endpoint geometry shared by every strategy for a single call.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RouteRequest {
    pub from_node_bbox: BBox,
    pub from_pos: Position,
    pub from_bbox_side_pos: Position,
    pub from_side: Side,
    pub to_node_bbox: BBox,
    pub to_pos: Position,
    pub to_bbox_side_pos: Position,
    pub to_side: Side,
}

impl RouteRequest {
    pub fn from_endpoints(endpoints: &EdgeEndpoints) -> Self {
        RouteRequest {
            from_node_bbox: endpoints.from_node_bbox,
            from_pos: endpoints.from_pos,
            from_bbox_side_pos: endpoints.from_node_bbox.side_center(endpoints.from_side),
            from_side: endpoints.from_side,
            to_node_bbox: endpoints.to_node_bbox,
            to_pos: endpoints.to_pos,
            to_bbox_side_pos: endpoints.to_node_bbox.side_center(endpoints.to_side),
            to_side: endpoints.to_side,
        }
    }
}

/// A computed route, ready for the host renderer.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    pub waypoints: Vec<Position>,
    pub svg_path: CurvePath,
    /// Anchor for the edge label.
    pub center: Position,
    /// Whether arrowheads should follow the final segment direction.
    pub rotate_arrows: bool,
}

impl PathResult {
    pub(crate) fn new(waypoints: Vec<Position>, svg_path: CurvePath, center: Position, rotate_arrows: bool) -> Self {
        PathResult {
            waypoints,
            svg_path,
            center,
            rotate_arrows,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
