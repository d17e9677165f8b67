use crate::path::CurvePath;

use super::types::{PathResult, RouteRequest};

/// Straight connector between the two rendered endpoints. Ignores obstacles.
pub(crate) fn route_direct(request: &RouteRequest) -> PathResult {
    let waypoints = vec![request.from_pos, request.to_pos];
    let svg_path = CurvePath::polyline(&waypoints);
    let center = request.from_pos.midpoint(&request.to_pos);
    PathResult::new(waypoints, svg_path, center, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BBox, Position, Side};
    use crate::routing::types::EdgeEndpoints;

    #[test]
    fn straight_line_with_midpoint_label() {
        let request = RouteRequest::from_endpoints(&EdgeEndpoints {
            from_node_bbox: BBox::new(-40.0, -20.0, 0.0, 20.0),
            from_pos: Position::new(0.0, 0.0),
            from_side: Side::Right,
            to_node_bbox: BBox::new(100.0, -20.0, 140.0, 20.0),
            to_pos: Position::new(100.0, 0.0),
            to_side: Side::Left,
        });
        let result = route_direct(&request);
        assert_eq!(result.waypoints, vec![Position::new(0.0, 0.0), Position::new(100.0, 0.0)]);
        assert_eq!(result.center, Position::new(50.0, 0.0));
        assert!(result.rotate_arrows);
        assert_eq!(result.svg_path.to_svg(), "M 0 0 L 100 0");
    }
}
