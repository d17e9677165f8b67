use tracing::trace;

use crate::config::RouterConfig;
use crate::geometry::{combine_bboxes, BBox, Orientation, Position, Side};
use crate::path::CurvePath;

use super::grid::Grid;
use super::types::{PathResult, RouteRequest};

/// One end of an orthogonal route.
#[derive(Clone, Copy, Debug)]
struct Anchor {
    pos: Position,
    side_pos: Position,
    side: Side,
}

/// Rule-based orthogonal routing with a bounded number of bends.
///
/// The case analysis only looks at the two connection sides:
///
/// - same side: a U around both endpoints,
/// - opposite sides on the same axis: a Z with the jog halfway,
/// - perpendicular sides: an L, unless the bend would lead back into one of
///   the nodes, in which case the colliding end first steps one grid cell out
///   of its node and the route continues as a Z (or a U when both ends
///   collide).
pub(crate) fn route_square(request: &RouteRequest, config: &RouterConfig) -> PathResult {
    let grid = Grid::new(config.grid_resolution);
    let nodes = [request.from_node_bbox, request.to_node_bbox];
    let from = Anchor {
        pos: request.from_pos,
        side_pos: request.from_bbox_side_pos,
        side: request.from_side,
    };
    let to = Anchor {
        pos: request.to_pos,
        side_pos: request.to_bbox_side_pos,
        side: request.to_side,
    };

    let waypoints = if from.side == to.side {
        trace!(side = ?from.side, "square route: same side");
        u_path(from.pos, to.pos, to.side, &nodes, &grid)
    } else if from.side.orientation() == to.side.orientation() {
        trace!("square route: same axis");
        z_path(from.pos, to.pos, from.side.orientation())
    } else {
        perpendicular_path(from, to, &nodes, &grid)
    };

    let center = label_anchor(&waypoints);
    let svg_path = if config.round_corners {
        CurvePath::rounded_polyline(&waypoints, config.corner_radius)
    } else {
        CurvePath::polyline(&waypoints)
    };
    PathResult::new(waypoints, svg_path, center, false)
}

fn perpendicular_path(from: Anchor, to: Anchor, nodes: &[BBox; 2], grid: &Grid) -> Vec<Position> {
    let ideal_center = match from.side.orientation() {
        Orientation::Horizontal => Position::new(to.pos.x, from.pos.y),
        Orientation::Vertical => Position::new(from.pos.x, to.pos.y),
    };
    let from_collides = heads_back(&ideal_center, &from);
    let to_collides = heads_back(&ideal_center, &to);
    trace!(from_collides, to_collides, "square route: perpendicular sides");

    match (from_collides, to_collides) {
        (false, false) => vec![from.pos, ideal_center, to.pos],
        (true, false) => detour_path(from, to, nodes, grid),
        (false, true) => {
            let mut path = detour_path(to, from, nodes, grid);
            path.reverse();
            path
        }
        (true, true) => {
            let stub = step_out(&from, grid);
            let first_leg_end = u_path(stub, to.pos, to.side, nodes, grid)[1];
            let stub = clear_leg(stub, first_leg_end, from.side, nodes, grid);
            let mut path = vec![from.pos];
            path.extend(u_path(stub, to.pos, to.side, nodes, grid));
            path
        }
    }
}

/// True if reaching `bend` from `anchor` means travelling against the anchor's
/// outward direction, i.e. back into its own node.
fn heads_back(bend: &Position, anchor: &Anchor) -> bool {
    let side = anchor.side;
    (side.axis_coordinate(bend) - side.axis_coordinate(&anchor.pos)) * side.direction() < 0.0
}

/// The anchor moved one grid cell beyond its node side, snapped to the grid.
fn step_out(anchor: &Anchor, grid: &Grid) -> Position {
    let side = anchor.side;
    let outermost = farthest(
        side,
        side.axis_coordinate(&anchor.pos),
        side.axis_coordinate(&anchor.side_pos),
    );
    with_axis(anchor.pos, side, grid.round(outermost + side.direction() * grid.resolution))
}

/// Steps out of the colliding `start` node, then joins `end` with a Z whose
/// jog runs along the axis of `end`'s side.
fn detour_path(start: Anchor, end: Anchor, nodes: &[BBox; 2], grid: &Grid) -> Vec<Position> {
    let stub = step_out(&start, grid);
    let end_side = end.side;

    let mid = (end_side.axis_coordinate(&stub) + end_side.axis_coordinate(&end.pos)) / 2.0;
    let enters_from_outside = (mid - end_side.axis_coordinate(&end.pos)) * end_side.direction() > 0.0;

    let jog_start = with_axis(stub, end_side, mid);
    let jog_end = with_axis(end.pos, end_side, mid);
    let (stub, jog) = if enters_from_outside
        && !crosses_any(&stub, &jog_start, nodes)
        && !crosses_any(&jog_start, &jog_end, nodes)
    {
        (stub, mid)
    } else {
        let jog = clearance(end_side, nodes, grid);
        (clear_leg(stub, with_axis(stub, end_side, jog), start.side, nodes, grid), jog)
    };

    vec![
        start.pos,
        stub,
        with_axis(stub, end_side, jog),
        with_axis(end.pos, end_side, jog),
        end.pos,
    ]
}

/// Moves `stub` along `side` one grid cell past both nodes when the leg from
/// `stub` to `bend` would cut through one of them.
fn clear_leg(stub: Position, bend: Position, side: Side, nodes: &[BBox; 2], grid: &Grid) -> Position {
    if !crosses_any(&stub, &bend, nodes) {
        return stub;
    }
    let cleared = farthest(side, side.axis_coordinate(&stub), clearance(side, nodes, grid));
    with_axis(stub, side, cleared)
}

/// U-shaped path whose cross segment lies one grid cell beyond the farther
/// endpoint along `side`, pushed past both nodes if it would cut through one.
fn u_path(from: Position, to: Position, side: Side, nodes: &[BBox; 2], grid: &Grid) -> Vec<Position> {
    let outermost = farthest(side, side.axis_coordinate(&from), side.axis_coordinate(&to));
    let mut common = grid.round(outermost + side.direction() * grid.resolution);

    if crosses_any(&with_axis(from, side, common), &with_axis(to, side, common), nodes) {
        common = farthest(side, common, clearance(side, nodes, grid));
    }

    vec![from, with_axis(from, side, common), with_axis(to, side, common), to]
}

fn z_path(from: Position, to: Position, orientation: Orientation) -> Vec<Position> {
    match orientation {
        Orientation::Horizontal => {
            let mid_x = from.x + (to.x - from.x) / 2.0;
            vec![from, Position::new(mid_x, from.y), Position::new(mid_x, to.y), to]
        }
        Orientation::Vertical => {
            let mid_y = from.y + (to.y - from.y) / 2.0;
            vec![from, Position::new(from.x, mid_y), Position::new(to.x, mid_y), to]
        }
    }
}

/// Axis coordinate one grid cell outside the combined box of both nodes on `side`.
fn clearance(side: Side, nodes: &[BBox; 2], grid: &Grid) -> f64 {
    let combined = combine_bboxes(nodes).unwrap_or(nodes[0]);
    grid.round(combined.side_coordinate(side) + side.direction() * grid.resolution)
}

fn farthest(side: Side, a: f64, b: f64) -> f64 {
    if side.direction() > 0.0 {
        a.max(b)
    } else {
        a.min(b)
    }
}

fn with_axis(pos: Position, side: Side, value: f64) -> Position {
    match side.orientation() {
        Orientation::Horizontal => Position::new(value, pos.y),
        Orientation::Vertical => Position::new(pos.x, value),
    }
}

/// True if the axis-aligned segment `a`-`b` passes through the interior of a node.
fn crosses_any(a: &Position, b: &Position, nodes: &[BBox]) -> bool {
    nodes.iter().any(|bbox| {
        a.x.max(b.x) > bbox.min_x
            && a.x.min(b.x) < bbox.max_x
            && a.y.max(b.y) > bbox.min_y
            && a.y.min(b.y) < bbox.max_y
    })
}

/// The bend itself for odd-length paths, the middle of the middle segment otherwise.
fn label_anchor(waypoints: &[Position]) -> Position {
    let n = waypoints.len();
    match n {
        0 => Position::default(),
        _ if n % 2 == 1 => waypoints[n / 2],
        _ => waypoints[n / 2 - 1].midpoint(&waypoints[n / 2]),
    }
}
