use std::cmp::{Ordering, Reverse};
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use priority_queue::PriorityQueue;
use tracing::{debug, trace};

use crate::config::RouterConfig;
use crate::geometry::{inside_bbox, move_in_direction, BBox};
use crate::path::CurvePath;

use super::grid::{Grid, GridCell, Neighborhood};
use super::obstacles::ObstacleIndex;
use super::types::{PathResult, RouteRequest};

/// Total-ordered wrapper so costs can be used as queue priorities.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Index into the search arena. Ids are handed out in discovery order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct NodeId(usize);

#[derive(Clone, Debug)]
struct SearchNode {
    cell: GridCell,
    g_cost: f64,
    h_cost: f64,
    f_cost: f64,
    parent: Option<NodeId>,
    closed: bool,
}

/// Search nodes of a single A* invocation, addressed by [`NodeId`].
#[derive(Default)]
struct SearchArena {
    nodes: Vec<SearchNode>,
    by_cell: HashMap<GridCell, NodeId>,
}

impl SearchArena {
    fn node_for(&mut self, cell: GridCell) -> NodeId {
        if let Some(id) = self.by_cell.get(&cell) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            cell,
            g_cost: f64::INFINITY,
            h_cost: 0.0,
            f_cost: f64::INFINITY,
            parent: None,
            closed: false,
        });
        self.by_cell.insert(cell, id);
        id
    }

    fn path_to(&self, goal: NodeId) -> Vec<GridCell> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            path.push(node.cell);
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

/// Lowest f-cost first; equal f-costs pop in discovery order.
type OpenPriority = (Reverse<Cost>, Reverse<NodeId>);

fn open_priority(node: &SearchNode, id: NodeId) -> OpenPriority {
    (Reverse(Cost(node.f_cost)), Reverse(id))
}

/// A* over the implicit grid from `start` to `end`.
///
/// Cells strictly inside an obstacle are never entered. Cells on an obstacle
/// boundary may be entered but are not expanded further, except for `start`.
/// The heuristic is the Manhattan distance in cells, also when diagonal steps
/// are allowed. Returns `None` when the open list runs dry or `time_budget`
/// is exhausted.
pub(crate) fn find_grid_path(
    grid: &Grid,
    obstacles: &ObstacleIndex,
    start: GridCell,
    end: GridCell,
    neighborhood: Neighborhood,
    time_budget: Duration,
) -> Option<Vec<GridCell>> {
    let started = Instant::now();

    let mut arena = SearchArena::default();
    let mut open_set: PriorityQueue<NodeId, OpenPriority> = PriorityQueue::new();

    let start_id = arena.node_for(start);
    {
        let node = &mut arena.nodes[start_id.0];
        node.g_cost = 0.0;
        node.h_cost = start.manhattan_distance(&end);
        node.f_cost = node.h_cost;
        open_set.push(start_id, open_priority(node, start_id));
    }

    loop {
        if started.elapsed() >= time_budget {
            debug!(expanded = arena.nodes.len(), ?time_budget, "grid search timed out");
            return None;
        }

        let Some((current_id, _)) = open_set.pop() else {
            break;
        };

        let (current_cell, current_g) = {
            let current = &mut arena.nodes[current_id.0];
            current.closed = true;
            (current.cell, current.g_cost)
        };

        if current_cell == end {
            let path = arena.path_to(current_id);
            debug!(cells = path.len(), discovered = arena.nodes.len(), "grid search reached goal");
            return Some(path);
        }

        if current_cell != start && obstacles.touches(grid.cell_position(current_cell)) {
            continue;
        }

        for &(dx, dy, step_cost) in neighborhood.steps() {
            let neighbor_cell = current_cell.offset(dx, dy);
            if obstacles.strictly_contains(grid.cell_position(neighbor_cell)) {
                continue;
            }

            let neighbor_id = arena.node_for(neighbor_cell);
            let is_open = open_set.get(&neighbor_id).is_some();
            let tentative_g = current_g + step_cost;

            let neighbor = &mut arena.nodes[neighbor_id.0];
            if neighbor.closed || (is_open && tentative_g >= neighbor.g_cost) {
                continue;
            }

            neighbor.g_cost = tentative_g;
            neighbor.h_cost = neighbor_cell.manhattan_distance(&end);
            neighbor.f_cost = neighbor.g_cost + neighbor.h_cost;
            neighbor.parent = Some(current_id);

            let priority = open_priority(neighbor, neighbor_id);
            if is_open {
                open_set.change_priority(&neighbor_id, priority);
            } else {
                open_set.push(neighbor_id, priority);
            }
        }
    }

    debug!(discovered = arena.nodes.len(), "grid search exhausted the open list");
    None
}

/// Grid-search strategy: obstacle filtering, margin offset and snapping,
/// search, then curve post-processing.
pub(crate) fn route_astar(request: &RouteRequest, obstacles: &[BBox], config: &RouterConfig) -> Option<PathResult> {
    let grid = Grid::new(config.grid_resolution);

    // A node that already contains an endpoint would make the search unsolvable at its boundary.
    let obstacle_index = ObstacleIndex::new(
        obstacles
            .iter()
            .filter(|bbox| !inside_bbox(&request.from_pos, *bbox, true) && !inside_bbox(&request.to_pos, *bbox, true))
            .copied(),
    );
    trace!(
        given = obstacles.len(),
        kept = obstacle_index.len(),
        "grid search obstacles"
    );

    let start = grid.snap_to_cell(
        move_in_direction(request.from_pos, request.from_side, config.endpoint_margin),
        request.from_side,
    );
    let end = grid.snap_to_cell(
        move_in_direction(request.to_pos, request.to_side, config.endpoint_margin),
        request.to_side,
    );

    if obstacle_index.strictly_contains(grid.cell_position(start))
        || obstacle_index.strictly_contains(grid.cell_position(end))
    {
        debug!(?start, ?end, "grid search start or end lies inside an obstacle");
        return None;
    }

    let cells = find_grid_path(
        &grid,
        &obstacle_index,
        start,
        end,
        Neighborhood::from_allow_diagonal(config.allow_diagonal),
        config.search_time_budget(),
    )?;

    let mut waypoints = Vec::with_capacity(cells.len() + 2);
    waypoints.push(request.from_pos);
    waypoints.extend(cells.into_iter().map(|cell| grid.cell_position(cell)));
    waypoints.push(request.to_pos);

    let svg_path = match (config.round_corners, config.allow_diagonal) {
        (true, true) => CurvePath::smooth(&waypoints, config.spline_tension),
        (true, false) => CurvePath::rounded_polyline(&waypoints, config.corner_radius),
        (false, _) => CurvePath::polyline(&waypoints),
    };
    let center = waypoints[waypoints.len() / 2];

    Some(PathResult::new(waypoints, svg_path, center, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i64, y: i64) -> GridCell {
        GridCell { x, y }
    }

    const BUDGET: Duration = Duration::from_secs(5);

    #[test]
    fn straight_corridor_is_shortest() {
        let grid = Grid::new(10.0);
        let obstacles = ObstacleIndex::new(Vec::new());
        let path = find_grid_path(&grid, &obstacles, cell(0, 0), cell(5, 0), Neighborhood::Orthogonal, BUDGET).unwrap();
        assert_eq!(path, (0..=5).map(|x| cell(x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn start_equals_end() {
        let grid = Grid::new(10.0);
        let obstacles = ObstacleIndex::new(Vec::new());
        let path = find_grid_path(&grid, &obstacles, cell(3, 3), cell(3, 3), Neighborhood::Moore, BUDGET).unwrap();
        assert_eq!(path, vec![cell(3, 3)]);
    }

    #[test]
    fn diagonal_steps_cut_the_corner() {
        let grid = Grid::new(10.0);
        let obstacles = ObstacleIndex::new(Vec::new());
        let path = find_grid_path(&grid, &obstacles, cell(0, 0), cell(4, 4), Neighborhood::Moore, BUDGET).unwrap();
        assert_eq!(path, (0..=4).map(|i| cell(i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn walls_are_walked_around() {
        let grid = Grid::new(10.0);
        // Vertical wall strictly covering x=20, y in 0..=40.
        let obstacles = ObstacleIndex::new([BBox::new(15.0, -5.0, 25.0, 45.0)]);
        let path = find_grid_path(&grid, &obstacles, cell(0, 2), cell(4, 2), Neighborhood::Orthogonal, BUDGET).unwrap();
        assert_eq!(path.first(), Some(&cell(0, 2)));
        assert_eq!(path.last(), Some(&cell(4, 2)));
        for step in &path {
            assert!(!obstacles.strictly_contains(grid.cell_position(*step)), "{step:?}");
        }
        for pair in path.windows(2) {
            assert_eq!((pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs(), 1);
        }
    }

    #[test]
    fn enclosed_goal_is_unreachable_within_budget() {
        let grid = Grid::new(10.0);
        // The goal cell sits in a pocket whose only neighbors are strictly inside walls.
        let obstacles = ObstacleIndex::new([
            BBox::new(-5.0, -15.0, 5.0, -5.0),
            BBox::new(5.0, -5.0, 15.0, 5.0),
            BBox::new(-5.0, 5.0, 5.0, 15.0),
            BBox::new(-15.0, -5.0, -5.0, 5.0),
        ]);
        let blocked_neighbors = [cell(0, -1), cell(1, 0), cell(0, 1), cell(-1, 0)];
        for neighbor in blocked_neighbors {
            assert!(obstacles.strictly_contains(grid.cell_position(neighbor)));
        }
        let path = find_grid_path(
            &grid,
            &obstacles,
            cell(10, 0),
            cell(0, 0),
            Neighborhood::Orthogonal,
            Duration::from_millis(20),
        );
        assert_eq!(path, None);
    }

    #[test]
    fn zero_budget_gives_up_immediately() {
        let grid = Grid::new(10.0);
        let obstacles = ObstacleIndex::new(Vec::new());
        let path = find_grid_path(&grid, &obstacles, cell(0, 0), cell(1, 0), Neighborhood::Orthogonal, Duration::ZERO);
        assert_eq!(path, None);
    }
}
