use std::f64::consts::SQRT_2;

use crate::geometry::{Position, Side};

/// A cell of the implicit, unbounded search grid, addressed by integer
/// coordinates. The cell's canvas position is `coordinate * resolution`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug)]
pub(crate) struct GridCell {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Neighborhood {
    Orthogonal,
    Moore,
}

impl Neighborhood {
    pub(crate) fn from_allow_diagonal(allow_diagonal: bool) -> Self {
        if allow_diagonal {
            Neighborhood::Moore
        } else {
            Neighborhood::Orthogonal
        }
    }

    /// Neighbor offsets with their step cost: N, E, S, W, then NE, SE, SW, NW.
    pub(crate) fn steps(&self) -> &'static [(i64, i64, f64)] {
        const ORTHOGONAL: [(i64, i64, f64); 4] = [(0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0)];
        const MOORE: [(i64, i64, f64); 8] = [
            (0, -1, 1.0),
            (1, 0, 1.0),
            (0, 1, 1.0),
            (-1, 0, 1.0),
            (1, -1, SQRT_2),
            (1, 1, SQRT_2),
            (-1, 1, SQRT_2),
            (-1, -1, SQRT_2),
        ];
        match self {
            Neighborhood::Orthogonal => &ORTHOGONAL,
            Neighborhood::Moore => &MOORE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Grid {
    pub resolution: f64,
}

impl Grid {
    pub(crate) fn new(resolution: f64) -> Self {
        Grid { resolution }
    }

    /// Floors `pos` onto the grid, then moves one cell further along the axis
    /// of a `Right`/`Bottom` side so the cell lies outside the owning node.
    pub(crate) fn snap_to_cell(&self, pos: Position, side: Side) -> GridCell {
        let mut cell = GridCell {
            x: (pos.x / self.resolution).floor() as i64,
            y: (pos.y / self.resolution).floor() as i64,
        };
        match side {
            Side::Right => cell.x += 1,
            Side::Bottom => cell.y += 1,
            Side::Top | Side::Left => {}
        }
        cell
    }

    pub(crate) fn cell_position(&self, cell: GridCell) -> Position {
        Position::new(cell.x as f64 * self.resolution, cell.y as f64 * self.resolution)
    }

    /// Rounds a coordinate to the nearest multiple of the resolution.
    pub(crate) fn round(&self, value: f64) -> f64 {
        (value / self.resolution).round() * self.resolution
    }
}

impl GridCell {
    pub(crate) fn offset(&self, dx: i64, dy: i64) -> GridCell {
        GridCell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub(crate) fn manhattan_distance(&self, other: &GridCell) -> f64 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as f64
    }
}
