use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Anything that can be tested for containment inside a [`BBox`].
pub trait Containable {
    fn inside_bbox(&self, bbox: &BBox, can_touch_edge: bool) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let x_diff = self.x - other.x;
        let y_diff = self.y - other.y;
        (x_diff.powi(2) + y_diff.powi(2)).sqrt()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, factor: f64) -> Position {
        Position {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Div<f64> for Position {
    type Output = Position;

    fn div(self, divisor: f64) -> Position {
        Position {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

impl Containable for Position {
    fn inside_bbox(&self, bbox: &BBox, can_touch_edge: bool) -> bool {
        if can_touch_edge {
            self.x >= bbox.min_x && self.x <= bbox.max_x && self.y >= bbox.min_y && self.y <= bbox.max_y
        } else {
            self.x > bbox.min_x && self.x < bbox.max_x && self.y > bbox.min_y && self.y < bbox.max_y
        }
    }
}

/// Axis-aligned rectangle. `min_x <= max_x` and `min_y <= max_y` are assumed, not checked.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    /// Midpoint of the edge named by `side`.
    pub fn side_center(&self, side: Side) -> Position {
        let center = self.center();
        match side {
            Side::Top => Position::new(center.x, self.min_y),
            Side::Right => Position::new(self.max_x, center.y),
            Side::Bottom => Position::new(center.x, self.max_y),
            Side::Left => Position::new(self.min_x, center.y),
        }
    }

    /// Coordinate of the edge named by `side` along that side's axis.
    pub fn side_coordinate(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.min_y,
            Side::Right => self.max_x,
            Side::Bottom => self.max_y,
            Side::Left => self.min_x,
        }
    }
}

impl Containable for BBox {
    fn inside_bbox(&self, bbox: &BBox, can_touch_edge: bool) -> bool {
        if can_touch_edge {
            self.min_x >= bbox.min_x
                && self.max_x <= bbox.max_x
                && self.min_y >= bbox.min_y
                && self.max_y <= bbox.max_y
        } else {
            self.min_x > bbox.min_x && self.max_x < bbox.max_x && self.min_y > bbox.min_y && self.max_y < bbox.max_y
        }
    }
}

pub fn inside_bbox<T: Containable + ?Sized>(item: &T, bbox: &BBox, can_touch_edge: bool) -> bool {
    item.inside_bbox(bbox, can_touch_edge)
}

/// Inclusive overlap test on both axes.
pub fn is_colliding(a: &BBox, b: &BBox) -> bool {
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
}

pub fn combine_bboxes(bboxes: &[BBox]) -> Option<BBox> {
    let (first, rest) = bboxes.split_first()?;
    Some(rest.iter().fold(*first, |acc, bbox| BBox {
        min_x: acc.min_x.min(bbox.min_x),
        min_y: acc.min_y.min(bbox.min_y),
        max_x: acc.max_x.max(bbox.max_x),
        max_y: acc.max_y.max(bbox.max_y),
    }))
}

/// Grows (or shrinks, for `factor < 1`) the box symmetrically around its center.
pub fn scale_bbox(bbox: &BBox, factor: f64) -> BBox {
    let dx = bbox.width() * (factor - 1.0) / 2.0;
    let dy = bbox.height() * (factor - 1.0) / 2.0;
    BBox {
        min_x: bbox.min_x - dx,
        min_y: bbox.min_y - dy,
        max_x: bbox.max_x + dx,
        max_y: bbox.max_y + dy,
    }
}

pub fn move_in_direction(pos: Position, side: Side, distance: f64) -> Position {
    pos + side.vector() * distance
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// `Left`/`Right` are horizontal, `Top`/`Bottom` vertical.
    pub fn orientation(&self) -> Orientation {
        match self {
            Side::Left | Side::Right => Orientation::Horizontal,
            Side::Top | Side::Bottom => Orientation::Vertical,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    /// `+1` for sides facing increasing coordinates (`Right`, `Bottom`), `-1` otherwise.
    pub fn direction(&self) -> f64 {
        match self {
            Side::Right | Side::Bottom => 1.0,
            Side::Top | Side::Left => -1.0,
        }
    }

    /// Outward unit vector of the side.
    pub fn vector(&self) -> Position {
        match self {
            Side::Top => Position::new(0.0, -1.0),
            Side::Right => Position::new(1.0, 0.0),
            Side::Bottom => Position::new(0.0, 1.0),
            Side::Left => Position::new(-1.0, 0.0),
        }
    }

    /// The coordinate of `pos` along this side's axis.
    pub(crate) fn axis_coordinate(&self, pos: &Position) -> f64 {
        match self.orientation() {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BBox {
        BBox::new(0.0, 0.0, 100.0, 50.0)
    }

    #[test]
    fn strictly_inside_point_is_inside_both_ways() {
        let p = Position::new(10.0, 10.0);
        assert!(inside_bbox(&p, &unit_box(), false));
        assert!(inside_bbox(&p, &unit_box(), true));
    }

    #[test]
    fn boundary_point_only_inside_when_touching_allowed() {
        for p in [
            Position::new(0.0, 25.0),
            Position::new(100.0, 25.0),
            Position::new(50.0, 0.0),
            Position::new(50.0, 50.0),
            Position::new(100.0, 50.0),
        ] {
            assert!(inside_bbox(&p, &unit_box(), true), "{p:?}");
            assert!(!inside_bbox(&p, &unit_box(), false), "{p:?}");
        }
    }

    #[test]
    fn nested_bbox_requires_full_containment() {
        let outer = unit_box();
        assert!(inside_bbox(&BBox::new(10.0, 10.0, 20.0, 20.0), &outer, false));
        assert!(inside_bbox(&BBox::new(0.0, 10.0, 20.0, 20.0), &outer, true));
        assert!(!inside_bbox(&BBox::new(0.0, 10.0, 20.0, 20.0), &outer, false));
        assert!(!inside_bbox(&BBox::new(90.0, 10.0, 120.0, 20.0), &outer, true));
    }

    #[test]
    fn collision_is_inclusive() {
        let a = unit_box();
        assert!(is_colliding(&a, &BBox::new(100.0, 50.0, 120.0, 70.0)));
        assert!(is_colliding(&a, &BBox::new(-10.0, -10.0, 5.0, 5.0)));
        assert!(!is_colliding(&a, &BBox::new(100.5, 0.0, 120.0, 10.0)));
        assert!(!is_colliding(&a, &BBox::new(0.0, 51.0, 10.0, 60.0)));
    }

    #[test]
    fn combine_and_scale() {
        assert_eq!(combine_bboxes(&[]), None);
        let combined = combine_bboxes(&[unit_box(), BBox::new(-20.0, 30.0, 10.0, 80.0)]);
        assert_eq!(combined, Some(BBox::new(-20.0, 0.0, 100.0, 80.0)));

        let scaled = scale_bbox(&unit_box(), 2.0);
        assert_eq!(scaled, BBox::new(-50.0, -25.0, 150.0, 75.0));
        assert_eq!(scale_bbox(&unit_box(), 1.0), unit_box());
    }

    #[test]
    fn side_lookups() {
        let bbox = unit_box();
        assert_eq!(bbox.side_center(Side::Top), Position::new(50.0, 0.0));
        assert_eq!(bbox.side_center(Side::Right), Position::new(100.0, 25.0));
        assert_eq!(bbox.side_center(Side::Bottom), Position::new(50.0, 50.0));
        assert_eq!(bbox.side_center(Side::Left), Position::new(0.0, 25.0));

        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert!(Side::Left.is_horizontal());
        assert!(!Side::Bottom.is_horizontal());
        assert_eq!(Side::Bottom.direction(), 1.0);
        assert_eq!(Side::Left.direction(), -1.0);
    }

    #[test]
    fn distance_and_midpoint() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(30.0, 40.0);
        assert_eq!(a.distance(&b), 50.0);
        assert_eq!(b.distance(&a), 50.0);
        assert_eq!(a.midpoint(&b), Position::new(15.0, 20.0));
    }

    #[test]
    fn move_in_direction_offsets_outward() {
        let origin = Position::new(5.0, 5.0);
        assert_eq!(move_in_direction(origin, Side::Right, 10.0), Position::new(15.0, 5.0));
        assert_eq!(move_in_direction(origin, Side::Top, 10.0), Position::new(5.0, -5.0));
        assert_eq!(move_in_direction(origin, Side::Left, 10.0), Position::new(-5.0, 5.0));
        assert_eq!(move_in_direction(origin, Side::Bottom, 10.0), Position::new(5.0, 15.0));
    }
}
