//! Renderable curve descriptions built from waypoint sequences.
//!
//! A [`CurvePath`] is an ordered list of drawing commands that renders to an
//! SVG `d` attribute through its `Display` implementation. Three builders cover
//! the routed output:
//!
//! - [`CurvePath::polyline`]: straight segments through every waypoint.
//! - [`CurvePath::rounded_polyline`]: interior corners replaced by quadratic
//!   curves trimmed `radius` units along each adjacent segment.
//! - [`CurvePath::smooth`]: a cardinal spline through the waypoints, used for
//!   diagonal grid-search output.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::geometry::Position;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Position),
    LineTo(Position),
    QuadTo { control: Position, to: Position },
    CubicTo { control1: Position, control2: Position, to: Position },
}

impl PathCommand {
    pub fn end_point(&self) -> Position {
        match self {
            PathCommand::MoveTo(to) | PathCommand::LineTo(to) => *to,
            PathCommand::QuadTo { to, .. } | PathCommand::CubicTo { to, .. } => *to,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::QuadTo { control, to } => write!(f, "Q {} {} {} {}", control.x, control.y, to.x, to.y),
            PathCommand::CubicTo { control1, control2, to } => write!(
                f,
                "C {} {} {} {} {} {}",
                control1.x, control1.y, control2.x, control2.y, to.x, to.y
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CurvePath {
    commands: Vec<PathCommand>,
}

impl CurvePath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn start_point(&self) -> Option<Position> {
        self.commands.first().map(PathCommand::end_point)
    }

    pub fn end_point(&self) -> Option<Position> {
        self.commands.last().map(PathCommand::end_point)
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    pub fn polyline(points: &[Position]) -> Self {
        let mut commands = Vec::with_capacity(points.len());
        if let Some((first, rest)) = points.split_first() {
            commands.push(PathCommand::MoveTo(*first));
            commands.extend(rest.iter().map(|p| PathCommand::LineTo(*p)));
        }
        CurvePath { commands }
    }

    /// Polyline whose interior corners are rounded with at most `radius`.
    ///
    /// The effective radius at a corner is clamped to half the length of the
    /// shorter adjacent segment, so short segments never overshoot.
    pub fn rounded_polyline(points: &[Position], radius: f64) -> Self {
        let points = dedup_consecutive(points);
        if points.len() < 3 {
            return CurvePath::polyline(&points);
        }

        let mut commands = Vec::with_capacity(points.len() * 2);
        commands.push(PathCommand::MoveTo(points[0]));

        for window in points.windows(3) {
            let (previous, current, next) = (window[0], window[1], window[2]);
            let incoming = current - previous;
            let outgoing = next - current;
            let incoming_length = current.distance(&previous);
            let outgoing_length = next.distance(&current);

            let effective_radius = radius.min(incoming_length / 2.0).min(outgoing_length / 2.0).max(0.0);
            let trim_in = current - incoming * effective_radius / incoming_length;
            let trim_out = current + outgoing * effective_radius / outgoing_length;

            commands.push(PathCommand::LineTo(trim_in));
            commands.push(PathCommand::QuadTo {
                control: current,
                to: trim_out,
            });
        }

        if let Some(last) = points.last() {
            commands.push(PathCommand::LineTo(*last));
        }
        CurvePath { commands }
    }

    /// Cardinal spline through `points`. `tension = 0` degenerates to straight
    /// segments, `0.5` is a Catmull-Rom curve, larger values loosen the curve.
    pub fn smooth(points: &[Position], tension: f64) -> Self {
        let points = dedup_consecutive(points);
        if points.len() < 3 {
            return CurvePath::polyline(&points);
        }

        let mut commands = Vec::with_capacity(points.len());
        commands.push(PathCommand::MoveTo(points[0]));

        let last_index = points.len() - 1;
        for i in 0..last_index {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last_index)];

            commands.push(PathCommand::CubicTo {
                control1: p1 + (p2 - p0) * (tension / 3.0),
                control2: p2 - (p3 - p1) * (tension / 3.0),
                to: p2,
            });
        }
        CurvePath { commands }
    }
}

impl fmt::Display for CurvePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

impl Serialize for CurvePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn dedup_consecutive(points: &[Position]) -> Vec<Position> {
    let mut result: Vec<Position> = Vec::with_capacity(points.len());
    for point in points {
        if result.last() != Some(point) {
            result.push(*point);
        }
    }
    result
}
