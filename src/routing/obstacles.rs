use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};

use crate::geometry::{inside_bbox, BBox, Position};

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Obstacle {
    pub bbox: BBox,
}

impl RTreeObject for Obstacle {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.min_x, self.bbox.min_y], [self.bbox.max_x, self.bbox.max_y])
    }
}

/// Selects the obstacles whose envelope contains a point, boundary included.
struct ContainingPoint {
    point: [f64; 2],
}

impl SelectionFunction<Obstacle> for ContainingPoint {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        envelope.contains_point(&self.point)
    }

    fn should_unpack_leaf(&self, leaf: &Obstacle) -> bool {
        leaf.envelope().contains_point(&self.point)
    }
}

/// Spatial index over the obstacle boxes of a single search.
pub(crate) struct ObstacleIndex {
    tree: RTree<Obstacle>,
}

impl ObstacleIndex {
    pub(crate) fn new(bboxes: impl IntoIterator<Item = BBox>) -> Self {
        let obstacles = bboxes.into_iter().map(|bbox| Obstacle { bbox }).collect();
        ObstacleIndex {
            tree: RTree::bulk_load(obstacles),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.size()
    }

    fn candidates(&self, pos: Position) -> impl Iterator<Item = &Obstacle> {
        self.tree
            .locate_with_selection_function(ContainingPoint { point: [pos.x, pos.y] })
    }

    /// True if `pos` lies on or inside any obstacle.
    pub(crate) fn touches(&self, pos: Position) -> bool {
        self.candidates(pos).any(|obstacle| inside_bbox(&pos, &obstacle.bbox, true))
    }

    /// True if `pos` lies strictly inside any obstacle.
    pub(crate) fn strictly_contains(&self, pos: Position) -> bool {
        self.candidates(pos).any(|obstacle| inside_bbox(&pos, &obstacle.bbox, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_and_strict_queries() {
        let index = ObstacleIndex::new([BBox::new(80.0, 0.0, 120.0, 100.0), BBox::new(300.0, 300.0, 320.0, 320.0)]);
        assert_eq!(index.len(), 2);

        assert!(index.touches(Position::new(80.0, 40.0)));
        assert!(!index.strictly_contains(Position::new(80.0, 40.0)));
        assert!(index.strictly_contains(Position::new(100.0, 40.0)));
        assert!(index.strictly_contains(Position::new(310.0, 310.0)));
        assert!(!index.touches(Position::new(60.0, 40.0)));
        assert!(!index.touches(Position::new(200.0, 200.0)));
    }

    #[test]
    fn empty_index_blocks_nothing() {
        let index = ObstacleIndex::new(Vec::new());
        assert!(!index.touches(Position::new(0.0, 0.0)));
        assert!(!index.strictly_contains(Position::new(0.0, 0.0)));
    }
}
