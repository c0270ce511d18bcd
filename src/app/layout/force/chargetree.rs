use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;
const NO_CELL: u32 = u32::MAX;

#[derive(Clone, Copy)]
struct CellBounds {
    center: Vec2,
    half_extent: f32,
}

impl CellBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: (span * 0.5) + 1.0,
        })
    }

    fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        (right as usize) | ((lower as usize) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let dx = if quadrant & 1 == 1 { quarter } else { -quarter };
        let dy = if quadrant & 2 == 2 { quarter } else { -quarter };
        Self {
            center: self.center + vec2(dx, dy),
            half_extent: quarter,
        }
    }

    fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    fn distance_sq_to_point(self, point: Vec2) -> f32 {
        let dx = ((point.x - self.center.x).abs() - self.half_extent).max(0.0);
        let dy = ((point.y - self.center.y).abs() - self.half_extent).max(0.0);
        (dx * dx) + (dy * dy)
    }
}

struct ChargeCell {
    bounds: CellBounds,
    center_of_charge: Vec2,
    charge: f32,
    children: [u32; 4],
    points: Vec<u32>,
}

impl ChargeCell {
    fn is_leaf(&self) -> bool {
        self.children.iter().all(|&child| child == NO_CELL)
    }
}

/// Barnes-Hut quadtree over node positions, stored as a flat cell arena and
/// walked with an explicit stack. Each point contributes one unit of charge;
/// the engine scales by its configured strength.
pub(super) struct ChargeTree {
    cells: Vec<ChargeCell>,
}

impl ChargeTree {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = CellBounds::from_points(positions)?;
        let mut tree = Self {
            cells: Vec::with_capacity(positions.len() / LEAF_CAPACITY + 1),
        };
        let indices = (0..positions.len() as u32).collect();
        tree.build_cell(bounds, indices, positions, 0);
        Some(tree)
    }

    fn build_cell(
        &mut self,
        bounds: CellBounds,
        indices: Vec<u32>,
        positions: &[Vec2],
        depth: usize,
    ) -> u32 {
        let mut center_of_charge = Vec2::ZERO;
        for &index in &indices {
            center_of_charge += positions[index as usize];
        }
        let charge = indices.len() as f32;
        if charge > 0.0 {
            center_of_charge = center_of_charge / charge;
        }

        let cell_index = self.cells.len() as u32;
        self.cells.push(ChargeCell {
            bounds,
            center_of_charge,
            charge,
            children: [NO_CELL; 4],
            points: Vec::new(),
        });

        if depth >= MAX_DEPTH || indices.len() <= LEAF_CAPACITY {
            self.cells[cell_index as usize].points = indices;
            return cell_index;
        }

        let mut buckets: [Vec<u32>; 4] = Default::default();
        for &index in &indices {
            buckets[bounds.quadrant_for(positions[index as usize])].push(index);
        }

        // All points piled into one quadrant: splitting cannot separate them.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            self.cells[cell_index as usize].points = indices;
            return cell_index;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let child = self.build_cell(bounds.child(quadrant), bucket, positions, depth + 1);
            self.cells[cell_index as usize].children[quadrant] = child;
        }
        cell_index
    }

    /// Visits the charge approximations acting on node `index`: distant
    /// cells collapse to their aggregate `(center_of_charge, charge)`, near
    /// cells decompose down to individual points. `theta` trades accuracy
    /// for fewer visits.
    pub(super) fn for_each_approximation(
        &self,
        index: usize,
        positions: &[Vec2],
        theta: f32,
        mut apply: impl FnMut(Vec2, f32),
    ) {
        if self.cells.is_empty() {
            return;
        }

        let point = positions[index];
        let mut stack = vec![0u32];
        while let Some(cell_index) = stack.pop() {
            let cell = &self.cells[cell_index as usize];
            if cell.is_leaf() {
                for &other in &cell.points {
                    if other as usize != index {
                        apply(positions[other as usize], 1.0);
                    }
                }
                continue;
            }

            let distance = (point - cell.center_of_charge).length().max(1e-3);
            if !cell.bounds.contains(point) && (cell.bounds.side_length() / distance) < theta {
                apply(cell.center_of_charge, cell.charge);
                continue;
            }

            for &child in &cell.children {
                if child != NO_CELL {
                    stack.push(child);
                }
            }
        }
    }

    /// Visits indices of all points whose cell could lie within `range` of
    /// `point`. Candidates outside the range may be reported; the caller
    /// applies the exact distance test.
    pub(super) fn for_each_within(&self, point: Vec2, range: f32, mut apply: impl FnMut(usize)) {
        if self.cells.is_empty() {
            return;
        }

        let range_sq = range * range;
        let mut stack = vec![0u32];
        while let Some(cell_index) = stack.pop() {
            let cell = &self.cells[cell_index as usize];
            if cell.bounds.distance_sq_to_point(point) > range_sq {
                continue;
            }

            if cell.is_leaf() {
                for &other in &cell.points {
                    apply(other as usize);
                }
                continue;
            }

            for &child in &cell.children {
                if child != NO_CELL {
                    stack.push(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> Vec<Vec2> {
        (0..32)
            .map(|index| {
                let angle = index as f32 * 0.61;
                vec2(angle.cos() * 50.0, angle.sin() * 50.0)
            })
            .collect()
    }

    #[test]
    fn empty_input_builds_no_tree() {
        assert!(ChargeTree::build(&[]).is_none());
    }

    #[test]
    fn aggregate_charge_accounts_for_every_other_point() {
        let positions = cluster();
        let tree = ChargeTree::build(&positions).unwrap();

        let mut total = 0.0;
        tree.for_each_approximation(0, &positions, 0.9, |_, charge| total += charge);
        assert!((total - (positions.len() as f32 - 1.0)).abs() < 1e-3);
    }

    #[test]
    fn zero_theta_degenerates_to_exact_pairs() {
        let positions = cluster();
        let tree = ChargeTree::build(&positions).unwrap();

        let mut visits = 0usize;
        tree.for_each_approximation(3, &positions, 0.0, |_, charge| {
            assert_eq!(charge, 1.0);
            visits += 1;
        });
        assert_eq!(visits, positions.len() - 1);
    }

    #[test]
    fn range_query_reports_near_cells_and_prunes_far_ones() {
        // Two clusters far apart, large enough to force subdivision.
        let mut positions = Vec::new();
        for index in 0..12 {
            let angle = index as f32 * 0.524;
            positions.push(vec2(angle.cos() * 8.0, angle.sin() * 8.0));
        }
        for index in 0..12 {
            let angle = index as f32 * 0.524;
            positions.push(vec2(1000.0 + angle.cos() * 8.0, 1000.0 + angle.sin() * 8.0));
        }
        let tree = ChargeTree::build(&positions).unwrap();

        let mut found = Vec::new();
        tree.for_each_within(vec2(0.0, 0.0), 50.0, |index| found.push(index));
        found.sort_unstable();

        for near in 0..12 {
            assert!(found.contains(&near));
        }
        for far in 12..24 {
            assert!(!found.contains(&far));
        }
    }

    #[test]
    fn coincident_points_do_not_recurse_forever() {
        let positions = vec![vec2(5.0, 5.0); 40];
        let tree = ChargeTree::build(&positions).unwrap();

        let mut visits = 0usize;
        tree.for_each_approximation(0, &positions, 0.9, |_, _| visits += 1);
        assert_eq!(visits, positions.len() - 1);
    }
}
