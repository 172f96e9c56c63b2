//! Neighbor discovery.
//!
//! The contract is the same for every implementation: return the ids of all
//! *other* agents whose Euclidean distance to the origin's position is within
//! the radius (inclusive), sorted ascending. The origin is excluded by id,
//! never by position, since two agents can coincide exactly.

use crate::boid::Boid;
use crate::config::Viewport;

/// Brute-force O(n) scan. An axis-aligned box pre-check rejects most
/// far-away candidates before the exact distance test; the box is only a
/// prefilter, the inclusive circle test decides membership.
pub fn neighbors_of(boids: &[Boid], origin: &Boid, radius: f32) -> Vec<u32> {
    let mut ids = Vec::new();
    for other in boids {
        if other.id == origin.id {
            continue;
        }
        let dx = other.position.x - origin.position.x;
        let dy = other.position.y - origin.position.y;
        if dx.abs() > radius || dy.abs() > radius {
            continue;
        }
        if origin.position.distance(&other.position) <= radius {
            ids.push(other.id);
        }
    }
    ids.sort_unstable();
    ids
}

/// Uniform spatial grid, rebuilt once per tick. Agents are bucketed by cell;
/// a query scans just the cells overlapping the search box.
///
/// Cell size should be about the detection radius so the common query touches
/// a 3x3 neighborhood, but correctness does not depend on it: the scanned
/// cell range always covers the full radius.
pub struct UniformGrid {
    cell: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
}

impl UniformGrid {
    pub fn build(boids: &[Boid], cell_size: f32, viewport: Viewport) -> Self {
        // A degenerate cell size collapses the grid to a single bucket,
        // which is just the brute-force scan.
        let cell = if cell_size > 0.0 {
            cell_size
        } else {
            viewport.width.max(viewport.height)
        };
        let cols = ((viewport.width / cell).ceil() as usize).max(1);
        let rows = ((viewport.height / cell).ceil() as usize).max(1);
        let mut grid = Self {
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        };
        for (index, boid) in boids.iter().enumerate() {
            let (cx, cy) = grid.cell_of(boid.position.x, boid.position.y);
            grid.buckets[cy * cols + cx].push(index);
        }
        grid
    }

    fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        let cx = ((x / self.cell) as isize).clamp(0, self.cols as isize - 1) as usize;
        let cy = ((y / self.cell) as isize).clamp(0, self.rows as isize - 1) as usize;
        (cx, cy)
    }

    pub fn neighbors_of(&self, boids: &[Boid], origin: &Boid, radius: f32) -> Vec<u32> {
        let (x0, y0) = self.cell_of(origin.position.x - radius, origin.position.y - radius);
        let (x1, y1) = self.cell_of(origin.position.x + radius, origin.position.y + radius);

        let mut ids = Vec::new();
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                for &index in &self.buckets[cy * self.cols + cx] {
                    let other = &boids[index];
                    if other.id == origin.id {
                        continue;
                    }
                    if origin.position.distance(&other.position) <= radius {
                        ids.push(other.id);
                    }
                }
            }
        }
        ids.sort_unstable();
        ids
    }
}
