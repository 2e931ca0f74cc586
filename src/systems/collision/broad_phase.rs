//! Uniform grid broad phase
//!
//! Collidable particles are binned into square cells slightly larger than
//! the largest particle diameter, so any overlapping pair sits in the same or
//! in adjacent cells. Positions outside the binned extent clamp to the edge
//! cells, which keeps adjacent particles adjacent.
//!
//! The grid is live during a resolution pass: the resolver moves particles
//! to their new cell as corrections push them around, and queries the 3x3
//! neighbourhood of a particle's *current* cell. Scratch memory is linear in
//! the particle count, however tightly the particles bunch up.

use crate::core::Vec2;
use crate::domain::VerletParticle;

/// Smallest cell edge; guards against all-zero radii
const MIN_CELL_SIZE: f32 = 1.0e-3;

/// Cells are this much wider than the largest diameter so float rounding in
/// the cell lookup can never split an overlapping pair two cells apart
const CELL_MARGIN: f32 = 1.0e-3;

/// Cell budget per binned particle before the cell size is doubled
const CELLS_PER_PARTICLE: usize = 4;

/// `cell_of` entry for particles that are not binned
const UNBINNED: u32 = u32::MAX;

#[derive(Default)]
pub struct UniformGrid {
    cell_size: f32,
    origin_x: f32,
    origin_y: f32,
    cells_x: usize,
    cells_y: usize,
    /// Cell of every particle, `UNBINNED` for non-collidable ones
    cell_of: Vec<u32>,
    /// Particle indices per cell, unordered
    cells: Vec<Vec<u32>>,
    binned: usize,
}

impl UniformGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cells_x, self.cells_y)
    }

    pub fn cell_count(&self) -> usize {
        self.cells_x * self.cells_y
    }

    /// Number of collidable particles in the grid
    pub fn len(&self) -> usize {
        self.binned
    }

    pub fn is_empty(&self) -> bool {
        self.binned == 0
    }

    /// Re-bin all collidable particles at their current positions
    pub fn rebuild<P: VerletParticle>(&mut self, particles: &[P]) {
        let mut max_radius = 0.0f32;
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        self.binned = 0;

        for p in particles.iter().filter(|p| p.collidable()) {
            self.binned += 1;
            max_radius = max_radius.max(p.radius());
            let pos = p.position();
            if pos.is_finite() {
                min_x = min_x.min(pos.x);
                min_y = min_y.min(pos.y);
                max_x = max_x.max(pos.x);
                max_y = max_y.max(pos.y);
            }
        }

        if !min_x.is_finite() {
            // nothing binned, or no finite position
            min_x = 0.0;
            min_y = 0.0;
            max_x = 0.0;
            max_y = 0.0;
        }

        self.origin_x = min_x;
        self.origin_y = min_y;
        self.cell_size = (2.0 * max_radius * (1.0 + CELL_MARGIN)).max(MIN_CELL_SIZE);

        let extent_x = (max_x - min_x).max(0.0);
        let extent_y = (max_y - min_y).max(0.0);
        let budget = (self.binned * CELLS_PER_PARTICLE).max(16);
        loop {
            // f64 keeps huge extents from saturating before the budget check
            let cx = (extent_x as f64 / self.cell_size as f64).floor() + 1.0;
            let cy = (extent_y as f64 / self.cell_size as f64).floor() + 1.0;
            if cx * cy <= budget as f64 {
                self.cells_x = cx as usize;
                self.cells_y = cy as usize;
                break;
            }
            self.cell_size *= 2.0;
        }

        // Buckets keep their capacity between rebuilds
        let cell_count = self.cell_count();
        self.cells.truncate(cell_count);
        for bucket in self.cells.iter_mut() {
            bucket.clear();
        }
        self.cells.resize_with(cell_count, Vec::new);

        self.cell_of.clear();
        self.cell_of.resize(particles.len(), UNBINNED);
        for (i, p) in particles.iter().enumerate() {
            if !p.collidable() {
                continue;
            }
            let cell = self.cell_index(p.position().x, p.position().y);
            fast!(self.cell_of, [i] = cell as u32);
            self.cells[cell].push(i as u32);
        }
    }

    #[inline]
    fn cell_coords(&self, x: f32, y: f32) -> (usize, usize) {
        // `as` saturates and maps NaN to 0
        let cx = ((x as f64 - self.origin_x as f64) / self.cell_size as f64).floor() as i64;
        let cy = ((y as f64 - self.origin_y as f64) / self.cell_size as f64).floor() as i64;
        (
            cx.clamp(0, self.cells_x as i64 - 1) as usize,
            cy.clamp(0, self.cells_y as i64 - 1) as usize,
        )
    }

    #[inline]
    fn cell_index(&self, x: f32, y: f32) -> usize {
        let (cx, cy) = self.cell_coords(x, y);
        cy * self.cells_x + cx
    }

    /// Move particle `i` to the cell under `position`.
    /// Returns true if it changed cell. Unbinned particles are ignored.
    pub fn relocate(&mut self, i: usize, position: Vec2) -> bool {
        let Some(&old) = self.cell_of.get(i) else {
            return false;
        };
        if old == UNBINNED {
            return false;
        }
        let new = self.cell_index(position.x, position.y);
        if new == old as usize {
            return false;
        }

        let bucket = &mut self.cells[old as usize];
        if let Some(slot) = bucket.iter().position(|&k| k as usize == i) {
            bucket.swap_remove(slot);
        }
        self.cells[new].push(i as u32);
        fast!(self.cell_of, [i] = new as u32);
        true
    }

    /// Fill `out` with every binned index `> after` in the 3x3 neighbourhood
    /// of `position`, sorted ascending
    pub fn neighbours(&self, position: Vec2, after: usize, out: &mut Vec<u32>) {
        out.clear();
        if self.cells.is_empty() {
            return;
        }

        let (cx, cy) = self.cell_coords(position.x, position.y);
        let x0 = cx.saturating_sub(1);
        let y0 = cy.saturating_sub(1);
        let x1 = (cx + 1).min(self.cells_x - 1);
        let y1 = (cy + 1).min(self.cells_y - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let bucket = fast!(self.cells, [y * self.cells_x + x]);
                out.extend(bucket.iter().copied().filter(|&k| k as usize > after));
            }
        }
        out.sort_unstable();
    }
}
