//! Spatial Grid - uniform 3D hash grid for neighbor queries
//!
//! Space is cut into cubes of `cell_size`; each live particle is bucketed by
//! the cube containing its position. A query scans the particle's own cell
//! plus the 26 around it, then filters by exact distance.
//!
//! The grid is rebuilt from scratch every tick. Buckets keep their
//! allocations between ticks so a steady particle count does not allocate.

use std::collections::HashMap;

use crate::core::Vec3;
use crate::domain::particle::Particle;

mod indexing;

pub use indexing::CellKey;

/// Default edge length; must be >= the interaction radius
pub const DEFAULT_CELL_SIZE: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
struct GridEntry {
    index: usize,
    position: Vec3,
}

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<CellKey, Vec<GridEntry>>,
    len: usize,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialGrid {
    /// Non-positive or non-finite sizes fall back to `DEFAULT_CELL_SIZE`
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            log::warn!("invalid grid cell size {}, using {}", cell_size, DEFAULT_CELL_SIZE);
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Particles currently bucketed
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cells holding at least one particle
    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|bucket| !bucket.is_empty()).count()
    }

    #[inline]
    pub fn cell_of(&self, position: Vec3) -> CellKey {
        CellKey::from_position(position, self.inv_cell_size)
    }

    /// Empty every bucket
    pub fn clear(&mut self) {
        // Drop buckets left over from a much larger population
        if self.cells.len() > 4 * self.len.max(64) {
            self.cells.clear();
        } else {
            for bucket in self.cells.values_mut() {
                bucket.clear();
            }
        }
        self.len = 0;
    }

    /// Bucket particle `index` at `position`
    pub fn insert(&mut self, index: usize, position: Vec3) {
        let key = self.cell_of(position);
        self.cells
            .entry(key)
            .or_default()
            .push(GridEntry { index, position });
        self.len += 1;
    }

    /// Clear and repopulate from every live particle
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.clear();
        for (index, p) in particles.iter().enumerate() {
            if !p.is_expired() {
                self.insert(index, p.position);
            }
        }
    }

    /// Indices of bucketed particles within `radius` of `position`, excluding
    /// `index` itself. Results are appended to `out` (cleared first) in
    /// bucket traversal order.
    ///
    /// A radius larger than the cell size widens the scanned block so no
    /// neighbor is missed; once that block would hold more cells than are
    /// occupied, every bucket is scanned instead and the result is sorted.
    pub fn query_neighbors(&self, index: usize, position: Vec3, radius: f32, out: &mut Vec<usize>) {
        out.clear();
        if !(radius >= 0.0) || self.len == 0 {
            return;
        }

        let reach = if radius <= self.cell_size {
            1
        } else {
            (radius * self.inv_cell_size).ceil().min(i32::MAX as f32) as i32
        };
        let radius_sq = radius * radius;

        // More cells in the block than buckets in the map: walk the buckets
        let span = 2 * reach as u64 + 1;
        if reach > 1 && span.saturating_mul(span).saturating_mul(span) > self.cells.len() as u64 {
            for entry in self.cells.values().flatten() {
                if entry.index != index && entry.position.distance_squared(position) <= radius_sq {
                    out.push(entry.index);
                }
            }
            // HashMap order is per-instance
            out.sort_unstable();
            return;
        }

        let center = self.cell_of(position);
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                for dz in -reach..=reach {
                    let Some(key) = center.offset(dx, dy, dz) else {
                        continue;
                    };
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    for entry in bucket {
                        if entry.index != index && entry.position.distance_squared(position) <= radius_sq {
                            out.push(entry.index);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_NONE, EL_SAND};

    fn xorshift32(state: &mut u32) -> u32 {
        let mut x = *state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        *state = x;
        x
    }

    fn brute_force(particles: &[Particle], index: usize, radius: f32) -> Vec<usize> {
        let p = particles[index].position;
        let mut v: Vec<usize> = particles
            .iter()
            .enumerate()
            .filter(|(i, q)| *i != index && !q.is_expired() && q.position.distance_squared(p) <= radius * radius)
            .map(|(i, _)| i)
            .collect();
        v.sort_unstable();
        v
    }

    fn sand(x: f32, y: f32, z: f32) -> Particle {
        Particle::new(EL_SAND, Vec3::new(x, y, z))
    }

    #[test]
    fn matches_brute_force_on_clustered_set() {
        let mut rng = 0x9E37_79B9u32;
        let mut particles = Vec::new();
        for _ in 0..400 {
            let mut coord = || ((xorshift32(&mut rng) % 4000) as f32 / 1000.0) - 2.0;
            particles.push(sand(coord(), coord(), coord()));
        }

        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);
        assert_eq!(grid.len(), particles.len());

        let mut out = Vec::new();
        // 0.6 widens the block walk, 1.2 falls back to scanning buckets
        for radius in [0.1f32, 0.25, 0.5, 0.6, 1.2] {
            for i in 0..particles.len() {
                grid.query_neighbors(i, particles[i].position, radius, &mut out);
                out.sort_unstable();
                assert_eq!(out, brute_force(&particles, i, radius), "particle {} radius {}", i, radius);
            }
        }
    }

    #[test]
    fn finds_neighbors_across_cell_boundaries() {
        // 0.49 and 0.51 live in cells 0 and 1; -0.001 lives in cell -1
        let particles = vec![sand(0.49, 0.0, 0.0), sand(0.51, 0.0, 0.0), sand(-0.001, 0.0, 0.0)];
        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);
        assert_ne!(grid.cell_of(particles[0].position), grid.cell_of(particles[1].position));
        assert_ne!(grid.cell_of(particles[0].position), grid.cell_of(particles[2].position));

        let mut out = Vec::new();
        grid.query_neighbors(0, particles[0].position, 0.5, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn one_and_a_half_cells_apart_with_matching_radius() {
        let cell = 0.5f32;
        let gap = cell * 1.5;
        let particles = vec![sand(0.1, 0.0, 0.0), sand(0.1 + gap, 0.0, 0.0)];
        let mut grid = SpatialGrid::new(cell);
        grid.rebuild(&particles);

        let mut out = Vec::new();
        // Outside the radius: not a neighbor
        grid.query_neighbors(0, particles[0].position, cell, &mut out);
        assert!(out.is_empty());
        // Radius covering the gap widens the scan instead of silently missing
        grid.query_neighbors(0, particles[0].position, gap + 1e-3, &mut out);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn huge_radius_scans_buckets_instead_of_cells() {
        let particles = vec![sand(0.0, 0.0, 0.0), sand(-40.0, 3.0, 900.0), sand(12.5, -7.0, 0.25)];
        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);

        let mut out = Vec::new();
        grid.query_neighbors(2, particles[2].position, 1.0e6, &mut out);
        assert_eq!(out, vec![0, 1]);
        grid.query_neighbors(0, particles[0].position, f32::MAX, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn exact_radius_is_inclusive_and_self_excluded() {
        let particles = vec![sand(0.0, 0.0, 0.0), sand(0.0, 0.5, 0.0)];
        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);
        let mut out = Vec::new();
        grid.query_neighbors(0, particles[0].position, 0.5, &mut out);
        assert_eq!(out, vec![1]);
        grid.query_neighbors(1, particles[1].position, 0.5, &mut out);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn expired_particles_are_not_bucketed() {
        let mut particles = vec![sand(0.0, 0.0, 0.0), sand(0.1, 0.0, 0.0)];
        particles[1].element = EL_NONE;
        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);
        assert_eq!(grid.len(), 1);
        let mut out = Vec::new();
        grid.query_neighbors(0, particles[0].position, 0.5, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn clear_empties_buckets() {
        let particles = vec![sand(0.0, 0.0, 0.0), sand(3.0, 3.0, 3.0)];
        let mut grid = SpatialGrid::new(0.5);
        grid.rebuild(&particles);
        assert_eq!(grid.occupied_cells(), 2);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn invalid_cell_size_uses_default() {
        assert_eq!(SpatialGrid::new(f32::NAN).cell_size(), DEFAULT_CELL_SIZE);
        assert_eq!(SpatialGrid::new(-1.0).cell_size(), DEFAULT_CELL_SIZE);
        assert_eq!(SpatialGrid::new(2.0).cell_size(), 2.0);
    }
}
