//! Terrain height fields
//!
//! The simulation only ever asks one question of the ground: how high is it
//! under (x, z)? Hosts usually answer from their own elevation map; the grid
//! here covers headless runs and tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Read-only ground elevation query
pub trait Terrain {
    fn height(&self, x: f32, z: f32) -> f32;
}

impl<F> Terrain for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Level ground at a fixed elevation
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain(pub f32);

impl Terrain for FlatTerrain {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

/// Regular grid of elevation samples centered on the origin
///
/// Each cell is split into two triangles along its diagonal and sampled with
/// barycentric interpolation, so the surface is continuous and matches a mesh
/// built from the same samples. Queries outside the map clamp to the border.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    width: f32,
    depth: f32,
    cols: usize,
    rows: usize,
    /// Row-major, `rows` rows of `cols` samples; row 0 is at z = -depth/2
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Build from explicit samples. Needs at least 2x2 samples.
    pub fn from_samples(
        width: f32,
        depth: f32,
        cols: usize,
        rows: usize,
        heights: Vec<f32>,
    ) -> Option<Self> {
        if cols < 2 || rows < 2 || heights.len() != cols * rows {
            return None;
        }
        if width <= 0.0 || depth <= 0.0 {
            return None;
        }
        Some(Self {
            width,
            depth,
            cols,
            rows,
            heights,
        })
    }

    /// Deterministic rolling hills in [0, height] over a square map
    pub fn procedural(seed: u64, size: f32, height: f32, divisions: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let n = divisions.max(1) + 1;

        // Three overlapping wave trains with random phase and frequency
        let waves: Vec<(f32, f32, f32)> = (0..3)
            .map(|_| {
                (
                    rng.random_range(0.5..2.5),
                    rng.random_range(0.5..2.5),
                    rng.random_range(0.0..std::f32::consts::TAU),
                )
            })
            .collect();

        let mut heights = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let u = col as f32 / (n - 1) as f32 * std::f32::consts::TAU;
                let v = row as f32 / (n - 1) as f32 * std::f32::consts::TAU;
                let sum: f32 = waves
                    .iter()
                    .map(|&(fu, fv, phase)| (u * fu + phase).sin() * (v * fv + phase).cos())
                    .sum();
                // sum is in [-3, 3]
                heights.push((sum / 6.0 + 0.5) * height);
            }
        }

        Self {
            width: size,
            depth: size,
            cols: n,
            rows: n,
            heights,
        }
    }

    #[inline]
    fn sample(&self, col: usize, row: usize) -> f32 {
        self.heights[row * self.cols + col]
    }
}

impl Terrain for HeightGrid {
    fn height(&self, x: f32, z: f32) -> f32 {
        let max_col = (self.cols - 1) as f32;
        let max_row = (self.rows - 1) as f32;

        let gx = ((x / self.width + 0.5) * max_col).clamp(0.0, max_col);
        let gz = ((z / self.depth + 0.5) * max_row).clamp(0.0, max_row);

        let col = (gx.floor() as usize).min(self.cols - 2);
        let row = (gz.floor() as usize).min(self.rows - 2);
        let fx = gx - col as f32;
        let fz = gz - row as f32;

        let h00 = self.sample(col, row);
        let h10 = self.sample(col + 1, row);
        let h01 = self.sample(col, row + 1);
        let h11 = self.sample(col + 1, row + 1);

        if fx + fz <= 1.0 {
            h00 + (h10 - h00) * fx + (h01 - h00) * fz
        } else {
            h11 + (h01 - h11) * (1.0 - fx) + (h10 - h11) * (1.0 - fz)
        }
    }
}
