//! Particle grid meshes.
//!
//! A glyph is drawn by a jittered grid of particles. Every particle becomes a
//! quad whose four vertices share the particle center; the vertex shader
//! pushes the corners apart by the particle size.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use rand::Rng;

const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// CPU-side particle quads, ready to be turned into a [`Mesh`]
#[derive(Debug, Clone, Default)]
pub struct ParticleGrid {
    pub positions: Vec<[f32; 3]>,
    pub glyph_uvs: Vec<[f32; 2]>,
    pub corners: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl ParticleGrid {
    /// Particles over a `width` x `height` glyph centered on the origin
    pub fn new(
        columns: u32,
        rows: u32,
        width: f32,
        height: f32,
        jitter: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let count = (columns * rows) as usize;
        let jitter = jitter.clamp(0.0, 0.5);

        let mut grid = Self {
            positions: Vec::with_capacity(count * 4),
            glyph_uvs: Vec::with_capacity(count * 4),
            corners: Vec::with_capacity(count * 4),
            indices: Vec::with_capacity(count * 6),
        };

        for row in 0..rows {
            for col in 0..columns {
                let ju = rng.random_range(-jitter..=jitter);
                let jv = rng.random_range(-jitter..=jitter);
                let u = ((col as f32 + 0.5 + ju) / columns as f32).clamp(0.0, 1.0);
                let v = ((row as f32 + 0.5 + jv) / rows as f32).clamp(0.0, 1.0);

                // Texture rows run top to bottom
                let center = [(u - 0.5) * width, (0.5 - v) * height, 0.0];
                grid.push_quad(center, [u, v]);
            }
        }
        grid
    }

    fn push_quad(&mut self, center: [f32; 3], uv: [f32; 2]) {
        let base = self.positions.len() as u32;
        for corner in CORNERS {
            self.positions.push(center);
            self.glyph_uvs.push(uv);
            self.corners.push(corner);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.glyph_uvs)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_1, self.corners)
            .with_inserted_indices(Indices::U32(self.indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_grid_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = ParticleGrid::new(10, 16, 1.0, 1.6, 0.3, &mut rng);
        assert_eq!(grid.particle_count(), 160);
        assert_eq!(grid.positions.len(), 640);
        assert_eq!(grid.glyph_uvs.len(), 640);
        assert_eq!(grid.corners.len(), 640);
        assert_eq!(grid.indices.len(), 960);
        assert!(grid.indices.iter().all(|&i| (i as usize) < grid.positions.len()));
    }

    #[test]
    fn test_particles_stay_inside_glyph() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = ParticleGrid::new(20, 32, 1.0, 1.6, 0.5, &mut rng);
        for (p, uv) in grid.positions.iter().zip(&grid.glyph_uvs) {
            assert!(p[0].abs() <= 0.5 + 1e-5 && p[1].abs() <= 0.8 + 1e-5);
            assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = ParticleGrid::new(8, 8, 1.0, 1.0, 0.4, &mut StdRng::seed_from_u64(1));
        let b = ParticleGrid::new(8, 8, 1.0, 1.0, 0.4, &mut StdRng::seed_from_u64(1));
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_top_of_texture_is_top_of_glyph() {
        let grid = ParticleGrid::new(1, 2, 1.0, 2.0, 0.0, &mut StdRng::seed_from_u64(0));
        // First quad samples the upper texture row and sits above the second
        assert!(grid.glyph_uvs[0][1] < grid.glyph_uvs[4][1]);
        assert!(grid.positions[0][1] > grid.positions[4][1]);
    }
}
