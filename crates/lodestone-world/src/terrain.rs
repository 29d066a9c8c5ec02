use crate::chunk::ChunkColumn;
use lodestone_core::constants::{CHUNK_SIZE, WORLD_HEIGHT};
use lodestone_core::math::chunk_origin;
use lodestone_core::{ChunkCoord, MaterialId, MaterialRegistry};
use thiserror::Error;

/// Sea level in world-space voxel Y coordinate.
const SEA_LEVEL: i32 = 62;

/// Mean surface height before noise.
const BASE_HEIGHT: f64 = 68.0;

/// Basalt replaces stone below this elevation.
const BASALT_DEPTH: i32 = 12;

/// Horizontal wavelength of the coarse noise octave, in voxels.
const NOISE_CELL: i32 = 48;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("terrain material '{0}' not found in the host registry")]
    MissingMaterial(&'static str),
}

/// Material ids for each terrain layer.
#[derive(Debug, Clone, Copy)]
struct Layers {
    air: MaterialId,
    bedrock: MaterialId,
    basalt: MaterialId,
    stone: MaterialId,
    dirt: MaterialId,
    grass: MaterialId,
    sand: MaterialId,
    water: MaterialId,
}

impl Layers {
    fn resolve(registry: &dyn MaterialRegistry) -> Result<Self, TerrainError> {
        let get = |name: &'static str| {
            registry
                .resolve(name)
                .ok_or(TerrainError::MissingMaterial(name))
        };
        Ok(Self {
            air: get("Air")?,
            bedrock: get("Rock_Bedrock")?,
            basalt: get("Rock_Basalt")?,
            stone: get("Rock_Stone")?,
            dirt: get("Dirt")?,
            grass: get("Dirt_Grass")?,
            sand: get("Sand")?,
            water: get("Water")?,
        })
    }
}

/// Heightmap terrain standing in for the host's base generator.
///
/// Layers bottom-up: bedrock floor at y = 0, basalt, stone, three voxels of
/// dirt, then grass (sand near or under water), water up to sea level.
pub struct TerrainGenerator {
    seed: u32,
    layers: Layers,
}

impl TerrainGenerator {
    pub fn new(seed: u32, registry: &dyn MaterialRegistry) -> Result<Self, TerrainError> {
        Ok(Self {
            seed,
            layers: Layers::resolve(registry)?,
        })
    }

    /// Build the base column for a chunk. No ore is placed here.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> ChunkColumn {
        let l = self.layers;
        let mut chunk = ChunkColumn::filled(coord, l.air);
        let origin = chunk_origin(coord);
        let top = WORLD_HEIGHT as i32;

        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let h = self
                    .surface_height(origin.x + lx as i32, origin.y + lz as i32)
                    .clamp(BASALT_DEPTH + 8, top - 1);
                let surface = if h <= SEA_LEVEL + 1 { l.sand } else { l.grass };

                chunk.fill_column(lx, lz, 0, 1, l.bedrock);
                chunk.fill_column(lx, lz, 1, BASALT_DEPTH as u32, l.basalt);
                chunk.fill_column(lx, lz, BASALT_DEPTH as u32, (h - 3) as u32, l.stone);
                chunk.fill_column(lx, lz, (h - 3) as u32, h as u32, l.dirt);
                chunk.fill_column(lx, lz, h as u32, h as u32 + 1, surface);
                if h < SEA_LEVEL {
                    chunk.fill_column(lx, lz, h as u32 + 1, SEA_LEVEL as u32 + 1, l.water);
                }
            }
        }
        chunk
    }

    /// Surface elevation at world (x, z): two octaves of value noise.
    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let coarse = self.value_noise(wx, wz, NOISE_CELL, 0) * 14.0;
        let fine = self.value_noise(wx, wz, NOISE_CELL / 4, 1) * 3.0;
        (BASE_HEIGHT + coarse + fine).round() as i32
    }

    /// Smoothly interpolated lattice noise in [-1, 1].
    fn value_noise(&self, wx: i32, wz: i32, cell: i32, octave: u32) -> f64 {
        let (cx, fx) = (wx.div_euclid(cell), wx.rem_euclid(cell) as f64 / cell as f64);
        let (cz, fz) = (wz.div_euclid(cell), wz.rem_euclid(cell) as f64 / cell as f64);
        let corner = |dx: i32, dz: i32| self.lattice(cx + dx, cz + dz, octave);

        let (sx, sz) = (smoothstep(fx), smoothstep(fz));
        let top = lerp(corner(0, 0), corner(1, 0), sx);
        let bottom = lerp(corner(0, 1), corner(1, 1), sx);
        lerp(top, bottom, sz)
    }

    fn lattice(&self, x: i32, z: i32, octave: u32) -> f64 {
        let h = lattice_hash(x, z, self.seed.wrapping_add(octave.wrapping_mul(0x9E37_79B9)));
        (h >> 8) as f64 / 8_388_608.0 - 1.0 // 2^23
    }
}

/// Integer hash of a lattice point, PCG-style mixing.
fn lattice_hash(x: i32, z: i32, seed: u32) -> u32 {
    let mut state = (x as u32)
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add((z as u32).wrapping_mul(0x517C_C1B7))
        .wrapping_add(seed.wrapping_mul(0x2545_F491));
    state ^= state >> 16;
    state = state.wrapping_mul(0x045D_9F3B);
    state ^= state >> 16;
    state = state.wrapping_mul(0x045D_9F3B);
    state ^ (state >> 16)
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
