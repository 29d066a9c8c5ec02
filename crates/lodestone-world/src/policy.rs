use lodestone_core::math::world_to_chunk;
use lodestone_core::{ChunkCoord, OreConfig, WorldCoord};

/// Decides whether a candidate voxel may be written at all.
pub trait GenerationPolicy {
    fn accept(&self, pos: WorldCoord) -> bool;
}

/// Inclusive elevation band shared by both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevationBand {
    pub min: i32,
    pub max: i32,
}

impl ElevationBand {
    pub fn from_config(config: &OreConfig) -> Self {
        Self {
            min: config.min_elevation,
            max: config.max_elevation,
        }
    }

    pub fn contains(self, y: i32) -> bool {
        (self.min..=self.max).contains(&y)
    }
}

/// Accepts only voxels owned by the chunk currently being generated.
///
/// Used during world generation, where writing into a neighbour would race
/// with that neighbour's own generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkClipped {
    pub chunk: ChunkCoord,
    pub band: ElevationBand,
}

impl GenerationPolicy for ChunkClipped {
    fn accept(&self, pos: WorldCoord) -> bool {
        self.band.contains(pos.y) && world_to_chunk(pos) == self.chunk
    }
}

/// Accepts any voxel in the elevation band; the owning chunk is resolved per write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldWide {
    pub band: ElevationBand,
}

impl GenerationPolicy for WorldWide {
    fn accept(&self, pos: WorldCoord) -> bool {
        self.band.contains(pos.y)
    }
}
