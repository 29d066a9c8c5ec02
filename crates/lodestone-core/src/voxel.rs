//! Host voxel storage as seen by ore placement.
//!
//! The host owns chunk storage and its threading discipline. These traits are
//! the only way placement code touches voxels; every call is expected on the
//! host's world-mutation thread.

use crate::error::AccessError;
use crate::types::{ChunkCoord, MaterialId, WorldCoord, WriteFlags};

/// Read/write access to one chunk column, addressed in world coordinates.
pub trait VoxelAccess {
    /// The column this accessor is scoped to.
    fn chunk_coord(&self) -> ChunkCoord;

    fn read(&self, pos: WorldCoord) -> Result<MaterialId, AccessError>;

    fn write(
        &mut self,
        pos: WorldCoord,
        material: MaterialId,
        flags: WriteFlags,
    ) -> Result<(), AccessError>;
}

/// Resolves chunk columns across the whole world.
pub trait VoxelWorld {
    /// The loaded column at `coord`, or `None` if it is not resident.
    /// Must never load or generate a chunk as a side effect.
    fn loaded_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut dyn VoxelAccess>;
}
