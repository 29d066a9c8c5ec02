use crate::constants::{CHUNK_SHIFT, CHUNK_SIZE, WORLD_LIMIT};
use crate::types::{ChunkCoord, WorldCoord};
use glam::{IVec2, IVec3, Vec3};

/// Convert a world-space voxel coordinate to its owning chunk column.
///
/// Arithmetic shift, so negative coordinates round toward negative infinity
/// (x = -1 lives in chunk -1, not chunk 0).
pub fn world_to_chunk(world: WorldCoord) -> ChunkCoord {
    IVec2::new(world.x >> CHUNK_SHIFT, world.z >> CHUNK_SHIFT)
}

/// Convert a world-space voxel coordinate to its local offset within its column.
/// The y component passes through unchanged.
pub fn world_to_local(world: WorldCoord) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(world.x.rem_euclid(cs), world.y, world.z.rem_euclid(cs))
}

/// World-space x/z of the chunk's minimum corner.
pub fn chunk_origin(chunk: ChunkCoord) -> IVec2 {
    IVec2::new(chunk.x << CHUNK_SHIFT, chunk.y << CHUNK_SHIFT)
}

/// Voxel containing a continuous position.
pub fn voxel_at(position: Vec3) -> WorldCoord {
    position.floor().as_ivec3()
}

/// Whether a continuous position is finite and inside the world extent.
pub fn within_world(position: Vec3) -> bool {
    position.is_finite() && position.abs().max_element() <= WORLD_LIMIT as f32
}

/// Pull each axis of `pos` into `[-WORLD_LIMIT, WORLD_LIMIT]`.
pub fn clamp_to_world(pos: WorldCoord) -> WorldCoord {
    pos.clamp(IVec3::splat(-WORLD_LIMIT), IVec3::splat(WORLD_LIMIT))
}
