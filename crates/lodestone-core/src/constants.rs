//! Single source of truth for shared constants.
//! Tunable ore parameters live in `OreConfig`; these are properties of the
//! host world itself and do not change per ore type.

/// Side length of a chunk column in voxels (x and z).
pub const CHUNK_SIZE: u32 = 32;

/// log2(CHUNK_SIZE). World x/z shifted right by this gives the chunk coordinate.
pub const CHUNK_SHIFT: u32 = 5;

/// Height of a chunk column in voxels. Valid y is `0..WORLD_HEIGHT`.
pub const WORLD_HEIGHT: u32 = 320;

/// Total voxels per chunk column (32 * 320 * 32).
pub const VOXELS_PER_CHUNK: u32 = CHUNK_SIZE * WORLD_HEIGHT * CHUNK_SIZE;

/// Lowest elevation ore may ever be written at. y = 0 is the bedrock floor.
pub const MIN_ORE_ELEVATION: i32 = 1;

/// Highest elevation ore may ever be written at (inclusive).
pub const MAX_ORE_ELEVATION: i32 = 310;

/// No chunk exists beyond this distance from the origin on any axis.
pub const WORLD_LIMIT: i32 = 30_000_000;
