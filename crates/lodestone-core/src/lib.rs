pub mod config;
pub mod constants;
pub mod error;
pub mod material;
pub mod math;
pub mod rng;
pub mod types;
pub mod voxel;

pub use config::OreConfig;
pub use error::{AccessError, CatalogError, ConfigError};
pub use material::{MaterialCatalog, MaterialRegistry, MaterialTable};
pub use rng::{JavaRandom, RandomStream};
pub use types::{ChunkCoord, MaterialId, WorldCoord, WriteFlags};
pub use voxel::{VoxelAccess, VoxelWorld};
