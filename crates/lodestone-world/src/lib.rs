pub mod chunk;
pub mod chunk_map;
pub mod gateway;
pub mod policy;
pub mod seeder;
pub mod terrain;
pub mod vein;

use chunk::ChunkColumn;
use chunk_map::ChunkMap;
use lodestone_core::{ChunkCoord, MaterialTable, OreConfig, VoxelAccess, VoxelWorld};
use seeder::{ChunkOreSeeder, SeedReport};
use terrain::{TerrainError, TerrainGenerator};

pub use gateway::{place_vein, Placement, SkipReason, VeinReport, VoxelWriteGateway};
pub use policy::{ChunkClipped, GenerationPolicy, WorldWide};
pub use vein::VeinShapeGenerator;

/// In-memory host world: terrain generation followed by ore seeding for each
/// newly generated chunk, one chunk at a time.
pub struct World {
    chunk_map: ChunkMap,
    materials: MaterialTable,
    terrain: TerrainGenerator,
    seeder: ChunkOreSeeder,
}

impl World {
    pub fn new(
        seed: u32,
        materials: MaterialTable,
        ore: OreConfig,
    ) -> Result<Self, TerrainError> {
        let terrain = TerrainGenerator::new(seed, &materials)?;
        Ok(Self {
            chunk_map: ChunkMap::new(),
            materials,
            terrain,
            seeder: ChunkOreSeeder::new(ore),
        })
    }

    /// Make `coord` resident. A chunk that is not resident is generated from
    /// scratch and seeded with ore, even if it was resident once and later
    /// unloaded; use [`World::load_chunk`] to bring back a stored column.
    /// An already resident chunk is left as is.
    pub fn generate_chunk(&mut self, coord: ChunkCoord) -> SeedReport {
        if self.chunk_map.contains(&coord) {
            return SeedReport::default();
        }
        let mut chunk = self.terrain.generate_chunk(coord);
        let report = self
            .seeder
            .on_chunk_generated(&self.materials, &mut chunk, true);
        self.chunk_map.insert(chunk);
        report
    }

    /// Bring back a chunk from storage. Ore seeding is not re-run.
    pub fn load_chunk(&mut self, mut chunk: ChunkColumn) {
        self.seeder
            .on_chunk_generated(&self.materials, &mut chunk, false);
        self.chunk_map.insert(chunk);
    }

    pub fn unload_chunk(&mut self, coord: &ChunkCoord) -> Option<ChunkColumn> {
        self.chunk_map.unload(coord)
    }

    /// Get the chunk map for reading.
    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    /// Host material table, also the registry ore names resolve against.
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn seeder(&self) -> &ChunkOreSeeder {
        &self.seeder
    }
}

impl VoxelWorld for World {
    fn loaded_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut dyn VoxelAccess> {
        self.chunk_map.loaded_chunk_mut(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use lodestone_core::material::default_host_materials;
    use lodestone_core::MaterialRegistry;

    fn world() -> World {
        let materials = default_host_materials().expect("host table");
        World::new(7, materials, OreConfig::default()).expect("world")
    }

    #[test]
    fn test_generated_chunks_contain_ore_only_inside() {
        let mut world = world();
        let ore = world
            .materials()
            .resolve("Ore_Tin_Stone")
            .expect("ore material");
        let mut total = 0;
        for cx in -3..3 {
            for cz in -3..3 {
                let coord = IVec2::new(cx, cz);
                let report = world.generate_chunk(coord);
                let chunk = world.chunk_map().get(&coord).expect("resident");
                assert_eq!(chunk.count(ore) as u32, report.voxels_placed);
                total += report.voxels_placed;
            }
        }
        assert!(total > 0, "36 chunks at 50% should place some ore");
        assert!(!world.seeder().is_disabled());
    }

    #[test]
    fn test_regenerating_resident_chunk_is_noop() {
        let mut world = world();
        let coord = IVec2::new(1, 1);
        world.generate_chunk(coord);
        let writes = world.chunk_map().get(&coord).map(|c| c.write_count());
        let report = world.generate_chunk(coord);
        assert_eq!(report, SeedReport::default());
        assert_eq!(
            world.chunk_map().get(&coord).map(|c| c.write_count()),
            writes
        );
    }

    #[test]
    fn test_unloaded_chunk_regenerates_identically() {
        let mut world = world();
        let coord = IVec2::new(-2, 3);
        let first = world.generate_chunk(coord);
        let ore = world
            .materials()
            .resolve("Ore_Tin_Stone")
            .expect("ore material");
        let before = world.chunk_map().get(&coord).map(|c| c.positions_of(ore));

        world.unload_chunk(&coord);
        let again = world.generate_chunk(coord);
        assert_eq!(again, first);
        assert_eq!(
            world.chunk_map().get(&coord).map(|c| c.positions_of(ore)),
            before
        );
    }

    #[test]
    fn test_reloaded_chunk_not_reseeded() {
        let mut world = world();
        let coord = IVec2::new(0, 2);
        world.generate_chunk(coord);
        let chunk = world.unload_chunk(&coord).expect("was resident");
        let writes = chunk.write_count();
        world.load_chunk(chunk);
        let reloaded = world.chunk_map().get(&coord).expect("resident again");
        assert_eq!(reloaded.write_count(), writes);
    }
}
