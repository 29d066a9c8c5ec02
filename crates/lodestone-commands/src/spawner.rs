use glam::IVec3;
use lodestone_core::math::clamp_to_world;
use lodestone_core::{JavaRandom, MaterialCatalog, OreConfig, RandomStream, VoxelWorld, WorldCoord};
use lodestone_world::gateway::WorldTarget;
use lodestone_world::policy::ElevationBand;
use lodestone_world::{place_vein, VeinReport, VeinShapeGenerator, VoxelWriteGateway, WorldWide};

/// Totals for a `generate` batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub veins_attempted: u32,
    /// Veins that placed at least one voxel.
    pub veins_created: u32,
    pub voxels_placed: u32,
}

/// Places veins on operator request, anywhere in the loaded world.
///
/// Unlike chunk seeding, one stream is shared by every vein this spawner
/// places, so operator veins are not reproducible across runs.
#[derive(Debug)]
pub struct OperatorVeinSpawner {
    config: OreConfig,
    shape: VeinShapeGenerator,
    policy: WorldWide,
    rng: JavaRandom,
}

impl OperatorVeinSpawner {
    /// Spawner seeded from OS entropy.
    pub fn new(config: OreConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: OreConfig, seed: i64) -> Self {
        Self {
            shape: VeinShapeGenerator::from_config(&config),
            policy: WorldWide {
                band: ElevationBand::from_config(&config),
            },
            rng: JavaRandom::new(seed),
            config,
        }
    }

    pub fn config(&self) -> &OreConfig {
        &self.config
    }

    /// Place one vein of `size` growth steps (clamped) around `center`.
    /// Centers beyond the world extent are pulled back onto its edge.
    pub fn spawn(
        &mut self,
        catalog: &MaterialCatalog,
        world: &mut dyn VoxelWorld,
        center: WorldCoord,
        size: i32,
    ) -> VeinReport {
        let size = self.config.spawn_size.apply(size) as u32;
        let center = clamp_to_world(center);
        let mut target = WorldTarget {
            gateway: VoxelWriteGateway::new(catalog),
            world,
        };
        place_vein(&self.shape, center, size, &mut self.rng, &self.policy, &mut target)
    }

    /// Scatter `count` veins within `radius` of `origin` horizontally, at
    /// elevations and sizes drawn from the configured bands.
    pub fn generate(
        &mut self,
        catalog: &MaterialCatalog,
        world: &mut dyn VoxelWorld,
        origin: WorldCoord,
        radius: i32,
        count: i32,
    ) -> BatchReport {
        let cfg = &self.config;
        let radius = cfg.generate_radius.apply(radius);
        let count = cfg.generate_count.apply(count);
        let origin = clamp_to_world(origin);
        let mut target = WorldTarget {
            gateway: VoxelWriteGateway::new(catalog),
            world,
        };

        let mut batch = BatchReport::default();
        for _ in 0..count {
            let x = origin.x + self.rng.next_int(radius * 2 + 1) - radius;
            let z = origin.z + self.rng.next_int(radius * 2 + 1) - radius;
            let y = cfg.min_y + self.rng.next_int(cfg.max_y - cfg.min_y);
            let size = (cfg.min_vein_size
                + self.rng.next_int(cfg.max_vein_size - cfg.min_vein_size + 1))
                as u32;

            let vein = place_vein(
                &self.shape,
                IVec3::new(x, y, z),
                size,
                &mut self.rng,
                &self.policy,
                &mut target,
            );
            batch.veins_attempted += 1;
            if vein.placed > 0 {
                batch.veins_created += 1;
                batch.voxels_placed += vein.placed;
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use lodestone_core::material::default_host_materials;
    use lodestone_world::chunk::ChunkColumn;
    use lodestone_world::chunk_map::ChunkMap;

    fn catalog() -> MaterialCatalog {
        let table = default_host_materials().expect("host table");
        MaterialCatalog::resolve(&table, &OreConfig::default()).expect("catalog")
    }

    /// Stone-filled chunks covering `[cx0, cx1] x [cz0, cz1]`.
    fn stone_world(catalog: &MaterialCatalog, cx: (i32, i32), cz: (i32, i32)) -> ChunkMap {
        let mut world = ChunkMap::new();
        for x in cx.0..=cx.1 {
            for z in cz.0..=cz.1 {
                world.insert(ChunkColumn::filled(IVec2::new(x, z), catalog.primary_stone()));
            }
        }
        world
    }

    fn ore_count(world: &ChunkMap, catalog: &MaterialCatalog) -> u32 {
        world
            .iter()
            .map(|(_, chunk)| chunk.count(catalog.ore()) as u32)
            .sum()
    }

    #[test]
    fn test_spawn_places_only_ore_near_center() {
        let catalog = catalog();
        let mut world = stone_world(&catalog, (2, 4), (5, 7));
        let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 99);
        let center = IVec3::new(100, 64, 200);

        let report = spawner.spawn(&catalog, &mut world, center, 5);
        assert!(report.placed > 0);
        assert!(report.placed as usize <= spawner.shape.max_candidates(5));
        assert_eq!(ore_count(&world, &catalog), report.placed);
        for (_, chunk) in world.iter() {
            for p in chunk.positions_of(catalog.ore()) {
                assert!((p - center).abs().max_element() <= 16, "{p:?} far from center");
            }
        }
    }

    #[test]
    fn test_spawn_size_clamped() {
        let catalog = catalog();
        let run = |size| {
            let mut world = stone_world(&catalog, (-1, 0), (-1, 0));
            let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 5);
            spawner.spawn(&catalog, &mut world, IVec3::new(0, 40, 0), size)
        };
        assert_eq!(run(999), run(15));
        assert_eq!(run(-4), run(1));
    }

    #[test]
    fn test_generate_arguments_clamped() {
        let catalog = catalog();
        let run = |radius, count| {
            let mut world = stone_world(&catalog, (-1, 0), (-1, 0));
            let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 17);
            spawner.generate(&catalog, &mut world, IVec3::new(0, 64, 0), radius, count)
        };
        assert_eq!(run(0, 3), run(1, 3));
        let capped = run(4, 500);
        assert_eq!(capped, run(4, 100));
        assert_eq!(capped.veins_attempted, 100);
    }

    #[test]
    fn test_generate_crosses_chunk_borders() {
        let catalog = catalog();
        let mut world = stone_world(&catalog, (-2, 1), (-2, 1));
        let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 1234);
        let batch = spawner.generate(&catalog, &mut world, IVec3::new(0, 64, 0), 16, 20);

        assert_eq!(batch.veins_attempted, 20);
        assert!(batch.veins_created > 0);
        assert_eq!(ore_count(&world, &catalog), batch.voxels_placed);
        let touched = world
            .iter()
            .filter(|(_, chunk)| chunk.count(catalog.ore()) > 0)
            .count();
        assert!(touched > 1, "radius 16 around a corner should reach several chunks");
    }

    #[test]
    fn test_extreme_origin_stays_in_range() {
        let catalog = catalog();
        let mut world = ChunkMap::new();
        let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 8);
        let edge = IVec3::new(i32::MAX, 40, i32::MIN);

        let batch = spawner.generate(&catalog, &mut world, edge, 128, 20);
        assert_eq!(batch.veins_attempted, 20);
        assert_eq!(batch.voxels_placed, 0);
        let report = spawner.spawn(&catalog, &mut world, edge, 15);
        assert_eq!(report.placed, 0);
        assert!(report.candidates > 0);
    }

    #[test]
    fn test_unloaded_chunks_never_written() {
        let catalog = catalog();
        let mut world = ChunkMap::new();
        let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 3);
        let report = spawner.spawn(&catalog, &mut world, IVec3::new(0, 40, 0), 5);
        assert_eq!(report.placed, 0);
        assert_eq!(report.unavailable, report.candidates);
        assert_eq!(world.loaded_count(), 0);
    }
}
