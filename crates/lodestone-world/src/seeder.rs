use crate::gateway::{place_vein, ChunkTarget, PlacementTarget, VoxelWriteGateway};
use crate::policy::{ChunkClipped, ElevationBand};
use crate::vein::VeinShapeGenerator;
use lodestone_core::constants::CHUNK_SIZE;
use lodestone_core::math::chunk_origin;
use lodestone_core::{
    ChunkCoord, JavaRandom, MaterialCatalog, MaterialRegistry, OreConfig, RandomStream,
    VoxelAccess, WorldCoord,
};

/// Deterministic per-chunk seed.
pub fn chunk_seed(coord: ChunkCoord, multipliers: (i64, i64)) -> i64 {
    (coord.x as i64)
        .wrapping_mul(multipliers.0)
        .wrapping_add((coord.y as i64).wrapping_mul(multipliers.1))
}

#[derive(Debug)]
enum CatalogState {
    /// Not looked up yet.
    Pending,
    Ready(MaterialCatalog),
    /// Lookup failed once; generation stays off for the process lifetime.
    Disabled,
}

/// One vein the seeder rolled for a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VeinSummary {
    pub center: WorldCoord,
    pub size: u32,
    pub placed: u32,
}

/// What a chunk received. An empty report is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub veins: Vec<VeinSummary>,
    pub voxels_placed: u32,
}

impl SeedReport {
    pub fn veins_attempted(&self) -> usize {
        self.veins.len()
    }

    /// Veins that placed at least one voxel.
    pub fn veins_created(&self) -> usize {
        self.veins.iter().filter(|v| v.placed > 0).count()
    }
}

/// Adds ore veins to chunks as the host generates them.
#[derive(Debug)]
pub struct ChunkOreSeeder {
    config: OreConfig,
    shape: VeinShapeGenerator,
    band: ElevationBand,
    catalog: CatalogState,
}

impl ChunkOreSeeder {
    /// Seeder that resolves its materials from the host on the first chunk.
    pub fn new(config: OreConfig) -> Self {
        Self {
            shape: VeinShapeGenerator::from_config(&config),
            band: ElevationBand::from_config(&config),
            config,
            catalog: CatalogState::Pending,
        }
    }

    /// Seeder with materials already resolved.
    pub fn with_catalog(config: OreConfig, catalog: MaterialCatalog) -> Self {
        let mut seeder = Self::new(config);
        seeder.catalog = CatalogState::Ready(catalog);
        seeder
    }

    pub fn config(&self) -> &OreConfig {
        &self.config
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.catalog, CatalogState::Disabled)
    }

    /// Host hook: called once per chunk as it becomes available.
    ///
    /// Only chunks generated just now are touched; chunks loaded from storage
    /// may carry player edits and are left alone.
    pub fn on_chunk_generated(
        &mut self,
        registry: &dyn MaterialRegistry,
        chunk: &mut dyn VoxelAccess,
        newly_generated: bool,
    ) -> SeedReport {
        if !newly_generated {
            return SeedReport::default();
        }
        self.ensure_catalog(registry);
        let CatalogState::Ready(catalog) = &self.catalog else {
            return SeedReport::default();
        };

        let coord = chunk.chunk_coord();
        let mut target = ChunkTarget {
            gateway: VoxelWriteGateway::new(catalog),
            chunk,
        };
        let report = self.seed_into(coord, &mut target);
        if report.veins_created() > 0 {
            log::debug!(
                "Generated {} {} veins ({} voxels) in chunk [{}, {}]",
                report.veins_created(),
                self.config.ore_material,
                report.voxels_placed,
                coord.x,
                coord.y
            );
        }
        report
    }

    fn ensure_catalog(&mut self, registry: &dyn MaterialRegistry) {
        if !matches!(self.catalog, CatalogState::Pending) {
            return;
        }
        self.catalog = match MaterialCatalog::resolve(registry, &self.config) {
            Ok(catalog) => {
                log::info!(
                    "Initialized {} generation: ore id {}, stone id {}, {} replaceable materials",
                    self.config.ore_material,
                    catalog.ore().0,
                    catalog.primary_stone().0,
                    catalog.resolved_count()
                );
                CatalogState::Ready(catalog)
            }
            Err(e) => {
                log::warn!("{e}; natural {} generation disabled", self.config.ore_material);
                CatalogState::Disabled
            }
        };
    }

    /// Roll and place every vein for `coord`, writing through `target`.
    ///
    /// Draw order on the chunk stream: spawn roll, vein count, then per vein
    /// x, z, y, size, followed by that vein's shape draws.
    pub fn seed_into<T: PlacementTarget + ?Sized>(
        &self,
        coord: ChunkCoord,
        target: &mut T,
    ) -> SeedReport {
        let cfg = &self.config;
        let mut rng = JavaRandom::new(chunk_seed(coord, cfg.seed_multipliers));
        let mut report = SeedReport::default();

        if rng.next_f64() > cfg.spawn_chance {
            return report;
        }

        let policy = ChunkClipped {
            chunk: coord,
            band: self.band,
        };
        let origin = chunk_origin(coord);
        let cs = CHUNK_SIZE as i32;
        let count = cfg.min_veins + rng.next_int(cfg.extra_veins + 1);

        for _ in 0..count {
            let x = origin.x + rng.next_int(cs);
            let z = origin.y + rng.next_int(cs);
            let y = cfg.min_y + rng.next_int(cfg.max_y - cfg.min_y);
            let size =
                (cfg.min_vein_size + rng.next_int(cfg.max_vein_size - cfg.min_vein_size + 1)) as u32;
            let center = WorldCoord::new(x, y, z);

            let vein = place_vein(&self.shape, center, size, &mut rng, &policy, target);
            report.voxels_placed += vein.placed;
            report.veins.push(VeinSummary {
                center,
                size,
                placed: vein.placed,
            });
        }
        report
    }
}
