use crate::policy::GenerationPolicy;
use crate::vein::VeinShapeGenerator;
use lodestone_core::math::world_to_chunk;
use lodestone_core::{
    MaterialCatalog, RandomStream, VoxelAccess, VoxelWorld, WorldCoord, WriteFlags,
};

/// Why a candidate voxel was not turned into ore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The owning chunk is not loaded.
    RegionUnavailable,
    /// Rejected by the generation policy (wrong chunk or elevation).
    OutOfBounds,
    /// The voxel holds a protected material, ore included.
    NotReplaceable,
    /// The host accessor returned an error.
    AccessorFailure,
}

/// Outcome of a single voxel write attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    Skipped(SkipReason),
}

/// Read-then-conditionally-write of ore into host voxels.
///
/// Never propagates host failures; every outcome is a [`Placement`].
#[derive(Debug, Clone, Copy)]
pub struct VoxelWriteGateway<'c> {
    catalog: &'c MaterialCatalog,
}

impl<'c> VoxelWriteGateway<'c> {
    pub fn new(catalog: &'c MaterialCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c MaterialCatalog {
        self.catalog
    }

    /// Place ore at `pos` inside a chunk the caller already holds.
    pub fn try_place(&self, chunk: &mut dyn VoxelAccess, pos: WorldCoord) -> Placement {
        let current = match chunk.read(pos) {
            Ok(m) => m,
            Err(_) => return Placement::Skipped(SkipReason::AccessorFailure),
        };
        if !self.catalog.is_replaceable(current) {
            return Placement::Skipped(SkipReason::NotReplaceable);
        }
        match chunk.write(pos, self.catalog.ore(), WriteFlags::SILENT) {
            Ok(()) => Placement::Placed,
            Err(_) => Placement::Skipped(SkipReason::AccessorFailure),
        }
    }

    /// Place ore at `pos`, resolving its owning chunk first. Unloaded chunks
    /// are skipped, never loaded.
    pub fn try_place_in_world(&self, world: &mut dyn VoxelWorld, pos: WorldCoord) -> Placement {
        match world.loaded_chunk_mut(world_to_chunk(pos)) {
            Some(chunk) => self.try_place(chunk, pos),
            None => Placement::Skipped(SkipReason::RegionUnavailable),
        }
    }
}

/// Where a vein's accepted candidates are written.
pub trait PlacementTarget {
    fn place(&mut self, pos: WorldCoord) -> Placement;
}

/// Writes into the single chunk being generated.
pub struct ChunkTarget<'a, 'c> {
    pub gateway: VoxelWriteGateway<'c>,
    pub chunk: &'a mut dyn VoxelAccess,
}

impl PlacementTarget for ChunkTarget<'_, '_> {
    fn place(&mut self, pos: WorldCoord) -> Placement {
        self.gateway.try_place(&mut *self.chunk, pos)
    }
}

/// Writes anywhere in the world, one chunk lookup per voxel.
pub struct WorldTarget<'a, 'c> {
    pub gateway: VoxelWriteGateway<'c>,
    pub world: &'a mut dyn VoxelWorld,
}

impl PlacementTarget for WorldTarget<'_, '_> {
    fn place(&mut self, pos: WorldCoord) -> Placement {
        self.gateway.try_place_in_world(&mut *self.world, pos)
    }
}

/// Tally of one vein placement. Zero placed voxels is a normal outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VeinReport {
    /// Voxels produced by the shape, duplicates included.
    pub candidates: u32,
    pub placed: u32,
    pub out_of_bounds: u32,
    pub not_replaceable: u32,
    /// Unloaded chunks and accessor errors.
    pub unavailable: u32,
}

impl VeinReport {
    fn record(&mut self, placement: Placement) {
        match placement {
            Placement::Placed => self.placed += 1,
            Placement::Skipped(SkipReason::OutOfBounds) => self.out_of_bounds += 1,
            Placement::Skipped(SkipReason::NotReplaceable) => self.not_replaceable += 1,
            Placement::Skipped(SkipReason::RegionUnavailable)
            | Placement::Skipped(SkipReason::AccessorFailure) => self.unavailable += 1,
        }
    }
}

/// Generate one vein and write every policy-accepted candidate through `target`.
pub fn place_vein<R, P, T>(
    shape: &VeinShapeGenerator,
    center: WorldCoord,
    size: u32,
    rng: &mut R,
    policy: &P,
    target: &mut T,
) -> VeinReport
where
    R: RandomStream + ?Sized,
    P: GenerationPolicy + ?Sized,
    T: PlacementTarget + ?Sized,
{
    let mut report = VeinReport::default();
    for pos in shape.generate(center, size, rng) {
        report.candidates += 1;
        let placement = if policy.accept(pos) {
            target.place(pos)
        } else {
            Placement::Skipped(SkipReason::OutOfBounds)
        };
        report.record(placement);
    }
    report
}
