use lodestone_core::constants::{CHUNK_SIZE, VOXELS_PER_CHUNK, WORLD_HEIGHT};
use lodestone_core::math::{world_to_chunk, world_to_local};
use lodestone_core::{AccessError, ChunkCoord, MaterialId, VoxelAccess, WorldCoord, WriteFlags};

/// One 32 x WORLD_HEIGHT x 32 column of voxels, owned by the host.
#[derive(Debug, Clone)]
pub struct ChunkColumn {
    /// Chunk coordinate in chunk-space.
    coord: ChunkCoord,
    /// Material ids, x fastest, then z, then y.
    voxels: Vec<MaterialId>,
    /// Total successful writes since creation.
    write_count: u32,
    /// Writes that were not flagged silent.
    loud_writes: u32,
}

impl ChunkColumn {
    /// Create a column filled with air.
    pub fn new(coord: ChunkCoord) -> Self {
        Self::filled(coord, MaterialId::default())
    }

    /// Create a column filled with a single material.
    pub fn filled(coord: ChunkCoord, material: MaterialId) -> Self {
        Self {
            coord,
            voxels: vec![material; VOXELS_PER_CHUNK as usize],
            write_count: 0,
            loud_writes: 0,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    fn index(&self, pos: WorldCoord) -> Result<usize, AccessError> {
        if world_to_chunk(pos) != self.coord {
            return Err(AccessError::OutsideChunk {
                x: pos.x,
                y: pos.y,
                z: pos.z,
            });
        }
        if pos.y < 0 || pos.y >= WORLD_HEIGHT as i32 {
            return Err(AccessError::OutsideHeight(pos.y));
        }
        let local = world_to_local(pos);
        let cs = CHUNK_SIZE as usize;
        Ok(local.x as usize + local.z as usize * cs + local.y as usize * cs * cs)
    }

    /// Fill local column `(lx, lz)` from `y0` to `y1` (exclusive) with `material`.
    /// Used by terrain generation; does not count as a write.
    pub fn fill_column(&mut self, lx: u32, lz: u32, y0: u32, y1: u32, material: MaterialId) {
        let cs = CHUNK_SIZE as usize;
        let y1 = y1.min(WORLD_HEIGHT);
        for y in y0..y1 {
            let idx = lx as usize + lz as usize * cs + y as usize * cs * cs;
            self.voxels[idx] = material;
        }
    }

    /// Number of voxels currently holding `material`.
    pub fn count(&self, material: MaterialId) -> usize {
        self.voxels.iter().filter(|&&m| m == material).count()
    }

    /// World coordinates of every voxel currently holding `material`.
    pub fn positions_of(&self, material: MaterialId) -> Vec<WorldCoord> {
        let cs = CHUNK_SIZE as usize;
        let base_x = self.coord.x * CHUNK_SIZE as i32;
        let base_z = self.coord.y * CHUNK_SIZE as i32;
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, &m)| m == material)
            .map(|(idx, _)| {
                let x = (idx % cs) as i32;
                let z = ((idx / cs) % cs) as i32;
                let y = (idx / (cs * cs)) as i32;
                WorldCoord::new(base_x + x, y, base_z + z)
            })
            .collect()
    }

    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    pub fn loud_writes(&self) -> u32 {
        self.loud_writes
    }
}

impl VoxelAccess for ChunkColumn {
    fn chunk_coord(&self) -> ChunkCoord {
        self.coord
    }

    fn read(&self, pos: WorldCoord) -> Result<MaterialId, AccessError> {
        let idx = self.index(pos)?;
        Ok(self.voxels[idx])
    }

    fn write(
        &mut self,
        pos: WorldCoord,
        material: MaterialId,
        flags: WriteFlags,
    ) -> Result<(), AccessError> {
        let idx = self.index(pos)?;
        self.voxels[idx] = material;
        self.write_count += 1;
        if !flags.contains(WriteFlags::SILENT) {
            self.loud_writes += 1;
        }
        Ok(())
    }
}
