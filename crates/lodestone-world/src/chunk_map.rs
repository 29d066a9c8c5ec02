use crate::chunk::ChunkColumn;
use lodestone_core::{ChunkCoord, VoxelAccess, VoxelWorld};
use std::collections::HashMap;

/// Spatial container for every resident chunk column.
#[derive(Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoord, ChunkColumn>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any column already at its coordinate.
    pub fn insert(&mut self, chunk: ChunkColumn) -> Option<ChunkColumn> {
        self.chunks.insert(chunk.coord(), chunk)
    }

    /// Unload a column, returning it to the caller.
    pub fn unload(&mut self, coord: &ChunkCoord) -> Option<ChunkColumn> {
        self.chunks.remove(coord)
    }

    /// Get a chunk by coordinate.
    pub fn get(&self, coord: &ChunkCoord) -> Option<&ChunkColumn> {
        self.chunks.get(coord)
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// Iterator over all loaded chunks.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &ChunkColumn)> {
        self.chunks.iter()
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }
}

impl VoxelWorld for ChunkMap {
    fn loaded_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut dyn VoxelAccess> {
        self.chunks
            .get_mut(&coord)
            .map(|c| c as &mut dyn VoxelAccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, IVec3};
    use lodestone_core::MaterialId;

    #[test]
    fn test_insert_get_unload() {
        let mut map = ChunkMap::new();
        let coord = IVec2::new(1, -1);
        assert!(map.insert(ChunkColumn::new(coord)).is_none());
        assert!(map.contains(&coord));
        assert_eq!(map.loaded_count(), 1);

        assert!(map.unload(&coord).is_some());
        assert!(map.get(&coord).is_none());
        assert_eq!(map.loaded_count(), 0);
    }

    #[test]
    fn test_insert_same_coord_replaces() {
        let mut map = ChunkMap::new();
        let coord = IVec2::new(0, 0);
        map.insert(ChunkColumn::new(coord));
        let old = map.insert(ChunkColumn::filled(coord, MaterialId(2)));
        assert!(old.is_some());
        assert_eq!(map.loaded_count(), 1);
    }

    #[test]
    fn test_unloaded_chunk_not_resolvable() {
        let mut map = ChunkMap::new();
        map.insert(ChunkColumn::filled(IVec2::new(0, 0), MaterialId(2)));
        assert!(map.loaded_chunk_mut(IVec2::new(0, 0)).is_some());
        assert!(map.loaded_chunk_mut(IVec2::new(5, 5)).is_none());
        assert_eq!(map.loaded_count(), 1, "lookup must not load chunks");

        let access = map
            .loaded_chunk_mut(IVec2::new(0, 0))
            .expect("chunk is loaded");
        assert_eq!(access.read(IVec3::new(1, 1, 1)), Ok(MaterialId(2)));
    }
}
