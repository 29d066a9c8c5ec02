use glam::{IVec2, IVec3};

/// Newtype for host material identifiers.
///
/// The numeric value is an index into the host's material table and has no
/// meaning on its own. [`MaterialId::UNRESOLVED`] marks a name that was never
/// found; it compares unequal to every id the host can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Sentinel for a name lookup that failed.
    pub const UNRESOLVED: MaterialId = MaterialId(u32::MAX);

    /// Whether this id refers to a real host material.
    pub fn is_resolved(self) -> bool {
        self != Self::UNRESOLVED
    }
}

/// Horizontal chunk coordinate `(cx, cz)` stored as `IVec2 { x: cx, y: cz }`.
pub type ChunkCoord = IVec2;

/// World coordinate in voxel-space.
pub type WorldCoord = IVec3;

/// Flags passed through to the host on every voxel write.
///
/// Mirrors the host's settings bitfield. Ore placement always writes with
/// [`WriteFlags::SILENT`] so bulk generation does not emit particles or
/// neighbour updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteFlags(pub u32);

impl WriteFlags {
    pub const NONE: WriteFlags = WriteFlags(0);
    /// No particles, no cosmetic side effects.
    pub const SILENT: WriteFlags = WriteFlags(4);

    pub fn contains(self, other: WriteFlags) -> bool {
        self.0 & other.0 == other.0
    }
}
