use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::OreConfig;
use crate::error::CatalogError;
use crate::types::MaterialId;

/// Broad family a host material belongs to. Informational only; the
/// replacement decision is made by name through [`MaterialCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Air,
    Rock,
    Soil,
    Ore,
    Fluid,
    Other,
}

/// A single material definition loaded from RON data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Stable index handed out by the host. 0 = air.
    pub id: u32,
    /// Asset name, e.g. `"Rock_Stone"`. Unique within a table.
    pub name: String,
    pub category: Category,
}

/// Name lookup into the host's asset registry.
pub trait MaterialRegistry {
    /// Resolve an asset name to its id, or `None` if the host has no such material.
    fn resolve(&self, name: &str) -> Option<MaterialId>;
}

/// Collection of material definitions indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    pub materials: Vec<MaterialDef>,
}

impl MaterialTable {
    /// Look up a material by ID. Returns None if not found.
    pub fn get(&self, id: u32) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up a material by asset name.
    pub fn by_name(&self, name: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialRegistry for MaterialTable {
    fn resolve(&self, name: &str) -> Option<MaterialId> {
        self.by_name(name).map(|m| MaterialId(m.id))
    }
}

#[derive(Debug, Error)]
#[error("Failed to parse materials RON: {0}")]
pub struct MaterialParseError(String);

/// Parse a materials RON string into a MaterialTable.
pub fn load_materials_from_str(ron_str: &str) -> Result<MaterialTable, MaterialParseError> {
    let options = ron::Options::default();
    let materials: Vec<MaterialDef> = options
        .from_str(ron_str)
        .map_err(|e| MaterialParseError(e.to_string()))?;
    Ok(MaterialTable { materials })
}

/// The host material table shipped with the workspace (bundled at compile time).
pub fn default_host_materials() -> Result<MaterialTable, MaterialParseError> {
    load_materials_from_str(include_str!("../../../data/materials/host.ron"))
}

/// Resolved material ids for one ore type.
///
/// Built once from a [`MaterialRegistry`] and passed by reference to everything
/// that writes ore. Answers the replaceability question for the write gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialCatalog {
    ore: MaterialId,
    primary_stone: MaterialId,
    /// One slot per configured name, `UNRESOLVED` where the lookup failed.
    replaceable: Vec<MaterialId>,
}

impl MaterialCatalog {
    /// Resolve the ore and its host materials.
    ///
    /// Individual replaceable names that the host does not know are kept as
    /// `UNRESOLVED` and never match. The ore itself is never replaceable, even
    /// when it appears in the configured list.
    pub fn resolve(
        registry: &dyn MaterialRegistry,
        config: &OreConfig,
    ) -> Result<Self, CatalogError> {
        let ore = registry
            .resolve(&config.ore_material)
            .ok_or_else(|| CatalogError::OreUnresolved {
                name: config.ore_material.clone(),
            })?;

        let primary_stone = registry
            .resolve(&config.primary_stone)
            .filter(|id| *id != ore)
            .unwrap_or(MaterialId::UNRESOLVED);

        let replaceable: Vec<MaterialId> = config
            .replaceable
            .iter()
            .map(|name| match registry.resolve(name) {
                Some(id) if id != ore => id,
                Some(_) => {
                    log::warn!("ore material '{name}' listed as replaceable; ignoring");
                    MaterialId::UNRESOLVED
                }
                None => {
                    log::debug!("replaceable material '{name}' not found in host registry");
                    MaterialId::UNRESOLVED
                }
            })
            .collect();

        if !primary_stone.is_resolved() && !replaceable.iter().any(|id| id.is_resolved()) {
            return Err(CatalogError::NoReplaceableMaterials);
        }

        Ok(Self {
            ore,
            primary_stone,
            replaceable,
        })
    }

    /// Id written into every placed voxel.
    pub fn ore(&self) -> MaterialId {
        self.ore
    }

    pub fn primary_stone(&self) -> MaterialId {
        self.primary_stone
    }

    /// Whether a voxel currently holding `current` may be overwritten with ore.
    pub fn is_replaceable(&self, current: MaterialId) -> bool {
        if !current.is_resolved() {
            return false;
        }
        current == self.primary_stone || self.replaceable.contains(&current)
    }

    /// Number of replaceable names that resolved to a host material.
    pub fn resolved_count(&self) -> usize {
        self.replaceable.iter().filter(|id| id.is_resolved()).count()
    }
}
