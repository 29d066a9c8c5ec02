use thiserror::Error;

/// The ore material (or every material it may replace) is missing from the
/// host registry. Natural generation is disabled; operator commands report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("ore material '{name}' not found in the host registry")]
    OreUnresolved { name: String },

    #[error("none of the replaceable materials could be resolved")]
    NoReplaceableMaterials,
}

/// Failure reported by a host voxel accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("voxel ({x}, {y}, {z}) is outside this chunk")]
    OutsideChunk { x: i32, y: i32, z: i32 },

    #[error("elevation {0} is outside the world height")]
    OutsideHeight(i32),

    #[error("chunk storage is unavailable")]
    Unavailable,
}

/// Errors raised while loading or validating an ore configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse ore config RON: {0}")]
    ParseError(String),

    #[error("Invalid ore config: {0}")]
    Invalid(String),
}
