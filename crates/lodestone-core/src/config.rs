use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ORE_ELEVATION, MIN_ORE_ELEVATION};
use crate::error::ConfigError;

/// An inclusive integer band `[min, max]` used for operator argument clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clamp {
    pub default: i32,
    pub min: i32,
    pub max: i32,
}

impl Clamp {
    pub fn apply(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Parameters for one ore type.
///
/// `Default` holds the tin reference values; `data/ores/tin.ron` carries the
/// same values as a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OreConfig {
    /// Host asset name of the ore material.
    pub ore_material: String,
    /// Generic host stone, always replaceable when it resolves.
    pub primary_stone: String,
    /// Additional host materials ore may overwrite.
    pub replaceable: Vec<String>,

    /// Lowest vein center elevation (inclusive).
    pub min_y: i32,
    /// Highest vein center elevation (exclusive).
    pub max_y: i32,
    /// Veins per spawning chunk are drawn from `[min_veins, min_veins + extra_veins]`.
    pub min_veins: i32,
    pub extra_veins: i32,
    /// Growth steps per vein, inclusive band.
    pub min_vein_size: i32,
    pub max_vein_size: i32,
    /// Probability that a newly generated chunk gets any veins.
    pub spawn_chance: f64,
    /// Per-chunk seed is `cx * seed_multipliers.0 + cz * seed_multipliers.1`.
    /// Every ore type needs its own pair or their spawn rolls correlate.
    pub seed_multipliers: (i64, i64),

    /// Skeleton displacement scale (voxels at full progress).
    pub growth_radius: f64,
    /// Per-step cluster radius is drawn from `[min_cluster_radius, max_cluster_radius]`.
    pub min_cluster_radius: i32,
    pub max_cluster_radius: i32,
    /// Upper bound of the per-offset boundary jitter.
    pub cluster_jitter: f64,

    /// Lowest elevation ore may be written at (inclusive).
    pub min_elevation: i32,
    /// Highest elevation ore may be written at (inclusive).
    pub max_elevation: i32,

    /// Operator `spawn` size argument.
    pub spawn_size: Clamp,
    /// Operator `generate` radius argument.
    pub generate_radius: Clamp,
    /// Operator `generate` count argument.
    pub generate_count: Clamp,
    /// `spawn` centers the vein this many voxels below the operator.
    pub spawn_depth: i32,
}

impl Default for OreConfig {
    fn default() -> Self {
        Self {
            ore_material: "Ore_Tin_Stone".into(),
            primary_stone: "Rock_Stone".into(),
            replaceable: [
                "Rock_Stone",
                "Rock_Stone_Cobble",
                "Rock_Stone_Mossy",
                "Rock_Sandstone",
                "Rock_Sandstone_Cobble",
                "Rock_Basalt",
                "Rock_Basalt_Cobble",
                "Rock_Marble",
                "Rock_Marble_Cobble",
                "Rock_Granite",
                "Rock_Granite_Cobble",
                "Dirt",
                "Dirt_Grass",
                "Dirt_Dry",
                "Gravel",
                "Clay",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_y: 10,
            max_y: 50,
            min_veins: 2,
            extra_veins: 1,
            min_vein_size: 2,
            max_vein_size: 5,
            spawn_chance: 0.5,
            seed_multipliers: (987_654_321, 123_456_789),
            growth_radius: 2.0,
            min_cluster_radius: 1,
            max_cluster_radius: 2,
            cluster_jitter: 0.5,
            min_elevation: MIN_ORE_ELEVATION,
            max_elevation: MAX_ORE_ELEVATION,
            spawn_size: Clamp {
                default: 5,
                min: 1,
                max: 15,
            },
            generate_radius: Clamp {
                default: 32,
                min: 1,
                max: 128,
            },
            generate_count: Clamp {
                default: 10,
                min: 1,
                max: 100,
            },
            spawn_depth: 2,
        }
    }
}

impl OreConfig {
    /// Check the bands for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ore_material.is_empty() {
            return Err(ConfigError::Invalid("ore_material is empty".into()));
        }
        if self.min_y >= self.max_y {
            return Err(ConfigError::Invalid(format!(
                "min_y ({}) must be below max_y ({})",
                self.min_y, self.max_y
            )));
        }
        if self.min_veins < 0 || self.extra_veins < 0 {
            return Err(ConfigError::Invalid("vein counts must be non-negative".into()));
        }
        if self.min_vein_size < 1 || self.min_vein_size > self.max_vein_size {
            return Err(ConfigError::Invalid(format!(
                "vein size band [{}, {}] is empty or below 1",
                self.min_vein_size, self.max_vein_size
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "spawn_chance {} outside [0, 1]",
                self.spawn_chance
            )));
        }
        if self.min_cluster_radius < 0 || self.min_cluster_radius > self.max_cluster_radius {
            return Err(ConfigError::Invalid("cluster radius band is empty".into()));
        }
        if self.cluster_jitter < 0.0 || self.growth_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "growth_radius and cluster_jitter must be non-negative".into(),
            ));
        }
        if self.min_elevation > self.max_elevation
            || self.min_elevation < MIN_ORE_ELEVATION
            || self.max_elevation > MAX_ORE_ELEVATION
        {
            return Err(ConfigError::Invalid(format!(
                "elevation band [{}, {}] must lie within [{MIN_ORE_ELEVATION}, {MAX_ORE_ELEVATION}]",
                self.min_elevation, self.max_elevation
            )));
        }
        for (name, clamp) in [
            ("spawn_size", self.spawn_size),
            ("generate_radius", self.generate_radius),
            ("generate_count", self.generate_count),
        ] {
            if clamp.min < 1 || clamp.min > clamp.max {
                return Err(ConfigError::Invalid(format!("{name} clamp is empty")));
            }
        }
        Ok(())
    }
}

/// Parse and validate an ore configuration from RON.
pub fn load_ore_config_from_str(ron_str: &str) -> Result<OreConfig, ConfigError> {
    let options = ron::Options::default();
    let config: OreConfig = options
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// The tin ore configuration bundled with the workspace.
pub fn tin_ore_config() -> Result<OreConfig, ConfigError> {
    load_ore_config_from_str(include_str!("../../../data/ores/tin.ron"))
}
