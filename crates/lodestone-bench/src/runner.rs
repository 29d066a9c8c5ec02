use std::time::Instant;

use glam::IVec2;
use lodestone_core::config::tin_ore_config;
use lodestone_core::material::{default_host_materials, MaterialParseError};
use lodestone_core::{ConfigError, MaterialRegistry};
use lodestone_world::seeder::SeedReport;
use lodestone_world::terrain::TerrainError;
use lodestone_world::World;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Materials(#[from] MaterialParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error("ore material '{0}' missing from the host table")]
    MissingOre(String),
}

/// Per-chunk generation time, terrain and ore seeding together.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Outcome of generating one square of chunks.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunResult {
    pub world_seed: u32,
    pub radius: i32,
    pub chunks: u32,
    /// Chunks whose spawn roll succeeded.
    pub spawning_chunks: u32,
    pub veins_attempted: u32,
    pub veins_created: u32,
    pub voxels_placed: u32,
    /// Chunks whose ore count disagrees with what the seeder reported.
    pub containment_violations: u32,
    /// Ore voxels found outside the configured elevation band.
    pub elevation_violations: u32,
    /// Regenerating the first chunk in a fresh world gave the same veins.
    pub deterministic: bool,
    pub timings: TimingSeries,
}

#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub world_seed: u32,
    /// Half-width of the square, in chunks, around the origin chunk.
    pub radius: i32,
}

/// Generate every chunk in `[-radius, radius]^2` and check what landed.
pub fn run(config: &RunConfig) -> Result<RunResult, RunError> {
    let ore_config = tin_ore_config()?;
    let materials = default_host_materials()?;
    let ore = materials
        .resolve(&ore_config.ore_material)
        .ok_or_else(|| RunError::MissingOre(ore_config.ore_material.clone()))?;
    let band = ore_config.min_elevation..=ore_config.max_elevation;

    let mut world = World::new(config.world_seed, materials.clone(), ore_config.clone())?;
    let r = config.radius.max(0);
    log::info!(
        "Generating {} chunks around the origin (seed {})...",
        (2 * r + 1) * (2 * r + 1),
        config.world_seed
    );

    let mut times = Vec::new();
    let mut reports: Vec<(IVec2, SeedReport)> = Vec::new();
    for cx in -r..=r {
        for cz in -r..=r {
            let coord = IVec2::new(cx, cz);
            let start = Instant::now();
            let report = world.generate_chunk(coord);
            times.push(start.elapsed().as_secs_f64() * 1000.0);
            reports.push((coord, report));
        }
    }

    let mut result = RunResult {
        world_seed: config.world_seed,
        radius: r,
        chunks: reports.len() as u32,
        spawning_chunks: 0,
        veins_attempted: 0,
        veins_created: 0,
        voxels_placed: 0,
        containment_violations: 0,
        elevation_violations: 0,
        deterministic: true,
        timings: compute_timings(&times),
    };

    for (coord, report) in &reports {
        if report.veins_attempted() > 0 {
            result.spawning_chunks += 1;
        }
        result.veins_attempted += report.veins_attempted() as u32;
        result.veins_created += report.veins_created() as u32;
        result.voxels_placed += report.voxels_placed;

        let Some(chunk) = world.chunk_map().get(coord) else {
            continue;
        };
        let found = chunk.positions_of(ore);
        if found.len() as u32 != report.voxels_placed {
            log::warn!(
                "Chunk [{}, {}] holds {} ore voxels, seeder reported {}",
                coord.x,
                coord.y,
                found.len(),
                report.voxels_placed
            );
            result.containment_violations += 1;
        }
        result.elevation_violations += found.iter().filter(|p| !band.contains(&p.y)).count() as u32;
    }

    if let Some((coord, first)) = reports.first() {
        let mut fresh = World::new(config.world_seed, materials, ore_config)?;
        result.deterministic = fresh.generate_chunk(*coord) == *first;
    }

    log::info!(
        "  Done: {} veins, {} voxels, mean={:.2}ms, p95={:.2}ms",
        result.veins_created,
        result.voxels_placed,
        result.timings.mean_ms,
        result.timings.p95_ms
    );
    Ok(result)
}

fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = (n as f64 * 0.95) as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timings_of_known_series() {
        let t = compute_timings(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(t.mean_ms, 2.5);
        assert_eq!(t.median_ms, 2.5);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 4.0);
        assert_eq!(t.p95_ms, 4.0);
    }

    #[test]
    fn test_empty_timings() {
        let t = compute_timings(&[]);
        assert_eq!(t.max_ms, 0.0);
    }

    #[test]
    fn test_small_run_is_clean() {
        let result = run(&RunConfig {
            world_seed: 3,
            radius: 2,
        })
        .expect("run");
        assert_eq!(result.chunks, 25);
        assert_eq!(result.containment_violations, 0);
        assert_eq!(result.elevation_violations, 0);
        assert!(result.deterministic);
        assert!(result.spawning_chunks > 0);
        assert!(result.veins_attempted >= result.spawning_chunks * 2);
    }
}
