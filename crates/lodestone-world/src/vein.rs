//! Blob-shaped vein geometry.
//!
//! A vein is `size` growth steps walked outward from its center. Each step
//! lands on a skeleton point displaced by fresh random angles, and carves a
//! jittered sphere there. Draw order per step is fixed:
//!
//! 1. `angle1`, `angle2` (two `next_f32`)
//! 2. cluster radius (`next_int`)
//! 3. one `next_f32` jitter per offset of the cluster cube, dx outermost,
//!    then dy, then dz.
//!
//! Replaying the same stream therefore reproduces the same candidates.

use glam::IVec3;
use lodestone_core::{OreConfig, RandomStream, WorldCoord};
use std::f32::consts::TAU;

/// Shape parameters for one ore type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VeinShapeGenerator {
    growth_radius: f64,
    min_cluster_radius: i32,
    max_cluster_radius: i32,
    jitter: f64,
}

impl Default for VeinShapeGenerator {
    fn default() -> Self {
        Self::from_config(&OreConfig::default())
    }
}

impl VeinShapeGenerator {
    pub fn from_config(config: &OreConfig) -> Self {
        Self {
            growth_radius: config.growth_radius,
            min_cluster_radius: config.min_cluster_radius,
            max_cluster_radius: config.max_cluster_radius,
            jitter: config.cluster_jitter,
        }
    }

    /// Lazily enumerate the candidate voxels of one vein.
    ///
    /// Candidates may repeat across steps. `size == 0` yields nothing and
    /// draws nothing. The stream is borrowed until the iterator is dropped,
    /// so callers cannot interleave other draws mid-vein.
    pub fn generate<'r, R: RandomStream + ?Sized>(
        &self,
        center: WorldCoord,
        size: u32,
        rng: &'r mut R,
    ) -> VeinShape<'r, R> {
        VeinShape {
            shape: *self,
            rng,
            center,
            size,
            step: 0,
            cluster: None,
        }
    }

    /// Loose upper bound on candidates for a vein of `size` steps.
    pub fn max_candidates(&self, size: u32) -> usize {
        let side = (2 * self.max_cluster_radius + 1) as usize;
        size as usize * side * side * side
    }

    fn skeleton_point<R: RandomStream + ?Sized>(
        &self,
        center: WorldCoord,
        step: u32,
        size: u32,
        rng: &mut R,
    ) -> WorldCoord {
        let progress = step as f32 / size as f32;
        let angle1 = rng.next_f32() * TAU;
        let angle2 = rng.next_f32() * TAU;

        // Angles are drawn in single precision; trig and scaling run in double.
        let (a1, a2) = (angle1 as f64, angle2 as f64);
        let (p, r) = (progress as f64, self.growth_radius);
        let offset = IVec3::new(
            (a1.cos() * p * r) as i32,
            (a1.sin() * a2.cos() * p * r) as i32,
            (a2.sin() * p * r) as i32,
        );
        center + offset
    }
}

/// Cursor over the cube of one growth step.
#[derive(Debug, Clone, Copy)]
struct Cluster {
    origin: WorldCoord,
    radius: i32,
    offset: IVec3,
}

impl Cluster {
    fn new(origin: WorldCoord, radius: i32) -> Self {
        Self {
            origin,
            radius,
            offset: IVec3::splat(-radius),
        }
    }

    fn exhausted(&self) -> bool {
        self.offset.x > self.radius
    }

    /// Step the cursor in x -> y -> z nesting order (z innermost).
    fn advance(&mut self) {
        let r = self.radius;
        self.offset.z += 1;
        if self.offset.z > r {
            self.offset.z = -r;
            self.offset.y += 1;
            if self.offset.y > r {
                self.offset.y = -r;
                self.offset.x += 1;
            }
        }
    }
}

/// Iterator returned by [`VeinShapeGenerator::generate`].
pub struct VeinShape<'r, R: RandomStream + ?Sized> {
    shape: VeinShapeGenerator,
    rng: &'r mut R,
    center: WorldCoord,
    size: u32,
    step: u32,
    cluster: Option<Cluster>,
}

impl<R: RandomStream + ?Sized> Iterator for VeinShape<'_, R> {
    type Item = WorldCoord;

    fn next(&mut self) -> Option<WorldCoord> {
        loop {
            if let Some(cluster) = self.cluster.as_mut() {
                while !cluster.exhausted() {
                    let offset = cluster.offset;
                    cluster.advance();

                    let dist = ((offset.x * offset.x + offset.y * offset.y + offset.z * offset.z)
                        as f64)
                        .sqrt();
                    let jitter = self.rng.next_f32() as f64 * self.shape.jitter;
                    if dist <= cluster.radius as f64 + jitter {
                        return Some(cluster.origin + offset);
                    }
                }
                self.cluster = None;
            }

            if self.step >= self.size {
                return None;
            }

            let origin = self
                .shape
                .skeleton_point(self.center, self.step, self.size, self.rng);
            let spread = self.shape.max_cluster_radius - self.shape.min_cluster_radius + 1;
            let radius = self.shape.min_cluster_radius + self.rng.next_int(spread);
            self.cluster = Some(Cluster::new(origin, radius));
            self.step += 1;
        }
    }
}
