use crossbeam_channel::{unbounded, Receiver, Sender};
use lodestone_core::{MaterialCatalog, VoxelWorld, WorldCoord};

use crate::spawner::OperatorVeinSpawner;

/// Voxel work requested by an operator, run later on the world thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeinJob {
    Spawn { center: WorldCoord, size: i32 },
    Generate { origin: WorldCoord, radius: i32, count: i32 },
}

/// A job together with what it needs to run and where its result goes.
#[derive(Debug)]
pub struct WorldJob {
    pub job: VeinJob,
    pub catalog: MaterialCatalog,
    pub reply: Sender<String>,
}

/// Create a linked sender/queue pair.
pub fn job_channel() -> (JobSender, JobQueue) {
    let (tx, rx) = unbounded();
    (JobSender { tx }, JobQueue { rx })
}

/// Command-side handle. Cloneable across command threads.
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: Sender<WorldJob>,
}

impl JobSender {
    /// Queue a job. Returns false when the world side has shut down.
    pub fn submit(&self, job: WorldJob) -> bool {
        self.tx.send(job).is_ok()
    }
}

/// World-side end. Only the thread that mutates voxels drains it.
#[derive(Debug)]
pub struct JobQueue {
    rx: Receiver<WorldJob>,
}

impl JobQueue {
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Run every queued job to completion and post each result to its
    /// operator. Returns the number of jobs run.
    pub fn run_pending(
        &self,
        world: &mut dyn VoxelWorld,
        spawner: &mut OperatorVeinSpawner,
    ) -> usize {
        let mut ran = 0;
        for WorldJob {
            job,
            catalog,
            reply,
        } in self.rx.try_iter()
        {
            let message = run_job(job, &catalog, world, spawner);
            if reply.send(message).is_err() {
                log::warn!("Operator left before {job:?} finished; result dropped");
            }
            ran += 1;
        }
        ran
    }
}

fn run_job(
    job: VeinJob,
    catalog: &MaterialCatalog,
    world: &mut dyn VoxelWorld,
    spawner: &mut OperatorVeinSpawner,
) -> String {
    match job {
        VeinJob::Spawn { center, size } => {
            let report = spawner.spawn(catalog, world, center, size);
            log::info!(
                "Operator vein at ({}, {}, {}): {} of {} candidates placed",
                center.x,
                center.y,
                center.z,
                report.placed,
                report.candidates
            );
            format!(
                "Spawned vein with {} voxels at ({}, {}, {})",
                report.placed, center.x, center.y, center.z
            )
        }
        VeinJob::Generate {
            origin,
            radius,
            count,
        } => {
            let batch = spawner.generate(catalog, world, origin, radius, count);
            log::info!(
                "Operator batch around ({}, {}): {}/{} veins, {} voxels",
                origin.x,
                origin.z,
                batch.veins_created,
                batch.veins_attempted,
                batch.voxels_placed
            );
            format!(
                "Generated {} veins with {} total ore voxels",
                batch.veins_created, batch.voxels_placed
            )
        }
    }
}
