pub mod command;
pub mod dispatch;
pub mod spawner;

use crossbeam_channel::Sender;
use glam::{IVec3, Vec3};
use lodestone_core::math::{voxel_at, within_world};
use lodestone_core::{MaterialCatalog, MaterialRegistry, OreConfig};

pub use command::{help_text, is_root, CommandError, VeinCommand, ALIASES, ROOT};
pub use dispatch::{job_channel, JobQueue, JobSender, VeinJob, WorldJob};
pub use spawner::{BatchReport, OperatorVeinSpawner};

/// The player or console issuing a command, as seen by this crate.
pub trait Operator {
    /// Current position in world space, if the host can tell.
    fn position(&self) -> Option<Vec3>;

    /// Privileged or creative-mode context.
    fn is_privileged(&self) -> bool;

    /// Show a line to the operator right away.
    fn send_message(&mut self, text: &str);

    /// Channel for messages produced later on the world thread.
    fn mailbox(&self) -> Sender<String>;
}

/// Command front end: validates a request on the calling thread and hands
/// the voxel work to the world thread.
pub struct VeinCommands {
    config: OreConfig,
    jobs: JobSender,
}

impl VeinCommands {
    pub fn new(config: OreConfig, jobs: JobSender) -> Self {
        Self { config, jobs }
    }

    pub fn config(&self) -> &OreConfig {
        &self.config
    }

    /// Run one command. Failures are shown to the operator and also returned.
    ///
    /// The ore catalog is resolved on every call, so a host that registers
    /// the ore late starts working without a restart.
    pub fn execute(
        &self,
        operator: &mut dyn Operator,
        registry: &dyn MaterialRegistry,
        args: &[&str],
    ) -> Result<(), CommandError> {
        let result = self.dispatch(operator, registry, args);
        if let Err(e) = &result {
            operator.send_message(&e.to_string());
        }
        result
    }

    fn dispatch(
        &self,
        operator: &mut dyn Operator,
        registry: &dyn MaterialRegistry,
        args: &[&str],
    ) -> Result<(), CommandError> {
        if !operator.is_privileged() {
            return Err(CommandError::NotPermitted);
        }
        let command = VeinCommand::parse(args, &self.config)?;
        if command == VeinCommand::Help {
            operator.send_message(&help_text(&self.config));
            return Ok(());
        }

        let position = operator
            .position()
            .filter(|p| within_world(*p))
            .ok_or(CommandError::PositionUnavailable)?;
        let catalog = MaterialCatalog::resolve(registry, &self.config)?;
        let at = voxel_at(position);
        let ore = &self.config.ore_material;

        let (job, ack) = match command {
            VeinCommand::Spawn { size } => {
                let center = at - IVec3::new(0, self.config.spawn_depth, 0);
                let ack = format!(
                    "Spawning {ore} vein of size {size} at ({}, {}, {})...",
                    center.x, center.y, center.z
                );
                (VeinJob::Spawn { center, size }, ack)
            }
            VeinCommand::Generate { radius, count } => {
                let ack = format!("Generating {count} {ore} veins in radius {radius}...");
                let job = VeinJob::Generate {
                    origin: at,
                    radius,
                    count,
                };
                (job, ack)
            }
            VeinCommand::Help => return Ok(()),
        };

        let queued = self.jobs.submit(WorldJob {
            job,
            catalog,
            reply: operator.mailbox(),
        });
        if !queued {
            log::warn!("World job queue is closed; {job:?} dropped");
            return Err(CommandError::WorldUnavailable);
        }
        log::info!("Queued operator job {job:?}");
        operator.send_message(&ack);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};
    use glam::IVec2;
    use lodestone_core::material::default_host_materials;
    use lodestone_core::{MaterialId, MaterialTable};
    use lodestone_world::chunk::ChunkColumn;
    use lodestone_world::chunk_map::ChunkMap;

    struct TestOperator {
        position: Option<Vec3>,
        privileged: bool,
        messages: Vec<String>,
        mailbox: Sender<String>,
    }

    impl TestOperator {
        fn at(position: Vec3) -> (Self, Receiver<String>) {
            let (mailbox, inbox) = unbounded();
            let op = Self {
                position: Some(position),
                privileged: true,
                messages: Vec::new(),
                mailbox,
            };
            (op, inbox)
        }
    }

    impl Operator for TestOperator {
        fn position(&self) -> Option<Vec3> {
            self.position
        }
        fn is_privileged(&self) -> bool {
            self.privileged
        }
        fn send_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
        fn mailbox(&self) -> Sender<String> {
            self.mailbox.clone()
        }
    }

    /// Host registry that has not registered the ore.
    struct WithoutOre(MaterialTable);

    impl MaterialRegistry for WithoutOre {
        fn resolve(&self, name: &str) -> Option<MaterialId> {
            if name == "Ore_Tin_Stone" {
                None
            } else {
                self.0.resolve(name)
            }
        }
    }

    fn host() -> (VeinCommands, JobQueue, MaterialTable) {
        let (sender, queue) = job_channel();
        let table = default_host_materials().expect("host table");
        (VeinCommands::new(OreConfig::default(), sender), queue, table)
    }

    #[test]
    fn test_spawn_round_trip_through_world_thread() {
        let (commands, queue, table) = host();
        let catalog = MaterialCatalog::resolve(&table, commands.config()).expect("catalog");
        let mut world = ChunkMap::new();
        for cx in 2..=4 {
            for cz in 5..=7 {
                world.insert(ChunkColumn::filled(IVec2::new(cx, cz), catalog.primary_stone()));
            }
        }
        let mut spawner = OperatorVeinSpawner::with_seed(OreConfig::default(), 21);
        let (mut op, inbox) = TestOperator::at(Vec3::new(100.7, 64.2, 200.1));

        commands
            .execute(&mut op, &table, &["spawn", "999"])
            .expect("command accepted");
        assert_eq!(
            op.messages,
            vec!["Spawning Ore_Tin_Stone vein of size 15 at (100, 62, 200)...".to_string()]
        );
        assert_eq!(queue.run_pending(&mut world, &mut spawner), 1);
        let result = inbox.try_recv().expect("deferred result");
        assert!(result.ends_with("at (100, 62, 200)"), "{result}");
    }

    #[test]
    fn test_generate_acknowledged_with_clamped_values() {
        let (commands, queue, table) = host();
        let (mut op, _inbox) = TestOperator::at(Vec3::new(-3.5, 70.0, 8.0));
        commands
            .execute(&mut op, &table, &["generate", "0", "500"])
            .expect("command accepted");
        assert_eq!(op.messages, vec!["Generating 100 Ore_Tin_Stone veins in radius 1...".to_string()]);
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_missing_ore_reported_every_time() {
        let (commands, queue, table) = host();
        let registry = WithoutOre(table);
        let (mut op, _inbox) = TestOperator::at(Vec3::ZERO);
        for _ in 0..2 {
            let err = commands.execute(&mut op, &registry, &["spawn"]);
            assert!(matches!(
                err,
                Err(CommandError::Catalog(lodestone_core::CatalogError::OreUnresolved { .. }))
            ));
        }
        assert_eq!(op.messages.len(), 2);
        assert!(op.messages[0].contains("Ore_Tin_Stone"));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_position_required() {
        let (commands, queue, table) = host();
        let (mut op, _inbox) = TestOperator::at(Vec3::ZERO);
        op.position = None;
        assert_eq!(
            commands.execute(&mut op, &table, &["generate"]),
            Err(CommandError::PositionUnavailable)
        );
        assert_eq!(op.messages, vec!["Could not get your position".to_string()]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_unusable_position_refused() {
        let (commands, queue, table) = host();
        for position in [
            Vec3::new(f32::NAN, 64.0, 0.0),
            Vec3::new(0.0, 64.0, 1.0e12),
        ] {
            let (mut op, _inbox) = TestOperator::at(position);
            assert_eq!(
                commands.execute(&mut op, &table, &["spawn"]),
                Err(CommandError::PositionUnavailable)
            );
        }
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_closed_world_queue_reported() {
        let (commands, queue, table) = host();
        drop(queue);
        let (mut op, inbox) = TestOperator::at(Vec3::new(100.0, 64.0, 200.0));
        assert_eq!(
            commands.execute(&mut op, &table, &["spawn"]),
            Err(CommandError::WorldUnavailable)
        );
        assert_eq!(
            op.messages,
            vec!["The world is not accepting ore jobs right now".to_string()]
        );
        assert!(inbox.try_recv().is_err());
    }

    #[test]
    fn test_unprivileged_operator_refused() {
        let (commands, queue, table) = host();
        let (mut op, _inbox) = TestOperator::at(Vec3::ZERO);
        op.privileged = false;
        assert_eq!(
            commands.execute(&mut op, &table, &["spawn", "3"]),
            Err(CommandError::NotPermitted)
        );
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_help_does_not_queue() {
        let (commands, queue, table) = host();
        let (mut op, _inbox) = TestOperator::at(Vec3::ZERO);
        commands.execute(&mut op, &table, &[]).expect("help");
        assert!(op.messages[0].starts_with("/lodestone"));
        assert_eq!(queue.pending(), 0);
    }
}
