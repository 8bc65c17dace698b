//! Headless traversal runner: loads a level and rides a character along it.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use glam::Vec3;
use log::{debug, info};
use railwalk::vector_math::project_on_plane;
use railwalk::{
    init_logging, InputSnapshot, KinematicMotor, LevelConfig, PathId, PathRaycaster,
    TraversalEvent, TraversalStateMachine,
};

/// Rides a character along the paths of a level without a renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level description to load
    #[arg(long, default_value = "assets/levels/demo.json")]
    level: PathBuf,
    /// Path to enter; defaults to the first path of the level
    #[arg(long)]
    path: Option<u32>,
    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: usize,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let level = LevelConfig::load(&args.level)
        .and_then(LevelConfig::into_level)
        .with_context(|| format!("loading {}", args.level.display()))?;
    let mut graph = level.graph;
    let Some(start) = args
        .path
        .map(PathId)
        .or_else(|| graph.iter().next().map(railwalk::Path::id))
    else {
        bail!("{} declares no paths", args.level.display());
    };
    let Some(spawn) = graph
        .get(start)
        .map(|path| path.evaluate_world_position(0.0) + Vec3::Y)
    else {
        bail!("{} has no path {start}", args.level.display());
    };

    let mut motor = KinematicMotor::new(spawn, 0.4).with_colliders(level.colliders.clone());
    let mut machine = TraversalStateMachine::new(level.machine);
    machine.enter(&mut graph, &mut motor, start)?;

    for tick in 0..args.ticks {
        motor.begin_tick();
        // Point the camera along the path so forward input follows it.
        let camera = machine
            .active_path()
            .zip(machine.data())
            .and_then(|(id, data)| graph.get(id).map(|path| path.world_forward(data.eval)))
            .map_or(Vec3::Z, |forward| project_on_plane(forward, Vec3::Y));
        machine.set_inputs(&graph, InputSnapshot::from_camera(Vec3::Z, camera));

        let raycaster = PathRaycaster::new(&graph).with_blockers(level.colliders.iter().copied());
        let report = machine.tick(&mut graph, &mut motor, &raycaster, args.dt);
        for event in &report.events {
            match event {
                TraversalEvent::BoundaryReached { path, boundary } => {
                    info!("tick {tick}: {path} reached {boundary:?}");
                }
                other => info!("tick {tick}: {other:?}"),
            }
        }
        debug!(
            "tick {tick}: {:?} at {} (eval {:?})",
            machine.phase(),
            motor.position(),
            machine.data().map(|data| data.eval)
        );
        if report.ended() {
            break;
        }
    }
    info!("finished at {}", motor.position());
    Ok(())
}
