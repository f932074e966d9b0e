mod viewer;

use clap::{Parser, Subcommand};
use gravsim_core::{BoundaryPolicy, SceneConfig, Simulation};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gravsim")]
#[command(about = "Interactive 2D gravitational N-body simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    Run {
        /// Scene file (JSON); the stock scene is used when omitted
        #[arg(long)]
        scene: Option<PathBuf>,
        /// Let bodies leave the domain instead of bouncing off the walls
        #[arg(long)]
        no_boundary: bool,
    },
    /// Run without a window using a fixed time step and print the final state
    Simulate {
        #[arg(long)]
        scene: Option<PathBuf>,
        #[arg(long)]
        no_boundary: bool,
        /// Number of steps to run
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        /// Seconds per step
        #[arg(long, default_value_t = 1e-3)]
        dt: f32,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { scene, no_boundary } => viewer::run(scene, no_boundary),
        Commands::Simulate {
            scene,
            no_boundary,
            steps,
            dt,
        } => simulate(scene.as_deref(), no_boundary, steps, dt),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load a scene and build a simulation from it
///
/// Also returns the scene's wall policy, so walls switched off here or in
/// the viewer come back with the scene's restitution.
pub(crate) fn load_simulation(
    scene: Option<&Path>,
    no_boundary: bool,
) -> Result<(Simulation, BoundaryPolicy), gravsim_core::SimError> {
    let config = match scene {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    let mut sim = config.build()?;
    if no_boundary {
        sim.set_boundary(BoundaryPolicy::Open);
    }
    Ok((sim, config.wall_policy()))
}

fn simulate(
    scene: Option<&Path>,
    no_boundary: bool,
    steps: usize,
    dt: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(format!("dt must be a non-negative number, got {}", dt).into());
    }

    let (mut sim, _) = load_simulation(scene, no_boundary)?;
    sim.run(steps, dt);

    for (id, body) in sim.store().iter() {
        println!(
            "{} #{}: pos = ({:.6}, {:.6}) vel = ({:.6}, {:.6}) mass = {} {}",
            id.kind,
            id.index,
            body.pos.x,
            body.pos.y,
            body.vel.x,
            body.vel.y,
            body.mass,
            body.mass_unit().label(),
        );
    }

    Ok(())
}
