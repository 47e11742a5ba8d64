use orbitsim::{IntegratorConfig, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Newtonian orbit simulator")]
struct Args {
    /// Scenario file, looked up under `scenarios/` when not found as given
    #[arg(short, default_value = "earth_moon.yaml")]
    file_name: String,

    /// Record the total energy after every step
    #[arg(long)]
    energy: bool,

    /// Override the configured integrator (euler or verlet)
    #[arg(long)]
    integrator: Option<IntegratorConfig>,
}

fn resolve_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let config_path = resolve_path(&args.file_name);
    let mut cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if args.energy {
        cfg.simulation.track_energy = true;
    }
    if let Some(integrator) = args.integrator {
        cfg.simulation.integrator = integrator;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = load_scenario(&args)?;

    let mut scenario = Scenario::build_scenario(cfg)?;
    let initial_energy = scenario.simulation.total_energy();
    let steps = scenario.run()?;

    info!(
        steps,
        elapsed = scenario.simulation.elapsed(),
        integrator = ?scenario.simulation.engine().integrator,
        "simulation finished"
    );
    for body in scenario.simulation.bodies() {
        info!(body = body.name(), x = body.x.x, y = body.x.y, z = body.x.z, "final position");
    }
    if let Some(&last) = scenario.simulation.energy().and_then(|e| e.last()) {
        let drift = ((last - initial_energy) / initial_energy).abs();
        info!(initial = initial_energy, last, relative_drift = drift, "energy");
    }

    let animation_duration = scenario.parameters.animation_duration;
    let history = scenario.simulation.into_history();

    #[cfg(feature = "viewer")]
    orbitsim::run_replay(history.trajectory, animation_duration);

    #[cfg(not(feature = "viewer"))]
    info!(
        samples = history.trajectory.len(),
        animation_duration,
        "built without the `viewer` feature, skipping replay"
    );

    Ok(())
}
