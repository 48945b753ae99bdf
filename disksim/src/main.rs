use disksim::{ScenarioConfig, Scenario};
use disksim::run_window;
use disksim::{bench_gravity, bench_collisions, bench_step_curve};

use clap::Parser;
use anyhow::{bail, Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "2D disk, rope and particle animations")]
struct Args {
    /// Scenario file; bare names are looked up in the crate's scenarios/ directory
    #[arg(short, long, default_value = "disks.yaml")]
    file_name: String,

    /// Advance this many steps without a window and print the final state
    #[arg(long)]
    headless: Option<u64>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        manifest_dir().join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("cannot open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("invalid scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

/// The HUD font must exist before the window opens; a missing font is fatal
fn check_font(font: &str) -> Result<()> {
    let path = manifest_dir().join("assets").join(Path::new(font));
    if !path.is_file() {
        bail!("font not found: {}", path.display());
    }
    Ok(())
}

fn run_headless(mut scenario: Scenario, steps: u64) {
    let mut collisions = 0;
    let mut wall_hits = 0;
    for _ in 0..steps {
        let report = scenario.step();
        collisions += report.collisions;
        wall_hits += report.wall_hits;
    }
    log::info!("{} steps: {} collisions, {} wall hits", steps, collisions, wall_hits);
    println!("{}", scenario.status_line());
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        env_logger::init();
        bench_gravity();
        bench_collisions();
        bench_step_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("failed to build scenario")?;

    match args.headless {
        Some(steps) => {
            // Bevy installs its own logger when a window runs
            env_logger::init();
            run_headless(scenario, steps);
        }
        None => {
            if let Some(font) = &scenario.engine.font {
                check_font(font)?;
            }
            run_window(scenario);
        }
    }

    Ok(())
}
