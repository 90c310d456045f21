use physlab::{bench_forces, bench_ticks, Experiment, ExperimentConfig, ExperimentKind, SimulationClock};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Built-in experiment to run: gravity, motion or multiforce
    #[arg(short, long, default_value = "gravity")]
    experiment: String,

    /// Scenario YAML under scenarios/ overriding the built-in templates
    #[arg(short, long)]
    file: Option<String>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// RNG seed for the randomized multiforce initialization
    #[arg(short, long)]
    seed: Option<u64>,

    /// Disable trail capture
    #[arg(long)]
    no_trails: bool,

    /// Run the timing benchmarks instead of an experiment
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_experiment_from_yaml(file_name: &str) -> Result<ExperimentConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let cfg: ExperimentConfig = serde_yaml::from_reader(reader)?;

    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_ticks();
        return Ok(());
    }

    let mut clock = SimulationClock::new();
    clock.set_trails_enabled(!args.no_trails);

    match &args.file {
        Some(file_name) => {
            let cfg = load_experiment_from_yaml(file_name)?;
            let experiment = Experiment::build(cfg)?;
            clock.install(experiment);
        }
        None => match ExperimentKind::from_name(&args.experiment) {
            Some(kind) => clock.select_experiment(kind, args.seed),
            None => clock.select_experiment_named(&args.experiment),
        },
    }

    clock.set_running(true);

    // Stand-in for the display-refresh callback: arm a frame, hand the
    // token back, repeat.
    for _ in 0..args.ticks {
        let token = clock.arm_frame();
        clock.frame(token);
    }

    println!("ran {} ticks", clock.ticks());
    for view in clock.snapshot() {
        println!(
            "particle {:2}: pos = ({:8.3}, {:8.3}), radius = {:6.3}, trail = {} points",
            view.id,
            view.x,
            view.y,
            view.radius,
            view.trail.len()
        );
    }

    Ok(())
}
