use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use ll_core::{GaussianNoise, ZeroNoise};
use ll_project::schema::{ArxDef, GenTermDef, PidDef, SignalDef, SimulationConfig};
use ll_project::{load_json, save_json, ProjectResult};
use ll_sim::SimTrace;

#[derive(Parser)]
#[command(name = "ll-cli")]
#[command(about = "looplab CLI - closed-loop ARX/PID simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample configuration file
    Init {
        /// Destination path for the JSON configuration
        config_path: PathBuf,
    },
    /// Validate configuration file syntax and structure
    Validate {
        /// Path to the configuration JSON file
        config_path: PathBuf,
    },
    /// Run a closed-loop simulation
    Run {
        /// Path to the configuration JSON file
        config_path: PathBuf,
        /// Seed for the noise source (omit for OS entropy)
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ProjectResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { config_path } => cmd_init(&config_path),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            seed,
            output,
        } => cmd_run(&config_path, seed, output.as_deref()),
    }
}

fn cmd_init(config_path: &Path) -> ProjectResult<()> {
    let config = sample_config();
    save_json(config_path, &config)?;
    println!("✓ Wrote sample configuration to {}", config_path.display());
    Ok(())
}

fn cmd_validate(config_path: &Path) -> ProjectResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = load_json(config_path)?;
    println!("✓ Configuration is valid");
    println!(
        "  ARX: |A|={} |B|={} k={} ns_var={}",
        config.arx.a.len(),
        config.arx.b.len(),
        config.arx.k,
        config.arx.ns_var
    );
    println!(
        "  PID: P={} I={} D={}",
        config.pid.p, config.pid.i, config.pid.d
    );
    println!("  Generator entries: {}", config.gen.len());
    println!("  Steps: {}", config.len);
    Ok(())
}

fn cmd_run(config_path: &Path, seed: Option<u64>, output: Option<&Path>) -> ProjectResult<()> {
    let config = load_json(config_path)?;
    let mut sim = config.build_simulation();

    info!(len = config.len, seed = ?seed, "starting run");
    let trace = if config.arx.ns_var == 0.0 {
        sim.run(&mut ZeroNoise)
    } else {
        let mut noise = match seed {
            Some(seed) => GaussianNoise::seeded(seed),
            None => GaussianNoise::from_entropy(),
        };
        sim.run(&mut noise)
    };

    write_trace(&trace, output)?;

    if let Some(last) = trace.records.last() {
        println!("✓ Simulation completed: {} steps", trace.len());
        println!(
            "  Final: setpoint={:.6} error={:.6} output={:.6}",
            last.setpoint, last.error, last.output
        );
    }
    Ok(())
}

fn write_trace(trace: &SimTrace, output: Option<&Path>) -> ProjectResult<()> {
    let mut csv = String::from("step,setpoint,error,control,output\n");
    for r in &trace.records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.step, r.setpoint, r.error, r.control, r.output
        ));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} records to {}", trace.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn sample_config() -> SimulationConfig {
    SimulationConfig {
        arx: ArxDef {
            a: vec![-0.4],
            b: vec![0.6],
            k: 1,
            ns_var: 0.0,
        },
        pid: PidDef {
            p: 0.5,
            i: 0.25,
            d: 0.0,
        },
        gen: vec![GenTermDef {
            weight: 1.0,
            signal: SignalDef::Delay {
                offset: 5,
                inner: Box::new(SignalDef::Const),
            },
        }],
        len: 100,
    }
}
