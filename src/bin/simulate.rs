//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 100 one-hour runs
//!   cargo run --bin simulate -- -n 20 --map tidalCaves # time to unlock a map
//!   cargo run --bin simulate -- --seed 42             # reproducible run

use std::env;
use std::process;

use exile::simulator::{run_simulation, SimConfig};
use exile::EngineConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("run with --help for usage");
            process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 EXILE BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Seconds/Run:    {}", config.max_seconds_per_run);
    println!("  Tick Rate:      {} Hz", config.engine.tick_rate_hz);
    println!("  Auto Equip:     {}", config.auto_equip);
    if let Some(target) = &config.target_map_id {
        println!("  Target Map:     {}", target);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());
    if options.level_curve {
        println!("{}", report.level_curve_text());
    }

    if options.json {
        let json = match report.to_json() {
            Ok(json) => json,
            Err(err) => {
                eprintln!("failed to serialize report: {}", err);
                process::exit(1);
            }
        };
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(err) = std::fs::write(&filename, json) {
            eprintln!("failed to write {}: {}", filename, err);
            process::exit(1);
        }
        println!("JSON report saved to: {}", filename);
    }
}

#[derive(Default)]
struct Options {
    json: bool,
    level_curve: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, Options), String> {
    let mut config = SimConfig::default();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = value(args, i, flag)?
                    .parse()
                    .map_err(|_| format!("{} expects a whole number", flag))?;
                i += 1;
            }
            "-s" | "--seconds" => {
                config.max_seconds_per_run = value(args, i, flag)?
                    .parse()
                    .map_err(|_| format!("{} expects a number of seconds", flag))?;
                i += 1;
            }
            "--seed" => {
                config.seed = Some(
                    value(args, i, flag)?
                        .parse()
                        .map_err(|_| format!("{} expects a whole number", flag))?,
                );
                i += 1;
            }
            "-m" | "--map" => {
                config.target_map_id = Some(value(args, i, flag)?.to_string());
                i += 1;
            }
            "-c" | "--config" => {
                let path = value(args, i, flag)?;
                let text = std::fs::read_to_string(path)
                    .map_err(|err| format!("cannot read {}: {}", path, err))?;
                config.engine = EngineConfig::from_json_str(&text).map_err(|err| err.to_string())?;
                i += 1;
            }
            "--no-equip" => config.auto_equip = false,
            "--level-curve" => options.level_curve = true,
            "--json" => options.json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "--quick" => config = SimConfig::quick(),
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option {}", other)),
        }
        i += 1;
    }

    Ok((config, options))
}

fn print_help() {
    println!("Exile Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>       Number of simulated characters (default: 100)");
    println!("    -s, --seconds <S>    Game seconds per run (default: 3600)");
    println!("    --seed <S>           Random seed for reproducibility");
    println!("    -m, --map <ID>       Stop each run once this map unlocks");
    println!("    -c, --config <FILE>  Engine config JSON");
    println!("    --no-equip           Never wear drops");
    println!("    --level-curve        Show level-up pacing");
    println!("    --json               Save JSON report");
    println!("    --quick              Quick check (10 runs of 10 minutes)");
    println!("    -v, --verbose        Per-run output");
    println!("    -h, --help           Show this help");
    println!();
    println!("Set RUST_LOG=exile=debug to trace engine decisions.");
}
