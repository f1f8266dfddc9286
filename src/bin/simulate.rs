//! Fencing balance simulator CLI.
//!
//! Rolls thousands of lunges per distance through the real resolver and
//! compares measured hit rates with the table. Optionally plays scripted
//! duels through the full match controller.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 10,000 lunges per distance
//!   cargo run --bin simulate -- -d 200 -p 10    # 200 scripted duels to 10 points
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use fencing::duel::PointsToWin;
use fencing::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'simulate --help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              FENCING BALANCE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Lunges/distance: {}", config.trials_per_distance);
    println!("  Max distance:    {}", config.max_distance);
    if config.num_duels > 0 {
        println!(
            "  Duels:           {} to {} points",
            config.num_duels,
            config.points_to_win.points()
        );
    }
    if let Some(seed) = config.seed {
        println!("  Seed:            {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("simulation failed: {}", e);
            eprintln!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, json) {
            eprintln!("Failed to write JSON report: {}", e);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--trials" => {
                config.trials_per_distance = parse_value(args, &mut i)?;
            }
            "-m" | "--max-distance" => {
                config.max_distance = parse_value(args, &mut i)?;
            }
            "-d" | "--duels" => {
                config.num_duels = parse_value(args, &mut i)?;
            }
            "-p" | "--points" => {
                let points: u32 = parse_value(args, &mut i)?;
                config.points_to_win = PointsToWin::try_from(points).map_err(|e| e.to_string())?;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value(args, &mut i)?);
            }
            "-f" | "--frames" => {
                config.max_frames_per_duel = parse_value(args, &mut i)?;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig {
                    seed: config.seed,
                    ..SimConfig::quick()
                };
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--json" => {}
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    let value = args
        .get(*i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    *i += 1;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn print_help() {
    println!("Fencing Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --trials <N>        Lunges rolled per distance (default: 10,000)");
    println!("    -m, --max-distance <D>  Largest distance to measure (default: 9)");
    println!("    -d, --duels <N>         Scripted duels to play (default: 0)");
    println!("    -p, --points <P>        Points to win for duels: 5, 10 or 15 (default: 5)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -f, --frames <F>        Frame cap per duel (default: 200,000)");
    println!("    -v, --verbose           Verbose output");
    println!("    --json                  Save JSON report");
    println!("    --quick                 Quick check (1,000 lunges per distance)");
    println!("    -h, --help              Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                     # Default run");
    println!("    cargo run --bin simulate -- -d 200 -p 10     # 200 duels to 10 points");
    println!("    cargo run --bin simulate -- --seed 42        # Reproducible");
}
