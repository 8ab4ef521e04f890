//! Warband balance simulator CLI.
//!
//! Runs many seeded dungeon runs with the real battle engine and prints a
//! balance report.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulator                                   # 1000 runs of Forest Ruins
//!   cargo run --bin simulator -- --dungeon "Dark Caverns" -n 200
//!   cargo run --bin simulator -- --party warrior:1,cleric:7 --seed 42
//!   RUST_LOG=warband=debug cargo run --bin simulator -- -n 1    # Engine tracing

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use warband::content::ContentTables;
use warband::simulator::{parse_party, run_simulation, SimConfig};

struct CliArgs {
    config: SimConfig,
    content_path: Option<String>,
    json: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    let default_level = if cli.config.verbosity >= 2 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let content = match &cli.content_path {
        Some(path) => match ContentTables::load(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("error: {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => ContentTables::default(),
    };

    if !cli.json {
        print_header(&cli.config);
    }

    let report = match run_simulation(&cli.config, &content) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to encode report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn print_header(config: &SimConfig) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              WARBAND BALANCE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Dungeon:        {}", config.dungeon);
    println!("  Runs:           {}", config.num_runs);
    let party: Vec<String> = config
        .party
        .iter()
        .map(|p| format!("{} (slot {})", p.class.name(), p.slot))
        .collect();
    println!("  Party:          {}", party.join(", "));
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        config: SimConfig::default(),
        content_path: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-d" | "--dungeon" => {
                cli.config.dungeon = value(args, i, flag)?.to_string();
                i += 1;
            }
            "-n" | "--runs" => {
                cli.config.num_runs = value(args, i, flag)?
                    .parse()
                    .map_err(|_| format!("{} expects a number", flag))?;
                i += 1;
            }
            "-s" | "--seed" => {
                cli.config.seed = Some(
                    value(args, i, flag)?
                        .parse()
                        .map_err(|_| format!("{} expects a number", flag))?,
                );
                i += 1;
            }
            "-p" | "--party" => {
                cli.config.party = parse_party(value(args, i, flag)?).map_err(|e| e.to_string())?;
                i += 1;
            }
            "-c" | "--content" => {
                cli.content_path = Some(value(args, i, flag)?.to_string());
                i += 1;
            }
            "--json" => {
                cli.json = true;
            }
            "-v" | "--verbose" => {
                cli.config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(cli)
}

fn print_help() {
    println!("Warband Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulator -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --dungeon <NAME>    Dungeon to run (default: Forest Ruins)");
    println!("    -n, --runs <N>          Number of runs (default: 1000)");
    println!("    -s, --seed <S>          Random seed; run i uses S + i");
    println!("    -p, --party <LIST>      Party as class:slot pairs, e.g. warrior:1,mage:6");
    println!("                            Slots 0-2 front, 3-5 middle, 6-8 back");
    println!("    -c, --content <FILE>    Load classes, abilities and dungeons from JSON");
    println!("    --json                  Print the report as JSON");
    println!("    -v, --verbose           Per-run logging on stderr");
    println!("    -h, --help              Show this help");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=warband=trace) to see engine tracing.");
}
