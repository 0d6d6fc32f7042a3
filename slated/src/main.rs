//! # SlateOS Host Daemon
//!
//! Main entry point for running the device kernel on a host.

use slated::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    runtime.run();
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut config = HostRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--state-dir" | "-d" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --state-dir".to_string());
                }
                config.state_dir = args[i].clone().into();
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                let script_text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(script_text);
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                config.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--seed-peers" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --seed-peers".to_string());
                }
                config.seed_peers = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid seed-peers value: {}", args[i]))?;
            }
            "--echo-draw" => {
                config.echo_draw = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --state-dir <DIR>    State directory (default: ./slate-state)");
    eprintln!("  -s, --script <FILE>      Touch script file");
    eprintln!("  --max-steps <N>          Ticks to run before exiting (0 = unlimited)");
    eprintln!("  --seed-peers <N>         Announce N demo peers after boot");
    eprintln!("  --echo-draw              Echo drawn text to stdout");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --max-steps 200 --seed-peers 3 --echo-draw", program);
    eprintln!("  {} --script demos/open_settings.touch", program);
}
