mod report;
mod runner;

use std::path::PathBuf;
use std::process;

use runner::RunConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut output_path: Option<PathBuf> = None;
    let mut config = RunConfig {
        world_seed: 1,
        radius: 8,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                output_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--radius" => {
                config.radius = parse(&args, &mut i, "--radius");
            }
            "--seed" => {
                config.world_seed = parse(&args, &mut i, "--seed");
            }
            "--help" | "-h" => {
                eprintln!("Usage: vein-runner [OPTIONS]");
                eprintln!("  --radius <n>     Half-width of the chunk square (default: 8)");
                eprintln!("  --seed <n>       Terrain seed (default: 1)");
                eprintln!("  --output <path>  Save the run as a JSON report");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let result = match runner::run(&config) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Run failed: {e}");
            process::exit(1);
        }
    };

    println!("\n## Ore Seeding Results\n");
    println!("{}", report::format_markdown(&result));

    let clean = report::is_clean(&result);
    if let Some(ref path) = output_path {
        let saved = report::Report {
            timestamp: format!("run-{}", process::id()),
            result,
        };
        if let Err(e) = report::save_report(path, &saved) {
            log::error!("Failed to save report to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved report to {}", path.display());
    }

    if !clean {
        eprintln!("ERROR: ore placement checks failed, exiting with code 1");
        process::exit(1);
    }
    log::info!("Run complete.");
}

/// Take the value following the flag at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let raw = value(args, i);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid {flag} value: {raw}");
            process::exit(1);
        }
    }
}
