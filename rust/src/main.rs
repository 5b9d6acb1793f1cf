//! Command-line entry point.
//!
//! ```text
//! cpusched <processes.csv> <quantum> [--no-pacing] [--unit-ms <ms>]
//!          [--max-processes <n>] [--algorithm <name>]... [-v|-vv|-vvv]
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use cpusched_rust::logging::clamp_verbosity;
use cpusched_rust::{log_events, run_cpu_scheduler, Algorithm, SimulatorConfig};

const USAGE: &str = "Usage: cpusched <processes.csv> <quantum> [--no-pacing] [--unit-ms <ms>] \
[--max-processes <n>] [--algorithm fcfs|sjf|priority|rr]... [-v|-vv|-vvv]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    path: PathBuf,
    config: SimulatorConfig,
    algorithms: Vec<Algorithm>,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a non-negative integer, got {:?}", flag, value))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut config = SimulatorConfig::default();
    let mut positional: Vec<String> = Vec::new();
    let mut algorithms: Vec<Algorithm> = Vec::new();
    let mut verbosity = 0usize;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-pacing" => config.unit_millis = 0,
            "--unit-ms" => config.unit_millis = parse_number(&arg, args.next())?,
            "--max-processes" => config.max_processes = parse_number(&arg, args.next())?,
            "--algorithm" => {
                let name = args
                    .next()
                    .ok_or_else(|| "--algorithm requires a value".to_string())?;
                let algorithm = Algorithm::from_name(&name)
                    .ok_or_else(|| format!("unknown algorithm {:?}", name))?;
                algorithms.push(algorithm);
            }
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                verbosity += flag.len() - 1;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            _ => positional.push(arg),
        }
    }

    let [path, quantum]: [String; 2] = positional
        .try_into()
        .map_err(|_| "expected <processes.csv> and <quantum>".to_string())?;
    config.quantum = parse_number("<quantum>", Some(quantum))?;
    config.verbosity = clamp_verbosity(verbosity);
    config.validate().map_err(|e| e.to_string())?;

    if algorithms.is_empty() {
        algorithms = Algorithm::ALL.to_vec();
    } else {
        // Always report in the fixed policy order
        algorithms.sort_by_key(|a| Algorithm::ALL.iter().position(|b| b == a));
        algorithms.dedup();
    }

    Ok(CliArgs {
        path: PathBuf::from(path),
        config,
        algorithms,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    log_events!(
        args.config.verbosity,
        "Input {} quantum={} unit_ms={}",
        args.path.display(),
        args.config.quantum,
        args.config.unit_millis
    );

    let stdout = io::stdout();
    match run_cpu_scheduler(
        &args.path,
        &args.config,
        &args.algorithms,
        stdout.lock(),
        args.config.pacer(),
    ) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
