use crate::combat::{BattleCalculator, Fleet};
use crate::config::AppConfig;
use crate::data::{
    load_spec_table, validate_spec_table, SpecTable, StandardSpecs, DEFAULT_SPECS_PATH,
};
use crate::error::Result;
use crate::monte_carlo::estimate_odds_parallel;
use crate::parallel::WorkerPool;
use crate::render::{render_report, report_to_csv};

pub const USAGE: &str = "usage: fleetsim <simulate|odds|validate|specs>";
pub const SIMULATE_USAGE: &str =
    "usage: fleetsim simulate <attacker> <defender> [seed] [--json|--csv]  (fleet: type=count,...)";
pub const ODDS_USAGE: &str = "usage: fleetsim odds <attacker> <defender> [trials] [seed]";

const DEFAULT_TRIALS: usize = 1000;
const DEFAULT_ODDS_SEED: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Odds,
    Validate,
    Specs,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("odds") => Some(Command::Odds),
        Some("validate") => Some(Command::Validate),
        Some("specs") => Some(Command::Specs),
        _ => None,
    }
}

pub fn run_with_config(args: &[String], config: &AppConfig) -> i32 {
    let command = parse_command(args);
    tracing::debug!(?command, "dispatching");
    match command {
        Some(Command::Simulate) => handle_simulate(args, config),
        Some(Command::Odds) => handle_odds(args, config),
        Some(Command::Validate) => handle_validate(args, config),
        Some(Command::Specs) => handle_specs(config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// The spec table named by the config, or the built-in one.
pub fn active_spec_table(config: &AppConfig) -> Result<SpecTable> {
    match &config.specs_path {
        Some(path) => load_spec_table(path),
        None => Ok(StandardSpecs::table()),
    }
}

/// Arguments after the command name that are not `--flags`.
fn positional(args: &[String]) -> Vec<&str> {
    args.iter()
        .skip(2)
        .map(String::as_str)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn parse_fleets(attacker: &str, defender: &str) -> Option<(Fleet, Fleet)> {
    let parse = |side: &str, raw: &str| match raw.parse::<Fleet>() {
        Ok(fleet) => Some(fleet),
        Err(err) => {
            eprintln!("invalid {side} fleet: {err}");
            None
        }
    };
    Some((parse("attacker", attacker)?, parse("defender", defender)?))
}

fn load_calculator(config: &AppConfig) -> Option<BattleCalculator<SpecTable>> {
    match active_spec_table(config) {
        Ok(table) => Some(BattleCalculator::new(table)),
        Err(err) => {
            eprintln!("failed to load ship specs: {err}");
            None
        }
    }
}

fn handle_simulate(args: &[String], config: &AppConfig) -> i32 {
    let positional = positional(args);
    let (Some(attacker), Some(defender)) = (positional.first(), positional.get(1)) else {
        eprintln!("{SIMULATE_USAGE}");
        return 2;
    };
    let Some((attacker, defender)) = parse_fleets(attacker, defender) else {
        return 2;
    };
    let seed = positional
        .get(2)
        .and_then(|raw| parse_arg::<u64>(raw, "seed"));
    let Some(calculator) = load_calculator(config) else {
        return 1;
    };

    let result = match seed {
        Some(seed) => calculator.calculate_seeded(&attacker, &defender, seed),
        None => calculator.calculate(&attacker, &defender),
    };
    let report = match result {
        Ok(report) => report,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return 1;
        }
    };

    if has_flag(args, "--json") {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize battle report: {err}");
                return 1;
            }
        }
    } else if has_flag(args, "--csv") {
        match report_to_csv(&report) {
            Ok(payload) => print!("{payload}"),
            Err(err) => {
                eprintln!("failed to export battle report: {err}");
                return 1;
            }
        }
    } else {
        print!("{}", render_report(&report));
    }

    0
}

fn handle_odds(args: &[String], config: &AppConfig) -> i32 {
    let positional = positional(args);
    let (Some(attacker), Some(defender)) = (positional.first(), positional.get(1)) else {
        eprintln!("{ODDS_USAGE}");
        return 2;
    };
    let Some((attacker, defender)) = parse_fleets(attacker, defender) else {
        return 2;
    };
    let trials = positional
        .get(2)
        .and_then(|raw| parse_arg::<usize>(raw, "trials"))
        .unwrap_or(DEFAULT_TRIALS);
    let seed = positional
        .get(3)
        .and_then(|raw| parse_arg::<u64>(raw, "seed"))
        .unwrap_or(DEFAULT_ODDS_SEED);
    let Some(calculator) = load_calculator(config) else {
        return 1;
    };

    let pool = WorkerPool::with_workers(config.workers);
    let estimate = estimate_odds_parallel(&calculator, &attacker, &defender, trials, seed, &pool);
    let summary = match estimate {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("odds estimation failed: {err}");
            return 1;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize odds summary: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String], config: &AppConfig) -> i32 {
    let path = positional(args)
        .first()
        .map(|path| path.to_string())
        .or_else(|| {
            config
                .specs_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_SPECS_PATH.to_string());

    let table = match load_spec_table(&path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("validation failed: could not load '{path}': {err}");
            return 1;
        }
    };

    let report = validate_spec_table(&table);
    for diag in &report.diagnostics {
        eprintln!("- {diag}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {path}");
        0
    }
}

fn handle_specs(config: &AppConfig) -> i32 {
    let table = match active_spec_table(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("failed to load ship specs: {err}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&table) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize ship specs: {err}");
            1
        }
    }
}

/// Parse an optional numeric argument, warning and returning `None` on bad input.
fn parse_arg<T: std::str::FromStr>(raw: &str, name: &str) -> Option<T> {
    let parsed = raw.parse::<T>().ok();
    if parsed.is_none() {
        eprintln!("invalid {name} '{raw}', using default");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["fleetsim", "simulate"])), Some(Command::Simulate));
        assert_eq!(parse_command(&args(&["fleetsim", "odds"])), Some(Command::Odds));
        assert_eq!(parse_command(&args(&["fleetsim", "validate"])), Some(Command::Validate));
        assert_eq!(parse_command(&args(&["fleetsim", "specs"])), Some(Command::Specs));
        assert_eq!(parse_command(&args(&["fleetsim", "serve"])), None);
        assert_eq!(parse_command(&args(&["fleetsim"])), None);
    }

    #[test]
    fn positional_skips_flags() {
        let a = args(&[
            "fleetsim",
            "simulate",
            "--json",
            "light_fighter=1",
            "small_transporter=1",
            "3",
        ]);
        assert_eq!(positional(&a), vec!["light_fighter=1", "small_transporter=1", "3"]);
        assert!(has_flag(&a, "--json"));
        assert!(!has_flag(&a, "--csv"));
    }

    #[test]
    fn missing_fleets_is_usage_error() {
        let config = AppConfig::default();
        assert_eq!(run_with_config(&args(&["fleetsim", "simulate"]), &config), 2);
        let a = args(&["fleetsim", "odds", "light_fighter=1"]);
        assert_eq!(run_with_config(&a, &config), 2);
    }

    #[test]
    fn bad_fleet_is_usage_error() {
        let config = AppConfig::default();
        let a = args(&["fleetsim", "simulate", "light_fighter=-1", "small_transporter=1"]);
        assert_eq!(run_with_config(&a, &config), 2);
    }

    #[test]
    fn seeded_simulation_succeeds() {
        let config = AppConfig::default();
        let a = args(&[
            "fleetsim",
            "simulate",
            "heavy_fighter=10,small_transporter=1",
            "light_fighter=20,small_transporter=3",
            "42",
            "--json",
        ]);
        assert_eq!(run_with_config(&a, &config), 0);
    }

    #[test]
    fn parse_arg_rejects_garbage() {
        assert_eq!(parse_arg::<u64>("12", "seed"), Some(12));
        assert_eq!(parse_arg::<u64>("-4", "seed"), None);
    }
}
