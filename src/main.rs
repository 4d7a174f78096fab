//! Bloxorz Solver
//!
//! Loads a level (the built-in first stage by default), rolls the brick to the
//! target with the chosen search strategy and prints the resulting path. With
//! `--trace` every expanded node is printed together with the map.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use bloxorz::level::SAMPLE_MAP;
use bloxorz::render::{self, Style};
use bloxorz::{
    solve, solve_with, Coord, DirectionOrder, Heuristic, Level, Outcome, SearchConfig,
    SearchReport, Step, Strategy,
};

const AFTER_HELP: &str = "\
Search order can be any permutation of the characters 'L', 'R', 'U', 'D'.
Some of the search algorithms (e.g. DFS) may work better when the order favours
the general direction of the target.";

/// Solves a Bloxorz level by searching the brick's state space.
#[derive(Parser)]
#[command(name = "bloxorz")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: Options,
}

#[derive(Clone, Copy, Subcommand)]
enum Command {
    /// Solve the level once and print the path.
    Solve,
    /// Solve with every strategy and direction order and print a summary table.
    Sweep,
    /// Render the level with the brick at its start position.
    Show,
}

#[derive(Args)]
struct Options {
    /// Level file: one row per line, 0 = hole, 1 = tile, 9 = target.
    #[arg(short, long, global = true)]
    level: Option<PathBuf>,

    /// Start cell of the standing brick, as 0-based `x,y`.
    #[arg(long, global = true, default_value = "1,1", value_parser = parse_coord)]
    start: Coord,

    /// Search method: bfs, dfs, ucs, greedy or astar.
    #[arg(short, long, global = true, default_value = "astar")]
    search: Strategy,

    /// Order of search directions.
    #[arg(short, long, global = true, default_value = "LRUD")]
    order: DirectionOrder,

    /// Distance metric for the heuristic cost: euclidean or manhattan.
    #[arg(short, long, global = true, default_value = "euclidean")]
    cost_method: Heuristic,

    /// Map display style: ascii or unicode.
    #[arg(short = 't', long, global = true, default_value = "unicode")]
    style: Style,

    /// Stop after expanding this many nodes.
    #[arg(long, global = true)]
    max_steps: Option<usize>,

    /// Print every expanded node and draw the map.
    #[arg(long, global = true)]
    trace: bool,

    /// Log rejected and added nodes.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Options {
    fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::new(self.search)
            .with_order(self.order)
            .with_heuristic(self.cost_method);
        match self.max_steps {
            Some(limit) => config.with_step_limit(limit),
            None => config,
        }
    }
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    let level = load_level(&cli.options)?;

    match cli.command.unwrap_or(Command::Solve) {
        Command::Solve => run_solver(&level, &cli.options),
        Command::Sweep => run_sweep(&level, &cli.options),
        Command::Show => print!(
            "{}",
            render::render(level.grid(), &level.start(), cli.options.style)
        ),
    }

    Ok(())
}

/// Installs `env_logger`; `--verbose` forces debug output regardless of `RUST_LOG`.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn load_level(options: &Options) -> Result<Level> {
    let map = match &options.level {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path.display()))?,
        None => SAMPLE_MAP.to_string(),
    };

    Level::parse(&map, options.start).context("invalid level")
}

/// Runs one search and prints the outcome.
fn run_solver(level: &Level, options: &Options) {
    let config = options.search_config();
    log::debug!("config: {config:?}, style: {:?}", options.style);

    let report = if options.trace {
        solve_with(level, &config, |step| print_step(level, step, options.style))
    } else {
        solve(level, &config)
    };

    match &report.outcome {
        Outcome::Solved(path) => {
            println!("{} search completed in {} moves:", config.strategy, path.len());
            println!("{}", render::format_path(path));
        }
        Outcome::Exhausted => println!("No solution: every reachable position was explored."),
        Outcome::StepLimit => println!("Gave up after {} steps.", report.expanded),
    }
    println!(
        "Expanded {} positions (generated {} total).",
        report.expanded, report.generated
    );
}

fn print_step(level: &Level, step: &Step, style: Style) {
    match step.priority {
        Some(priority) => println!(
            "Step: {}, Depth: {} - {} [priority: {priority:.2}]",
            step.index, step.depth, step.state
        ),
        None => println!("Step: {}, Depth: {} - {}", step.index, step.depth, step.state),
    }
    println!("{}", render::render(level.grid(), &step.state, style));
}

/// Runs every strategy under every direction order.
fn run_sweep(level: &Level, options: &Options) {
    println!("{}", summary_header());
    for order in DirectionOrder::all() {
        for strategy in Strategy::ALL {
            let heuristics: &[Heuristic] = if strategy.is_informed() {
                &Heuristic::ALL
            } else {
                &[Heuristic::Euclidean]
            };
            for &heuristic in heuristics {
                let mut config = SearchConfig::new(strategy)
                    .with_order(order)
                    .with_heuristic(heuristic);
                config.step_limit = options.max_steps;

                let report = solve(level, &config);
                println!("{}", summary_line(&config, &report));
            }
        }
    }
}

fn summary_header() -> String {
    format!(
        "{:<8} {:<9} {:<5} {:>5} {:>8}",
        "strategy", "heuristic", "order", "moves", "expanded"
    )
}

fn summary_line(config: &SearchConfig, report: &SearchReport) -> String {
    let heuristic = if config.strategy.is_informed() {
        config.heuristic.to_string()
    } else {
        "-".to_string()
    };
    let moves = match &report.outcome {
        Outcome::Solved(path) => path.len().to_string(),
        Outcome::Exhausted => "none".to_string(),
        Outcome::StepLimit => "limit".to_string(),
    };

    format!(
        "{:<8} {:<9} {:<5} {:>5} {:>8}",
        config.strategy.to_string(),
        heuristic,
        config.order.to_string(),
        moves,
        report.expanded
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["bloxorz"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.options.search_config(), SearchConfig::default());
        assert_eq!(cli.options.start, (1, 1));
        assert_eq!(cli.options.style, Style::Unicode);
    }

    #[test]
    fn test_cli_parses_short_option_names() {
        let cli = Cli::try_parse_from([
            "bloxorz", "-s", "a-star", "-o", "DURL", "-c", "manhattan", "-t", "ascii",
            "--max-steps", "40",
        ])
        .unwrap();
        let config = cli.options.search_config();
        assert_eq!(config.strategy, Strategy::AStar);
        assert_eq!(config.order.to_string(), "DURL");
        assert_eq!(config.heuristic, Heuristic::Manhattan);
        assert_eq!(config.step_limit, Some(40));
        assert_eq!(cli.options.style, Style::Ascii);
    }

    #[test]
    fn test_cli_rejects_bad_order_before_searching() {
        for order in ["LLUD", "LRU", "LRUDX"] {
            assert!(
                Cli::try_parse_from(["bloxorz", "--order", order]).is_err(),
                "order {order} should be rejected"
            );
        }
        assert!(Cli::try_parse_from(["bloxorz", "--search", "ida"]).is_err());
        assert!(Cli::try_parse_from(["bloxorz", "--start", "1;1"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["bloxorz", "sweep", "--max-steps", "100"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Sweep)));
        assert_eq!(cli.options.max_steps, Some(100));
    }

    #[test]
    fn test_summary_lines() {
        let level = Level::sample();
        let bfs = SearchConfig::new(Strategy::Bfs);
        let astar = SearchConfig::new(Strategy::AStar).with_heuristic(Heuristic::Manhattan);

        let output = [
            summary_header(),
            summary_line(&bfs, &solve(&level, &bfs)),
            summary_line(&astar, &solve(&level, &astar)),
        ]
        .join("\n");

        insta::assert_snapshot!(output, @r"
        strategy heuristic order moves expanded
        bfs      -         LRUD      7       57
        astar    manhattan LRUD      7       12
        ");
    }
}
