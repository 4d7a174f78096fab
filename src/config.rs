//! Search configuration and the errors raised while validating it.

use std::fmt;
use std::str::FromStr;

use crate::brick::{BrickState, DirectionOrder};
use crate::heuristic::Heuristic;

/// Which search strategy to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Greedy,
    #[default]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    /// Whether the strategy orders its frontier by a heuristic estimate.
    pub const fn is_informed(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar)
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ucs" => Ok(Strategy::Ucs),
            "greedy" | "greedy_bfs" => Ok(Strategy::Greedy),
            "astar" | "a-star" => Ok(Strategy::AStar),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Ucs => "ucs",
            Strategy::Greedy => "greedy",
            Strategy::AStar => "astar",
        })
    }
}

/// Everything a single search run needs besides the level itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub order: DirectionOrder,
    /// Only consulted by `Greedy` and `AStar`.
    pub heuristic: Heuristic,
    /// Maximum number of nodes to expand before giving up.
    pub step_limit: Option<usize>,
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: DirectionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

/// A problem with the level or the search parameters, found before searching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidOrder(String),
    UnknownStrategy(String),
    UnknownHeuristic(String),
    UnknownStyle(String),
    EmptyGrid,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownTile {
        x: usize,
        y: usize,
        code: char,
    },
    TargetCount(usize),
    StartOffMap(BrickState),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOrder(order) => write!(
                f,
                "bad search order '{order}': must be a permutation of the characters 'L', 'R', 'U', 'D'"
            ),
            ConfigError::UnknownStrategy(name) => write!(
                f,
                "unknown search strategy '{name}': expected one of bfs, dfs, ucs, greedy, astar"
            ),
            ConfigError::UnknownHeuristic(name) => write!(
                f,
                "unknown heuristic '{name}': expected euclidean or manhattan"
            ),
            ConfigError::UnknownStyle(name) => {
                write!(f, "unknown display style '{name}': expected ascii or unicode")
            }
            ConfigError::EmptyGrid => write!(f, "grid has no rows"),
            ConfigError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {row} has {found} cells, expected {expected}"
            ),
            ConfigError::UnknownTile { x, y, code } => write!(
                f,
                "unknown tile '{code}' at x={x}, y={y}: expected 0 (hole), 1 (tile) or 9 (target)"
            ),
            ConfigError::TargetCount(count) => write!(
                f,
                "grid must contain exactly one target tile, found {count}"
            ),
            ConfigError::StartOffMap(state) => {
                write!(f, "start position {state} is off the map")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_and_aliases() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("greedy_bfs".parse::<Strategy>(), Ok(Strategy::Greedy));
        assert_eq!("a-star".parse::<Strategy>(), Ok(Strategy::AStar));
        assert_eq!(
            "bogo".parse::<Strategy>(),
            Err(ConfigError::UnknownStrategy("bogo".to_string()))
        );
    }

    #[test]
    fn test_default_config_matches_cli_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, Strategy::AStar);
        assert_eq!(config.order.to_string(), "LRUD");
        assert_eq!(config.heuristic, Heuristic::Euclidean);
        assert_eq!(config.step_limit, None);
    }

    #[test]
    fn test_errors_name_the_violated_constraint() {
        let message = ConfigError::InvalidOrder("LLUD".to_string()).to_string();
        assert!(message.contains("LLUD") && message.contains("permutation"));

        let message = ConfigError::TargetCount(2).to_string();
        assert!(message.contains("exactly one target"), "{message}");
    }
}
