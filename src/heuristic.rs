//! Distance-to-target estimates for the informed strategies.

use std::fmt;
use std::str::FromStr;

use crate::brick::{BrickState, Coord};
use crate::config::ConfigError;
use crate::grid::Grid;

/// Distance metric from a cell to the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Grid distance, `|dx| + |dy|`.
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Euclidean, Heuristic::Manhattan];

    pub fn distance(self, (x1, y1): Coord, (x2, y2): Coord) -> f64 {
        let dx = f64::from(x1 - x2);
        let dy = f64::from(y1 - y2);
        match self {
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Manhattan => dx.abs() + dy.abs(),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            _ => Err(ConfigError::UnknownHeuristic(s.to_string())),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
        })
    }
}

/// Per-cell estimated distance to the target, indexed like the grid.
///
/// Holes cost `f64::INFINITY` so a brick touching one is never preferred.
#[derive(Clone, Debug)]
pub struct CostTable {
    width: usize,
    height: usize,
    costs: Vec<f64>,
}

impl CostTable {
    pub fn build(grid: &Grid, target: Coord, heuristic: Heuristic) -> Self {
        let costs = grid
            .cells()
            .map(|(cell, tile)| {
                if tile.is_solid() {
                    heuristic.distance(cell, target)
                } else {
                    f64::INFINITY
                }
            })
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            costs,
        }
    }

    /// Estimate for one cell; anything outside the grid is infinite.
    #[inline]
    pub fn cell_cost(&self, (x, y): Coord) -> f64 {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.costs[y as usize * self.width + x as usize]
        } else {
            f64::INFINITY
        }
    }

    /// Estimate for a brick: the nearer of its covered cells.
    #[inline]
    pub fn estimate(&self, state: &BrickState) -> f64 {
        state
            .cells()
            .as_slice()
            .iter()
            .map(|&cell| self.cell_cost(cell))
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brick::Orientation;
    use crate::level::Level;

    #[test]
    fn test_distances() {
        assert_eq!(Heuristic::Euclidean.distance((0, 0), (3, 4)), 5.0);
        assert_eq!(Heuristic::Manhattan.distance((0, 0), (3, 4)), 7.0);
        assert_eq!(Heuristic::Manhattan.distance((5, 1), (2, 3)), 5.0);
    }

    #[test]
    fn test_holes_and_outside_are_infinite() {
        let level = Level::sample();
        let table = CostTable::build(level.grid(), level.target(), Heuristic::Manhattan);
        assert_eq!(table.cell_cost((7, 4)), 0.0);
        assert_eq!(table.cell_cost((0, 4)), f64::INFINITY);
        assert_eq!(table.cell_cost((-1, 0)), f64::INFINITY);
        assert_eq!(table.cell_cost((10, 0)), f64::INFINITY);
    }

    #[test]
    fn test_lying_brick_takes_nearer_cell() {
        let level = Level::sample();
        let table = CostTable::build(level.grid(), level.target(), Heuristic::Manhattan);

        assert_eq!(table.estimate(&BrickState::standing(1, 1)), 9.0);
        // covers (5, 4) and (6, 4)
        let horizontal = BrickState::new(5, 4, Orientation::Horizontal);
        assert_eq!(table.estimate(&horizontal), 1.0);
        // covers (7, 2) and (7, 3)
        let vertical = BrickState::new(7, 2, Orientation::Vertical);
        assert_eq!(table.estimate(&vertical), 1.0);
    }

    #[test]
    fn test_heuristic_names() {
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.to_string().parse::<Heuristic>(), Ok(heuristic));
        }
        assert!("chebyshev".parse::<Heuristic>().is_err());
    }
}
