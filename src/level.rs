//! A playable level: the grid, where the brick starts, and where it must stand.

use crate::brick::{BrickState, Coord, Direction, Orientation};
use crate::config::ConfigError;
use crate::grid::Grid;

/// The first Bloxorz stage as a 6x10 map. The brick starts standing at (1, 1).
pub const SAMPLE_MAP: &str = "
1110000000
1111110000
1111111111
0111111111
0000011911
0000001110
";

/// Start cell of the brick on [`SAMPLE_MAP`].
pub const SAMPLE_START: Coord = (1, 1);

/// A validated search problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    start: BrickState,
    target: Coord,
}

impl Level {
    /// Validates the target count and that the start position is supported.
    pub fn new(grid: Grid, start: BrickState) -> Result<Self, ConfigError> {
        let target = grid.target()?;
        if grid.is_off_map(&start) {
            return Err(ConfigError::StartOffMap(start));
        }

        Ok(Self {
            grid,
            start,
            target,
        })
    }

    /// Parses a map and places the brick standing at `start`.
    pub fn parse(map: &str, start: Coord) -> Result<Self, ConfigError> {
        Self::new(Grid::parse(map)?, BrickState::standing(start.0, start.1))
    }

    pub fn sample() -> Self {
        Self::parse(SAMPLE_MAP, SAMPLE_START).expect("sample map is valid")
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> BrickState {
        self.start
    }

    pub fn target(&self) -> Coord {
        self.target
    }

    /// The brick is solved when it stands upright on the target tile.
    #[inline]
    pub fn is_goal(&self, state: &BrickState) -> bool {
        state.orientation == Orientation::Standing && state.anchor() == self.target
    }

    /// Replays `path` from the start, returning the final state if every
    /// intermediate state is supported.
    pub fn follow(&self, path: &[Direction]) -> Option<BrickState> {
        path.iter().try_fold(self.start, |state, &direction| {
            let next = state.roll(direction);
            (!self.grid.is_off_map(&next)).then_some(next)
        })
    }
}
