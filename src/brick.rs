//! Brick state and the rolling rule.
//!
//! The brick is a 1x1x2 block. Its position is identified by an anchor cell:
//! the only cell when standing, the left cell when lying horizontally, and the
//! upper cell when lying vertically.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::config::ConfigError;

/// A 2D grid coordinate `(x, y)`, with `y` growing downwards.
pub type Coord = (i32, i32);

/// How the brick rests on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Upright on a single cell.
    Standing,
    /// Lying along the x-axis, covering the anchor and the cell to its right.
    Horizontal,
    /// Lying along the y-axis, covering the anchor and the cell below it.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Standing => "standing",
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        })
    }
}

/// A roll direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The single-letter code used in direction orders.
    pub const fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// A permutation of the four directions, fixing the order in which moves are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionOrder([Direction; 4]);

impl DirectionOrder {
    /// Builds an order, rejecting anything that repeats a direction.
    pub fn new(directions: [Direction; 4]) -> Result<Self, ConfigError> {
        if directions.iter().all_unique() {
            Ok(Self(directions))
        } else {
            Err(ConfigError::InvalidOrder(
                directions.iter().map(|d| d.letter()).collect(),
            ))
        }
    }

    /// Iterates the directions in trial order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().copied()
    }

    /// The direction tried at `position`, or `None` past the last one.
    #[inline]
    pub fn get(&self, position: usize) -> Option<Direction> {
        self.0.get(position).copied()
    }

    /// All 24 direction orders, in lexicographic order of `Direction::ALL` positions.
    pub fn all() -> impl Iterator<Item = DirectionOrder> {
        Direction::ALL
            .into_iter()
            .permutations(4)
            .map(|dirs| Self([dirs[0], dirs[1], dirs[2], dirs[3]]))
    }
}

impl Default for DirectionOrder {
    fn default() -> Self {
        Self([
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ])
    }
}

impl FromStr for DirectionOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidOrder(s.to_string());

        let directions: Vec<Direction> = s
            .chars()
            .map(Direction::from_letter)
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let directions: [Direction; 4] = directions.try_into().map_err(|_| invalid())?;

        Self::new(directions).map_err(|_| invalid())
    }
}

impl fmt::Display for DirectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in self.iter() {
            write!(f, "{}", direction.letter())?;
        }
        Ok(())
    }
}

/// The cells covered by a brick: one when standing, two when lying.
///
/// Fixed-size so that legality checks in the search loop never allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    cells: [Coord; 2],
    len: u8,
}

impl Footprint {
    #[inline]
    pub fn as_slice(&self) -> &[Coord] {
        &self.cells[..self.len as usize]
    }

    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        self.as_slice().contains(&cell)
    }
}

/// A brick's anchor cell and orientation. Rolling produces a new state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BrickState {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl BrickState {
    pub const fn new(x: i32, y: i32, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    pub const fn standing(x: i32, y: i32) -> Self {
        Self::new(x, y, Orientation::Standing)
    }

    pub const fn anchor(&self) -> Coord {
        (self.x, self.y)
    }

    /// Returns the state after rolling one step, with no legality check.
    ///
    /// Falling over from standing extends two cells in the roll direction, so
    /// the anchor moves by 2 when rolling up or left and by 1 when rolling down
    /// or right. Rolling a lying brick upright mirrors that.
    pub const fn roll(self, direction: Direction) -> Self {
        use Direction::*;
        use Orientation::*;

        let Self { x, y, orientation } = self;
        match (orientation, direction) {
            (Standing, Up) => Self::new(x, y - 2, Vertical),
            (Standing, Down) => Self::new(x, y + 1, Vertical),
            (Standing, Left) => Self::new(x - 2, y, Horizontal),
            (Standing, Right) => Self::new(x + 1, y, Horizontal),

            (Horizontal, Up) => Self::new(x, y - 1, Horizontal),
            (Horizontal, Down) => Self::new(x, y + 1, Horizontal),
            (Horizontal, Left) => Self::new(x - 1, y, Standing),
            (Horizontal, Right) => Self::new(x + 2, y, Standing),

            (Vertical, Up) => Self::new(x, y - 1, Standing),
            (Vertical, Down) => Self::new(x, y + 2, Standing),
            (Vertical, Left) => Self::new(x - 1, y, Vertical),
            (Vertical, Right) => Self::new(x + 1, y, Vertical),
        }
    }

    /// The grid cells this brick covers, anchor first.
    pub const fn cells(&self) -> Footprint {
        let (x, y) = (self.x, self.y);
        match self.orientation {
            Orientation::Standing => Footprint {
                cells: [(x, y), (x, y)],
                len: 1,
            },
            Orientation::Horizontal => Footprint {
                cells: [(x, y), (x + 1, y)],
                len: 2,
            },
            Orientation::Vertical => Footprint {
                cells: [(x, y), (x, y + 1)],
                len: 2,
            },
        }
    }
}

impl fmt::Display for BrickState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[x:{}, y:{}, {}]", self.x, self.y, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIENTATIONS: [Orientation; 3] = [
        Orientation::Standing,
        Orientation::Horizontal,
        Orientation::Vertical,
    ];

    #[test]
    fn test_standing_falls_over_two_cells() {
        let start = BrickState::standing(4, 4);
        assert_eq!(start.roll(Direction::Up), BrickState::new(4, 2, Orientation::Vertical));
        assert_eq!(start.roll(Direction::Down), BrickState::new(4, 5, Orientation::Vertical));
        assert_eq!(start.roll(Direction::Left), BrickState::new(2, 4, Orientation::Horizontal));
        assert_eq!(start.roll(Direction::Right), BrickState::new(5, 4, Orientation::Horizontal));
    }

    #[test]
    fn test_lying_bricks_roll_or_stand_up() {
        let horizontal = BrickState::new(4, 4, Orientation::Horizontal);
        assert_eq!(horizontal.roll(Direction::Up), BrickState::new(4, 3, Orientation::Horizontal));
        assert_eq!(horizontal.roll(Direction::Down), BrickState::new(4, 5, Orientation::Horizontal));
        assert_eq!(horizontal.roll(Direction::Left), BrickState::standing(3, 4));
        assert_eq!(horizontal.roll(Direction::Right), BrickState::standing(6, 4));

        let vertical = BrickState::new(4, 4, Orientation::Vertical);
        assert_eq!(vertical.roll(Direction::Up), BrickState::standing(4, 3));
        assert_eq!(vertical.roll(Direction::Down), BrickState::standing(4, 6));
        assert_eq!(vertical.roll(Direction::Left), BrickState::new(3, 4, Orientation::Vertical));
        assert_eq!(vertical.roll(Direction::Right), BrickState::new(5, 4, Orientation::Vertical));
    }

    #[test]
    fn test_opposite_roll_returns_to_start() {
        for orientation in ORIENTATIONS {
            let start = BrickState::new(5, 5, orientation);
            for direction in Direction::ALL {
                let back = start.roll(direction).roll(direction.opposite());
                assert_eq!(back, start, "{start} rolled {direction} and back");
            }
        }
    }

    #[test]
    fn test_footprint_sizes_and_adjacency() {
        for orientation in ORIENTATIONS {
            let state = BrickState::new(2, 3, orientation);
            let cells = state.cells();
            let cells = cells.as_slice();
            assert_eq!(cells[0], state.anchor(), "anchor must come first");

            match orientation {
                Orientation::Standing => assert_eq!(cells.len(), 1),
                Orientation::Horizontal => assert_eq!(cells, &[(2, 3), (3, 3)]),
                Orientation::Vertical => assert_eq!(cells, &[(2, 3), (2, 4)]),
            }
        }
    }

    #[test]
    fn test_order_parsing() {
        let order: DirectionOrder = "URDL".parse().unwrap();
        let directions: Vec<Direction> = order.iter().collect();
        assert_eq!(
            directions,
            vec![Direction::Up, Direction::Right, Direction::Down, Direction::Left]
        );
        assert_eq!(order.to_string(), "URDL");
        assert_eq!(DirectionOrder::default().to_string(), "LRUD");
    }

    #[test]
    fn test_order_rejects_non_permutations() {
        for bad in ["LLUD", "LRU", "LRUDL", "LRUX", "lrud", ""] {
            assert_eq!(
                bad.parse::<DirectionOrder>(),
                Err(ConfigError::InvalidOrder(bad.to_string())),
                "order {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_all_orders_are_distinct_permutations() {
        let orders: Vec<DirectionOrder> = DirectionOrder::all().collect();
        assert_eq!(orders.len(), 24);
        assert!(orders.iter().all_unique());
        for order in &orders {
            assert_eq!(order.to_string().parse::<DirectionOrder>().as_ref(), Ok(order));
        }
    }
}
