//! The tile map the brick rolls on.
//!
//! Tiles are stored in a flat row-major vector. A map is written as rows of
//! digit codes: `0` for a hole, `1` for a regular tile, `9` for the target.

use crate::brick::{BrickState, Coord};
use crate::config::ConfigError;

/// Kind of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// A hole; the brick falls if any part of it rests here.
    Void,
    Floor,
    Target,
}

impl Tile {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Void),
            1 => Some(Tile::Floor),
            9 => Some(Tile::Target),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Tile::Void => 0,
            Tile::Floor => 1,
            Tile::Target => 9,
        }
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Tile::Void)
    }
}

/// Immutable rectangular map of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds a grid from rows of tile codes.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(ConfigError::UnknownTile {
                    x,
                    y,
                    code: char::from_digit(u32::from(code), 10).unwrap_or('?'),
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    /// Parses a map written one row per line. Whitespace inside a row is ignored
    /// and blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut rows = Vec::new();
        for (y, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .enumerate()
                .map(|(x, c)| match c.to_digit(10) {
                    Some(code) if Tile::from_code(code as u8).is_some() => Ok(code as u8),
                    _ => Err(ConfigError::UnknownTile { x, y, code: c }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }

        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, including holes.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Converts (x, y) to a linear cell index. Row-major: `idx = y * width + x`.
    ///
    /// The coordinate must be in bounds.
    #[inline(always)]
    pub fn coord_to_idx(&self, (x, y): Coord) -> usize {
        (y as usize) * self.width + (x as usize)
    }

    /// Converts a linear cell index back to (x, y).
    #[inline(always)]
    pub fn idx_to_coord(&self, cell_index: usize) -> Coord {
        (
            (cell_index % self.width) as i32,
            (cell_index / self.width) as i32,
        )
    }

    #[inline]
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y)
    }

    /// The tile at a coordinate, or `None` outside the grid.
    #[inline]
    pub fn tile(&self, cell: Coord) -> Option<Tile> {
        self.in_bounds(cell)
            .then(|| self.tiles[self.coord_to_idx(cell)])
    }

    /// Iterates `(coord, tile)` over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, &tile)| (self.idx_to_coord(idx), tile))
    }

    /// Locates the target tile, which must be unique.
    pub fn target(&self) -> Result<Coord, ConfigError> {
        let mut targets = self.cells().filter(|&(_, tile)| tile == Tile::Target);
        let first = targets.next();
        match (first, targets.count()) {
            (Some((cell, _)), 0) => Ok(cell),
            (None, _) => Err(ConfigError::TargetCount(0)),
            (Some(_), rest) => Err(ConfigError::TargetCount(rest + 1)),
        }
    }

    /// True if any covered cell is outside the grid or over a hole.
    pub fn is_off_map(&self, state: &BrickState) -> bool {
        state
            .cells()
            .as_slice()
            .iter()
            .any(|&cell| !self.tile(cell).is_some_and(Tile::is_solid))
    }
}
