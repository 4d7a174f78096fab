//! Text rendering of the map and of solution paths.

use std::fmt::Write;
use std::str::FromStr;

use crate::brick::{BrickState, Direction};
use crate::config::ConfigError;
use crate::grid::{Grid, Tile};

/// Glyph set used when drawing the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Digits and punctuation, for terminals without UTF-8.
    Ascii,
    #[default]
    Unicode,
}

impl Style {
    const fn glyphs(self) -> Glyphs {
        match self {
            Style::Ascii => Glyphs {
                tile: "1",
                hole: "0",
                brick: "X",
                target: "+",
            },
            Style::Unicode => Glyphs {
                tile: "\u{2b1c}",
                hole: "\u{2b1b}",
                brick: "\u{1f7e7}",
                target: "\u{274e}",
            },
        }
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Style::Ascii),
            "unicode" => Ok(Style::Unicode),
            _ => Err(ConfigError::UnknownStyle(s.to_string())),
        }
    }
}

struct Glyphs {
    tile: &'static str,
    hole: &'static str,
    brick: &'static str,
    target: &'static str,
}

/// Draws the grid row by row with the brick on top.
pub fn render(grid: &Grid, brick: &BrickState, style: Style) -> String {
    let glyphs = style.glyphs();
    let footprint = brick.cells();

    let mut output = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let glyph = if footprint.contains((x, y)) {
                glyphs.brick
            } else {
                match grid.tile((x, y)) {
                    Some(Tile::Target) => glyphs.target,
                    Some(Tile::Floor) => glyphs.tile,
                    Some(Tile::Void) | None => glyphs.hole,
                }
            };
            output.push_str(glyph);
        }
        output.push('\n');
    }

    output
}

/// Formats a solution as `[START] -> right -> down [GOAL]`.
pub fn format_path(path: &[Direction]) -> String {
    let mut output = String::from("[START] ");
    for direction in path {
        // writing to a String cannot fail
        let _ = write!(output, "-> {direction} ");
    }
    output.push_str("[GOAL]");
    output
}
