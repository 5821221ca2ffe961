//! Text map format.
//!
//! ```text
//! 11111
//! 1P..1      1-9   wall (value = wall texture)
//! 1.s.1      . ' ' open floor
//! 1...1      P     player start (facing east)
//! 11111      s c y enemies, l t decorations (see `defs`)
//! ```
//!
//! Every row must have the same width and the outer ring must be closed.

use std::{fs, io, path::Path};

use glam::Vec2;
use thiserror::Error;

use super::grid::{Cell, Grid, GridError, OPEN, Tile};
use crate::defs::{self, ThingInfo};

/// A spawned actor as placed in the map.
#[derive(Clone, Copy, Debug)]
pub struct Thing {
    pub pos: Vec2,
    pub info: ThingInfo,
}

/// Runtime snapshot of one map (immutable after load).
#[derive(Debug)]
pub struct Level {
    pub name: String,
    pub grid: Grid,
    pub player_start: Vec2,
    pub player_angle: f32,
    pub things: Vec<Thing>,
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl Level {
    /// Parse the text format above.  Blank lines are skipped.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<Tile>> = Vec::new();
        let mut player = None;
        let mut things = Vec::new();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let row = rows.len();
            let mut tiles = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let centre = Cell::new(col as i32, row as i32).center();
                let tile = match ch {
                    '1'..='9' => ch as Tile - b'0',
                    '.' | ' ' => OPEN,
                    'P' => {
                        player = Some(centre);
                        OPEN
                    }
                    _ => match defs::by_glyph(ch) {
                        Some(info) => {
                            things.push(Thing { pos: centre, info });
                            OPEN
                        }
                        None => return Err(GridError::BadTile { ch, row, col }),
                    },
                };
                tiles.push(tile);
            }
            rows.push(tiles);
        }

        let grid = Grid::from_rows(&rows)?;
        if let Some(c) = grid.open_border_cell() {
            return Err(GridError::NotEnclosed { x: c.x, y: c.y });
        }
        let player_start = player.ok_or(GridError::NoPlayerStart)?;

        Ok(Self {
            name: name.into(),
            grid,
            player_start,
            player_angle: 0.0,
            things,
        })
    }

    /// Load a text map from disk; the file stem becomes the level name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::parse(name, &text)?)
    }

    /// Number of enemies placed in the map.
    pub fn enemy_count(&self) -> usize {
        self.things
            .iter()
            .filter(|t| matches!(t.info, ThingInfo::Enemy(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
11111
1P.s1
1.t.1
1...1
12221
";

    #[test]
    fn parses_tiles_player_and_things() {
        let lvl = Level::parse("room", ROOM).unwrap();
        assert_eq!(lvl.grid.width(), 5);
        assert_eq!(lvl.grid.height(), 5);
        assert_eq!(lvl.player_start, Vec2::new(1.5, 1.5));
        assert_eq!(lvl.grid.tile(Cell::new(2, 4)), Some(2));
        assert_eq!(lvl.things.len(), 2);
        assert_eq!(lvl.enemy_count(), 1);
        assert_eq!(lvl.things[0].pos, Vec2::new(3.5, 1.5));
        // spawn markers are floor
        assert!(!lvl.grid.blocked(Cell::new(3, 1)));
    }

    #[test]
    fn rejects_bad_maps() {
        assert_eq!(
            Level::parse("x", "111\n1?1\n111").unwrap_err(),
            GridError::BadTile {
                ch: '?',
                row: 1,
                col: 1
            }
        );
        assert_eq!(
            Level::parse("x", "111\n1.1\n111").unwrap_err(),
            GridError::NoPlayerStart
        );
        assert_eq!(
            Level::parse("x", "111\n1P.\n111").unwrap_err(),
            GridError::NotEnclosed { x: 2, y: 1 }
        );
    }
}
