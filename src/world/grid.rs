//! Static occupancy grid.
//!
//! * One cell ≙ one world unit; `cell = floor(world)`.
//! * Tile `0` is open floor, any other value is a wall whose value doubles
//!   as the wall texture number.
//! * Immutable after load; everything downstream borrows `&Grid`.

use glam::Vec2;
use thiserror::Error;

/// Wall tile value; `OPEN` (0) means walkable.
pub type Tile = u8;

pub const OPEN: Tile = 0;

/// Integer cell coordinates.  Signed so that neighbour arithmetic can step
/// outside the grid and be rejected by [`Grid::in_bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing world point `p` (`floor` on both axes).
    #[inline]
    pub fn of(p: Vec2) -> Self {
        Self {
            x: p.x.floor() as i32,
            y: p.y.floor() as i32,
        }
    }

    /// World-space centre of the cell.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Things that can go wrong while building or querying a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// No rows or zero-width rows.
    #[error("map is empty")]
    Empty,

    /// Row `row` has `found` cells while the first row had `expected`.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Unknown character in a text map.
    #[error("unknown tile `{ch}` at row {row}, column {col}")]
    BadTile { ch: char, row: usize, col: usize },

    #[error("map has no player start (`P`)")]
    NoPlayerStart,

    /// An open cell on the outer border would let rays and actors escape.
    #[error("map border is open at ({x}, {y})")]
    NotEnclosed { x: i32, y: i32 },

    /// A query started outside the grid is an upstream bug, never retried.
    #[error("cell ({}, {}) lies outside the {width}×{height} grid", cell.x, cell.y)]
    OutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },
}

/// Row-major tile matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build from row-major tile rows.  All rows must have the same length.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            tiles.extend_from_slice(r);
        }
        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    /// Build from a boolean occupancy matrix; blocked cells get tile `1`.
    pub fn from_blocked<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let rows: Vec<Vec<Tile>> = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&b| Tile::from(b)).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// `w × h` open room with a single ring of `wall` tiles around it.
    pub fn bordered(w: usize, h: usize, wall: Tile) -> Self {
        let mut tiles = vec![OPEN; w * h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
                    tiles[y * w + x] = wall;
                }
            }
        }
        Self {
            width: w,
            height: h,
            tiles,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    /// Tile at `c`, `None` outside the grid.
    #[inline]
    pub fn tile(&self, c: Cell) -> Option<Tile> {
        self.in_bounds(c)
            .then(|| self.tiles[c.y as usize * self.width + c.x as usize])
    }

    /// Walls block; so does everything outside the grid.
    #[inline]
    pub fn blocked(&self, c: Cell) -> bool {
        self.tile(c).is_none_or(|t| t != OPEN)
    }

    /// Precondition check used at the entry of casts and searches.
    pub fn check(&self, c: Cell) -> Result<Cell, GridError> {
        if self.in_bounds(c) {
            Ok(c)
        } else {
            Err(GridError::OutOfBounds {
                cell: c,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// First open border cell, if any.
    pub fn open_border_cell(&self) -> Option<Cell> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w)
            .flat_map(|x| [Cell::new(x, 0), Cell::new(x, h - 1)])
            .chain((0..h).flat_map(|y| [Cell::new(0, y), Cell::new(w - 1, y)]))
            .find(|&c| !self.blocked(c))
    }

    /// Iterate `(cell, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &t)| {
            (
                Cell::new((i % self.width) as i32, (i / self.width) as i32),
                t,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_of_floors_negative_and_grid_lines() {
        assert_eq!(Cell::of(Vec2::new(2.0, 3.999)), Cell::new(2, 3));
        assert_eq!(Cell::of(Vec2::new(-0.1, 0.0)), Cell::new(-1, 0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::from_rows(&[vec![1u8, 1, 1], vec![1, 0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(Grid::from_rows::<Vec<u8>>(&[]).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn outside_is_blocked_and_checked() {
        let g = Grid::bordered(5, 5, 1);
        assert!(g.blocked(Cell::new(0, 2)));
        assert!(!g.blocked(Cell::new(2, 2)));
        assert!(g.blocked(Cell::new(-1, 2)));
        assert!(g.blocked(Cell::new(5, 2)));
        assert!(g.check(Cell::new(2, 2)).is_ok());
        assert!(matches!(
            g.check(Cell::new(7, 1)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn bordered_room_is_enclosed() {
        let g = Grid::bordered(6, 4, 2);
        assert_eq!(g.open_border_cell(), None);
        assert_eq!(g.tile(Cell::new(0, 0)), Some(2));

        let open = Grid::from_blocked(&[[true, false, true], [true, false, true]]).unwrap();
        assert_eq!(open.open_border_cell(), Some(Cell::new(1, 0)));
    }
}
