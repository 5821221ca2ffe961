//! Grid slide/clip for round actors.
//!
//! ✔ axis-separated: a blocked x step does not cancel the y step, so
//!   actors glide along walls
//! ✔ the move is cut into ¼ slices so fast actors cannot tunnel
//! ✔ *only* glam math and `Grid::blocked`

use glam::Vec2;

use crate::world::{Cell, Grid};

/// What the caller gets back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,      // final XY
    pub hit_wall: bool, // some component was clipped
}

/// `true` when the square of half-size `radius` around `p` touches no wall.
pub fn fits(grid: &Grid, p: Vec2, radius: f32) -> bool {
    let lo = Cell::of(p - Vec2::splat(radius));
    let hi = Cell::of(p + Vec2::splat(radius));
    (lo.y..=hi.y).all(|y| (lo.x..=hi.x).all(|x| !grid.blocked(Cell::new(x, y))))
}

/// Move by `delta`, clipping each axis against walls.
pub fn slide_move(grid: &Grid, mut pos: Vec2, delta: Vec2, radius: f32) -> MoveResult {
    const SLICE_COUNT: i32 = 4;
    let slice = delta / SLICE_COUNT as f32;
    let mut touched = false;

    for _ in 0..SLICE_COUNT {
        if slice.x != 0.0 {
            let next = Vec2::new(pos.x + slice.x, pos.y);
            if fits(grid, next, radius) {
                pos = next;
            } else {
                touched = true;
            }
        }
        if slice.y != 0.0 {
            let next = Vec2::new(pos.x, pos.y + slice.y);
            if fits(grid, next, radius) {
                pos = next;
            } else {
                touched = true;
            }
        }
    }

    MoveResult {
        pos,
        hit_wall: touched,
    }
}
