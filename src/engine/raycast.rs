//! Grid ray casting (Amanatides/Woo DDA).
//!
//! * [`GridWalk`] steps a ray through cell boundaries, one axis crossing at
//!   a time, and yields every cell it enters.
//! * [`cast`] runs one walk per screen column and collects the frame's
//!   [`DepthBuffer`].  Columns share nothing but `&Grid` and the camera, so
//!   the map over columns can be parallelised without changing the output.
//! * [`line_of_sight`] and the weapon reuse the same walk.

use glam::Vec2;

use super::types::{DepthBuffer, RayHit, Side};
use crate::world::{Camera, Cell, Grid, GridError, OPEN, TextureId};

/// Side distance used for an axis the ray never crosses.
pub const NO_CROSSING: f32 = 1e30;

/// Default view distance in cells; walls farther away are sky.
pub const MAX_DEPTH: f32 = 20.0;

/// Direction components below this are treated as exactly zero.
const AXIS_EPS: f32 = 1e-12;

/// One cell boundary crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Cell the ray just entered.
    pub cell: Cell,
    /// Kind of grid line crossed to enter it.
    pub side: Side,
    /// Ray length (Euclidean, along the unit direction) at the crossing.
    pub dist: f32,
}

/// Iterator over the cells a ray enters, nearest first.
///
/// The start cell is not yielded.  Iteration ends once the crossing lies
/// beyond `max_dist` or the ray leaves the grid.
pub struct GridWalk<'g> {
    grid: &'g Grid,
    map: Cell,
    step_x: i32,
    step_y: i32,
    delta: Vec2,
    side_dist: Vec2,
    max_dist: f32,
    done: bool,
}

impl<'g> GridWalk<'g> {
    /// Start a walk at `origin` along unit vector `dir`.
    ///
    /// `origin` must lie inside the grid; a point exactly on a grid line
    /// belongs to `floor(origin)`.
    pub fn new(grid: &'g Grid, origin: Vec2, dir: Vec2, max_dist: f32) -> Result<Self, GridError> {
        let map = grid.check(Cell::of(origin))?;

        // (step, delta, side_dist) for one axis
        let axis = |o: f32, d: f32, m: i32| -> (i32, f32, f32) {
            if d.abs() < AXIS_EPS {
                (0, NO_CROSSING, NO_CROSSING)
            } else {
                let delta = 1.0 / d.abs();
                if d > 0.0 {
                    (1, delta, (m as f32 + 1.0 - o) * delta)
                } else {
                    (-1, delta, (o - m as f32) * delta)
                }
            }
        };
        let (step_x, dx, sx) = axis(origin.x, dir.x, map.x);
        let (step_y, dy, sy) = axis(origin.y, dir.y, map.y);

        Ok(Self {
            grid,
            map,
            step_x,
            step_y,
            delta: Vec2::new(dx, dy),
            side_dist: Vec2::new(sx, sy),
            max_dist,
            done: false,
        })
    }

    /// Cell the walk currently stands in.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.map
    }
}

impl Iterator for GridWalk<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        // ties (exact corners) step along y
        let (dist, side) = if self.side_dist.x < self.side_dist.y {
            let d = self.side_dist.x;
            self.map.x += self.step_x;
            self.side_dist.x += self.delta.x;
            (d, Side::Vertical)
        } else {
            let d = self.side_dist.y;
            self.map.y += self.step_y;
            self.side_dist.y += self.delta.y;
            (d, Side::Horizontal)
        };

        if dist > self.max_dist || !self.grid.in_bounds(self.map) {
            self.done = true;
            return None;
        }
        Some(Step {
            cell: self.map,
            side,
            dist,
        })
    }
}

/// Cast one ray at absolute `angle` from `cam.pos`.
///
/// Returns `None` when no wall lies within `max_depth`.  The distance is
/// flattened onto the camera's forward axis to cancel fisheye.
pub fn cast_ray(
    grid: &Grid,
    cam: &Camera,
    angle: f32,
    max_depth: f32,
) -> Result<Option<RayHit>, GridError> {
    let dir = Vec2::from_angle(angle);
    let walk = GridWalk::new(grid, cam.pos, dir, max_depth)?;

    for step in walk {
        let tile = match grid.tile(step.cell) {
            Some(t) if t != OPEN => t,
            _ => continue,
        };
        let hit = cam.pos + dir * step.dist;
        let offset = match step.side {
            Side::Vertical if dir.x > 0.0 => hit.y.rem_euclid(1.0),
            Side::Vertical => 1.0 - hit.y.rem_euclid(1.0),
            Side::Horizontal if dir.y > 0.0 => 1.0 - hit.x.rem_euclid(1.0),
            Side::Horizontal => hit.x.rem_euclid(1.0),
        };
        return Ok(Some(RayHit {
            perp_distance: step.dist * (angle - cam.yaw).cos(),
            texture_id: tile as TextureId,
            texture_offset: if offset >= 1.0 { 0.0 } else { offset },
            side: step.side,
            cell: step.cell,
        }));
    }
    Ok(None)
}

/// Build the depth buffer for `num_rays` columns spread across the FoV.
pub fn cast(
    cam: &Camera,
    grid: &Grid,
    num_rays: usize,
    max_depth: f32,
) -> Result<DepthBuffer, GridError> {
    grid.check(Cell::of(cam.pos))?;

    let angles: Vec<f32> = (0..num_rays).map(|c| cam.ray_angle(c, num_rays)).collect();
    let columns = angles
        .iter()
        .map(|&a| cast_ray(grid, cam, a, max_depth))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DepthBuffer::new(columns, angles, max_depth))
}

/// `true` when no wall cell lies on the segment `from → to`.
pub fn line_of_sight(grid: &Grid, from: Vec2, to: Vec2) -> Result<bool, GridError> {
    let goal = grid.check(Cell::of(to))?;
    let delta = to - from;
    let dist = delta.length();
    if Cell::of(from) == goal || dist <= f32::EPSILON {
        grid.check(Cell::of(from))?;
        return Ok(true);
    }

    for step in GridWalk::new(grid, from, delta / dist, dist)? {
        if step.cell == goal {
            break;
        }
        if grid.blocked(step.cell) {
            return Ok(false);
        }
    }
    Ok(true)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
