//! World → screen projection for billboard sprites.
//!
//! Uses the same angle-linear column mapping as the rays, so a sprite
//! standing in a ray's path lands on that ray's pixel column.

use glam::Vec2;

use super::types::Screen;
use crate::world::Camera;

/// Anything nearer than this (camera-space depth) is not drawn.
pub const NEAR: f32 = 0.1;

/// Screen-space footprint of one sprite, `x1`/`y1` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRect {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
    /// Camera-space depth; compared against wall `perp_distance`.
    pub depth: f32,
}

/// Project a sprite standing at world `pos`.
///
/// * `scale`: height relative to a full wall.
/// * `shift`: downward offset as a fraction of the projected height, so
///   small sprites rest on the floor.
///
/// Returns `None` behind the near plane or fully off-screen.
pub fn project_sprite(
    cam: &Camera,
    screen: &Screen,
    pos: Vec2,
    scale: f32,
    shift: f32,
) -> Option<SpriteRect> {
    let p = cam.to_cam(pos);
    if p.y <= NEAR {
        return None;
    }

    let proj = cam.screen_scale(screen.w) / p.y * scale;
    let cx = cam.column_of(p, screen.w);
    let half = proj * 0.5;

    let x0 = (cx - half).floor() as i32;
    let x1 = (cx + half).ceil() as i32 - 1;
    if x1 < 0 || x0 >= screen.w as i32 || x1 < x0 {
        return None;
    }

    let cy = screen.half_h + proj * shift;
    let y0 = (cy - half).floor() as i32;
    let y1 = (cy + half).ceil() as i32 - 1;

    Some(SpriteRect {
        x0,
        x1,
        y0,
        y1,
        depth: p.y,
    })
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
