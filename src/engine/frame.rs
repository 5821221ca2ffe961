//! Frame assembly: depth buffer + visible sprites → ordered draw calls.
//!
//! Order is fixed: background, wall strips left to right, sprites far to
//! near, weapon overlay.  Occlusion between walls and sprites is decided
//! twice: whole sprites hidden behind the depth buffer are dropped here,
//! partially hidden ones are clipped per column by the back-end.

use glam::Vec2;

use super::{
    projection::{SpriteRect, project_sprite},
    types::{DepthBuffer, RayHit, Screen, Side},
};
use crate::{
    renderer::{DrawCall, Overlay, Rgba, SpriteSpan, WallColumn},
    world::{Camera, TextureBank},
};

/// Brightness of north/south faces relative to east/west ones.
pub const HORIZONTAL_SHADE: f32 = 0.7;

/// Nearest allowed wall distance when computing strip height.
const MIN_PERP: f32 = 1e-4;

/// Something that wants to be drawn as a billboard this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRef {
    pub pos: Vec2,
    /// Texture name in the bank.
    pub name: &'static str,
    pub scale: f32,
    pub shift: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub ceiling: Rgba,
    pub floor: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ceiling: 0xFF_383838,
            floor: 0xFF_1E1E1E,
        }
    }
}

/// Distance darkening, 1 at the camera and falling off smoothly.
#[inline]
pub fn fog(perp: f32) -> f32 {
    1.0 / (1.0 + perp.powi(5) * 0.00002)
}

/// Build the complete draw list for one frame.
pub fn build_frame(
    cam: &Camera,
    screen: &Screen,
    depth: &DepthBuffer,
    sprites: &[SpriteRef],
    weapon: Option<&str>,
    palette: Palette,
    bank: &TextureBank,
) -> Vec<DrawCall> {
    let mut calls = Vec::with_capacity(depth.len() + sprites.len() + 2);
    calls.push(DrawCall::Background {
        ceiling: palette.ceiling,
        floor: palette.floor,
    });

    /* ---------------------------------------------------- walls ---- */
    let focal = cam.screen_scale(screen.w);
    let mut x = 0;
    while x < screen.w && !depth.is_empty() {
        let col = depth.column_for_pixel(x, screen.w);
        let mut end = x + 1;
        while end < screen.w && depth.column_for_pixel(end, screen.w) == col {
            end += 1;
        }
        if let Some(hit) = depth[col] {
            calls.push(DrawCall::Wall(wall_strip(&hit, x, end, focal, screen)));
        }
        x = end;
    }

    /* -------------------------------------------------- sprites ---- */
    let mut visible: Vec<(SpriteRect, &SpriteRef)> = sprites
        .iter()
        .filter_map(|s| project_sprite(cam, screen, s.pos, s.scale, s.shift).map(|r| (r, s)))
        .filter(|(r, _)| !hidden_by_walls(r, depth, screen))
        .collect();
    visible.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

    for (r, s) in visible {
        calls.push(DrawCall::Sprite(SpriteSpan {
            tex_id: bank.id_or_missing(s.name),
            x0: r.x0,
            x1: r.x1,
            y0: r.y0,
            y1: r.y1,
            depth: r.depth,
        }));
    }

    /* -------------------------------------------------- overlay ---- */
    if let Some(name) = weapon {
        let tex_id = bank.id_or_missing(name);
        let tex = bank.texture_or_missing(tex_id);
        let scale = (screen.h / 200).max(1);
        calls.push(DrawCall::Overlay(Overlay {
            tex_id,
            x: screen.half_w as i32 - (tex.w * scale / 2) as i32,
            y: (screen.h - (tex.h * scale).min(screen.h)) as i32,
            scale,
        }));
    }
    calls
}

fn wall_strip(hit: &RayHit, x_start: usize, x_end: usize, focal: f32, screen: &Screen) -> WallColumn {
    let h = focal / hit.perp_distance.max(MIN_PERP);
    let side = match hit.side {
        Side::Vertical => 1.0,
        Side::Horizontal => HORIZONTAL_SHADE,
    };
    WallColumn {
        tex_id: hit.texture_id,
        x_start,
        x_end,
        y_top: screen.half_h - h * 0.5,
        y_bot: screen.half_h + h * 0.5,
        u: hit.texture_offset,
        shade: side * fog(hit.perp_distance),
        depth: hit.perp_distance,
    }
}

/// `true` when every on-screen column of `r` has a nearer wall.
fn hidden_by_walls(r: &SpriteRect, depth: &DepthBuffer, screen: &Screen) -> bool {
    let x0 = r.x0.max(0) as usize;
    let x1 = (r.x1.min(screen.w as i32 - 1)).max(0) as usize;
    (x0..=x1).all(|x| depth.depth(depth.column_for_pixel(x, screen.w)) <= r.depth)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raycast::{MAX_DEPTH, cast};
    use crate::world::Grid;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    fn walls(calls: &[DrawCall]) -> Vec<&WallColumn> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Wall(w) => Some(w),
                _ => None,
            })
            .collect()
    }

    fn sprites(calls: &[DrawCall]) -> Vec<&SpriteSpan> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn centre_wall(yaw: f32) -> WallColumn {
        let grid = Grid::bordered(5, 5, 1);
        let cam = Camera::new(Vec2::new(2.5, 2.5), yaw, FRAC_PI_3);
        let screen = Screen::new(5, 100);
        let depth = cast(&cam, &grid, 5, MAX_DEPTH).unwrap();
        let calls = build_frame(&cam, &screen, &depth, &[], None, Palette::default(), &TextureBank::builtin());
        assert!(matches!(calls[0], DrawCall::Background { .. }));
        let w = walls(&calls);
        assert_eq!(w.len(), 5);
        w[2].clone()
    }

    #[test]
    fn strip_height_is_inverse_perp_distance() {
        let w = centre_wall(0.0);
        let focal = 2.5 / (FRAC_PI_3 / 2.0).tan();
        assert!(((w.y_bot - w.y_top) - focal / 1.5).abs() < 1e-3);
        assert!(((w.y_bot + w.y_top) * 0.5 - 50.0).abs() < 1e-3);
        assert_eq!(w.depth, 1.5);
    }

    #[test]
    fn horizontal_faces_are_darker_by_fixed_factor() {
        let v = centre_wall(0.0);
        let h = centre_wall(FRAC_PI_2);
        assert!((h.shade / v.shade - HORIZONTAL_SHADE).abs() < 1e-4);
        // and the result does not change between frames
        assert_eq!(centre_wall(FRAC_PI_2), h);
    }

    /// 9×5 room, optional pillar at (5, 2), camera at (1.5, 2.5) facing east.
    fn corridor(pillar: bool) -> Vec<DrawCall> {
        let mut rows = vec![vec![0u8; 9]; 5];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, t) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == 8 || y == 4 || (pillar && x == 5 && y == 2) {
                    *t = 1;
                }
            }
        }
        let grid = Grid::from_rows(&rows).unwrap();
        let cam = Camera::new(Vec2::new(1.5, 2.5), 0.0, FRAC_PI_3);
        let screen = Screen::new(60, 40);
        let depth = cast(&cam, &grid, 60, MAX_DEPTH).unwrap();
        let refs = [
            SpriteRef { pos: Vec2::new(4.5, 2.5), name: "LAMP", scale: 1.0, shift: 0.0 },
            SpriteRef { pos: Vec2::new(7.5, 2.5), name: "LAMP", scale: 1.0, shift: 0.0 },
        ];
        build_frame(&cam, &screen, &depth, &refs, Some("SHOTGUN0"), Palette::default(), &TextureBank::builtin())
    }

    #[test]
    fn sprites_sorted_far_to_near() {
        let calls = corridor(false);
        let s = sprites(&calls);
        assert_eq!(s.len(), 2);
        assert!(s[0].depth > s[1].depth);
        assert!(matches!(calls.last(), Some(DrawCall::Overlay(_))));
    }

    #[test]
    fn sprite_fully_behind_wall_is_culled() {
        let calls = corridor(true);
        let s = sprites(&calls);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].depth, 3.0);
    }

    #[test]
    fn fog_is_monotonic() {
        assert_eq!(fog(0.0), 1.0);
        assert!(fog(2.0) > fog(8.0));
        assert!(fog(20.0) > 0.0);
    }
}
