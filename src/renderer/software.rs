//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Walls arrive one ray column at a time and record their distance in a
//!   per-pixel-column z-buffer; sprites (fed far-to-near) test against it
//!   column by column, so a sprite half behind a wall edge is clipped.
//! ---------------------------------------------------------------------------

mod sprites;

use crate::{
    renderer::{Overlay, Renderer, Rgba, SpriteSpan, WallColumn},
    world::texture::TextureBank,
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Wolfenstein-style column renderer.
#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    /// Wall distance per pixel column, `INFINITY` where only sky was drawn.
    zbuf: Vec<f32>,
    width: usize,
    height: usize,
}

/// Scale the RGB channels of `c` by `k`, keeping alpha.
#[inline]
pub fn shade(c: Rgba, k: f32) -> Rgba {
    if k >= 1.0 {
        return c;
    }
    let k = (k.max(0.0) * 256.0) as u32;
    let r = ((c >> 16) & 0xFF) * k >> 8;
    let g = ((c >> 8) & 0xFF) * k >> 8;
    let b = (c & 0xFF) * k >> 8;
    (c & 0xFF_000000) | (r << 16) | (g << 8) | b
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
            self.zbuf.resize(w, f32::INFINITY);
        }

        /* dark-grey clear */
        self.scratch.fill(0xFF_202020);
        self.zbuf.fill(f32::INFINITY);
    }

    fn draw_background(&mut self, ceiling: Rgba, floor: Rgba) {
        let split = self.height / 2 * self.width;
        self.scratch[..split].fill(ceiling);
        self.scratch[split..].fill(floor);
    }

    fn draw_wall(&mut self, wall: &WallColumn, bank: &TextureBank) {
        let tex = bank.texture_or_missing(wall.tex_id);

        let x_end = wall.x_end.min(self.width);
        let col_h = (wall.y_bot - wall.y_top).max(1.0);
        let y0 = wall.y_top.max(0.0) as usize;
        let y1 = (wall.y_bot.ceil().max(0.0) as usize).min(self.height);
        let u = ((wall.u * tex.w as f32) as usize).min(tex.w - 1);
        let step_v = tex.h as f32 / col_h;

        for x in wall.x_start..x_end {
            self.zbuf[x] = wall.depth;
            let mut v = (y0 as f32 - wall.y_top) * step_v;
            for y in y0..y1 {
                let texel = tex.texel(u, v as usize);
                self.scratch[y * self.width + x] = shade(texel, wall.shade);
                v += step_v;
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &SpriteSpan, bank: &TextureBank) {
        self.draw_sprite_columns(sprite, bank);
    }

    fn draw_overlay(&mut self, overlay: &Overlay, bank: &TextureBank) {
        self.blit_overlay(overlay, bank);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    /// Depth recorded for pixel column `x` in the current frame.
    #[inline]
    pub fn depth_at(&self, x: usize) -> f32 {
        self.zbuf.get(x).copied().unwrap_or(f32::INFINITY)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
