use crate::{
    renderer::{Overlay, SpriteSpan},
    world::texture::TextureBank,
};

use super::Software;

/// Texels with zero alpha are holes in the sprite.
#[inline]
fn transparent(texel: u32) -> bool {
    texel >> 24 == 0
}

impl Software {
    /// Column loop for one billboard.  Columns whose wall depth is nearer
    /// than the sprite are skipped; the caller feeds sprites far-to-near so
    /// nearer sprites overdraw farther ones.
    pub(super) fn draw_sprite_columns(&mut self, spr: &SpriteSpan, bank: &TextureBank) {
        let tex = bank.texture_or_missing(spr.tex_id);

        let span_w = (spr.x1 - spr.x0 + 1).max(1) as f32;
        let span_h = (spr.y1 - spr.y0 + 1).max(1) as f32;
        let u_step = tex.w as f32 / span_w;
        let v_step = tex.h as f32 / span_h;

        let x_start = spr.x0.max(0);
        let x_end = spr.x1.min(self.width as i32 - 1);
        let y_start = spr.y0.max(0);
        let y_end = spr.y1.min(self.height as i32 - 1);

        // ------------------------------------------------ column loop ----
        for x in x_start..=x_end {
            if spr.depth >= self.zbuf[x as usize] {
                continue; // behind the wall in this column
            }
            let u = ((x - spr.x0) as f32 * u_step) as usize;
            if u >= tex.w {
                break;
            }
            let mut v_f = (y_start - spr.y0) as f32 * v_step;
            for y in y_start..=y_end {
                let v = v_f as usize;
                if v >= tex.h {
                    break;
                }
                let texel = tex.pixels[v * tex.w + u];
                if !transparent(texel) {
                    self.scratch[y as usize * self.width + x as usize] = texel;
                }
                v_f += v_step;
            }
        }
    }

    /// Nearest-neighbour integer-scaled blit, no depth test.
    pub(super) fn blit_overlay(&mut self, ov: &Overlay, bank: &TextureBank) {
        let tex = bank.texture_or_missing(ov.tex_id);
        let scale = ov.scale.max(1);

        for ty in 0..tex.h * scale {
            let y = ov.y + ty as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for tx in 0..tex.w * scale {
                let x = ov.x + tx as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let texel = tex.pixels[(ty / scale) * tex.w + tx / scale];
                if !transparent(texel) {
                    self.scratch[y as usize * self.width + x as usize] = texel;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        renderer::{DrawCall, RendererExt, Software, SpriteSpan, WallColumn},
        world::texture::{Texture, TextureBank},
    };

    const RED: u32 = 0xFF_FF0000;
    const GREEN: u32 = 0xFF_00FF00;

    fn bank() -> TextureBank {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("GREEN", Texture::from_fn("GREEN", 2, 2, |_, _| GREEN))
            .unwrap();
        // left half opaque, right half transparent
        bank.insert(
            "HALF",
            Texture::from_fn("HALF", 2, 2, |x, _| if x == 0 { RED } else { 0 }),
        )
        .unwrap();
        bank
    }

    fn wall(x_start: usize, depth: f32) -> DrawCall {
        DrawCall::Wall(WallColumn {
            tex_id: 1,
            x_start,
            x_end: 8,
            y_top: 0.0,
            y_bot: 8.0,
            u: 0.0,
            shade: 1.0,
            depth,
        })
    }

    fn sprite(tex_id: u16, depth: f32) -> DrawCall {
        DrawCall::Sprite(SpriteSpan {
            tex_id,
            x0: 2,
            x1: 5,
            y0: 2,
            y1: 5,
            depth,
        })
    }

    fn render(calls: &[DrawCall]) -> Vec<u32> {
        let mut out = Vec::new();
        Software::default().draw_frame(8, 8, calls, &bank(), |fb, _, _| out = fb.to_vec());
        out
    }

    #[test]
    fn sprite_clipped_by_nearer_wall_columns() {
        // wall covers x 3.. at depth 2; sprite at depth 3 spans x 2..=5
        let fb = render(&[wall(3, 2.0), sprite(2, 3.0)]);
        assert_eq!(fb[3 * 8 + 2], RED); // open column
        assert_eq!(fb[3 * 8 + 3], GREEN); // wall wins
    }

    #[test]
    fn sprite_in_front_of_wall_is_drawn() {
        let fb = render(&[wall(0, 5.0), sprite(2, 3.0)]);
        assert_eq!(fb[3 * 8 + 2], RED);
        assert_eq!(fb[3 * 8 + 3], RED);
        // transparent texels leave the wall visible
        assert_eq!(fb[3 * 8 + 5], GREEN);
    }
}
