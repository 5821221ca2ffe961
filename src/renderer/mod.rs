//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! `engine::frame` turns the depth buffer and the visible sprites into a
//! list of [`DrawCall`]s (background, walls, sprites far-to-near, overlay)
//! and hands them to a type that implements [`Renderer`].
//!
//! * Back-ends can be swapped without touching game logic.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use crate::world::texture::{TextureBank, TextureId};

pub use crate::world::texture::Rgba;

/// One textured wall strip covering screen columns `x_start .. x_end`
/// (one ray column, upsampled to several pixels when rays < width).
#[derive(Clone, Debug, PartialEq)]
pub struct WallColumn {
    pub tex_id: TextureId,
    pub x_start: usize,
    pub x_end: usize,
    /* unclipped vertical extent */
    pub y_top: f32,
    pub y_bot: f32,
    /// Horizontal texture coordinate in `[0, 1)`.
    pub u: f32,
    /// Multiplicative brightness (side shading × fog).
    pub shade: f32,
    /// Perpendicular distance, written to the z-buffer.
    pub depth: f32,
}

/// Screen-space rectangle of a billboard sprite, `x1`/`y1` inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSpan {
    pub tex_id: TextureId,
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
    pub depth: f32,
}

/// Screen-space image drawn on top of everything (the weapon).
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub tex_id: TextureId,
    /// Top-left corner.
    pub x: i32,
    pub y: i32,
    /// Integer pixel scale.
    pub scale: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Background { ceiling: Rgba, floor: Rgba },
    Wall(WallColumn),
    Sprite(SpriteSpan),
    Overlay(Overlay),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill the upper half with `ceiling` and the lower half with `floor`.
    fn draw_background(&mut self, ceiling: Rgba, floor: Rgba);

    /// Rasterise one textured wall strip and record its depth.
    fn draw_wall(&mut self, wall: &WallColumn, bank: &TextureBank);

    /// Rasterise a sprite, skipping columns hidden behind nearer walls.
    fn draw_sprite(&mut self, sprite: &SpriteSpan, bank: &TextureBank);

    /// Blit an unclipped overlay image.
    fn draw_overlay(&mut self, overlay: &Overlay, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        calls: &[DrawCall],
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for c in calls {
            match c {
                DrawCall::Background { ceiling, floor } => self.draw_background(*ceiling, *floor),
                DrawCall::Wall(w) => self.draw_wall(w, bank),
                DrawCall::Sprite(s) => self.draw_sprite(s, bank),
                DrawCall::Overlay(o) => self.draw_overlay(o, bank),
            }
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
