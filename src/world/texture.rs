// Format-agnostic repository of textures.  Asset decoding is not part of
// this crate: the bank ships procedurally generated walls and sprites so the
// engine runs without data files.  The renderer and world logic interact
// through `TextureId` only.

use std::collections::HashMap;

use crate::defs::{DECORATIONS, ENEMIES};

/// Pixel format (0xAARRGGBB).  Alpha 0 marks a transparent sprite texel.
pub type Rgba = u32;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Side length of the generated wall textures.
pub const TEXTURE_SIZE: usize = 64;

/// CPU-side storage in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Build a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn<F>(name: impl Into<String>, w: usize, h: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgba,
    {
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(f(x, y));
            }
        }
        Texture {
            name: name.into(),
            w,
            h,
            pixels,
        }
    }

    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> Rgba {
        self.pixels[v.min(self.h - 1) * self.w + u.min(self.w - 1)]
    }
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        Texture::from_fn("CHECKER", 8, 8, |x, y| {
            if (x ^ y) & 1 == 0 {
                0xFF_FF00FF
            } else {
                0xFF_000000
            }
        })
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// A format-agnostic cache of textures.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the “missing” checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Bank with every texture the built-in actor tables reference.
    ///
    /// Walls `WALL1..=WALL9` are inserted first so that wall tile `n` maps
    /// to `TextureId` `n`.
    pub fn builtin() -> Self {
        let mut bank = Self::default_with_checker();
        let mut add = |tex: Texture| {
            let name = tex.name.clone();
            // names are unique by construction
            let _ = bank.insert(name, tex);
        };

        for n in 1..=9u8 {
            add(builtin::wall(n));
        }
        for info in ENEMIES {
            let s = &info.sprites;
            let body = builtin::body_colour(info.id);
            for (i, name) in s.idle.iter().enumerate() {
                add(builtin::figure(name, body, builtin::Pose::Stand(i)));
            }
            for (i, name) in s.walk.iter().enumerate() {
                add(builtin::figure(name, body, builtin::Pose::Walk(i)));
            }
            for (i, name) in s.attack.iter().enumerate() {
                add(builtin::figure(name, body, builtin::Pose::Attack(i)));
            }
            for name in s.pain {
                add(builtin::figure(name, body, builtin::Pose::Pain));
            }
            for (i, name) in s.death.iter().enumerate() {
                add(builtin::figure(name, body, builtin::Pose::Death(i, s.death.len())));
            }
        }
        for info in DECORATIONS {
            for (i, name) in info.frames.iter().enumerate() {
                add(builtin::light(name, i));
            }
        }
        for i in 0..4 {
            add(builtin::shotgun(i));
        }
        bank
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or_else(|| {
            log::warn!("texture `{name}` not in bank");
            NO_TEXTURE
        })
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Borrow a texture, falling back to the checkerboard for bad ids.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/// Procedural stand-ins for the game art.
mod builtin {
    use super::{Rgba, TEXTURE_SIZE, Texture};

    const CLEAR: Rgba = 0x00_000000;

    const WALL_COLOURS: [Rgba; 9] = [
        0xFF_8C3B2E, // brick
        0xFF_6E6E78, // stone
        0xFF_3C5A8C, // blue tile
        0xFF_7A6440, // wood
        0xFF_4E7A3C, // moss
        0xFF_7A3C6E,
        0xFF_3C7A78,
        0xFF_A0A03C,
        0xFF_505050,
    ];

    #[inline]
    fn scale(c: Rgba, k: f32) -> Rgba {
        let ch = |s: u32| ((((c >> s) & 0xFF) as f32 * k).min(255.0) as u32) << s;
        (c & 0xFF_000000) | ch(16) | ch(8) | ch(0)
    }

    /// Staggered-brick pattern with mortar lines.
    pub fn wall(n: u8) -> Texture {
        let base = WALL_COLOURS[(n as usize - 1) % WALL_COLOURS.len()];
        let s = TEXTURE_SIZE;
        Texture::from_fn(format!("WALL{n}"), s, s, |x, y| {
            let row = y / 16;
            let xo = (x + if row % 2 == 0 { 0 } else { 16 }) % s;
            if y % 16 == 0 || xo % 32 == 0 {
                scale(base, 0.45)
            } else {
                // cheap deterministic grain
                let grain = ((x * 7 + y * 13 + n as usize * 29) % 11) as f32 / 40.0;
                scale(base, 0.85 + grain)
            }
        })
    }

    pub fn body_colour(id: &str) -> Rgba {
        match id {
            "SOLDIER" => 0xFF_6B7F3A,
            "CACO" => 0xFF_C0302A,
            "CYBER" => 0xFF_8A6A52,
            _ => 0xFF_A0A0A0,
        }
    }

    pub enum Pose {
        Stand(usize),
        Walk(usize),
        Attack(usize),
        Pain,
        /// frame, frame count
        Death(usize, usize),
    }

    /// Ellipse head + torso silhouette, varied per pose.
    pub fn figure(name: &str, body: Rgba, pose: Pose) -> Texture {
        let s = TEXTURE_SIZE as f32;
        let (squash, tint, flash, sway) = match pose {
            Pose::Stand(i) => (1.0, 1.0, false, i as f32 * 0.5),
            Pose::Walk(i) => (1.0, 1.0, false, [-2.0, 0.0, 2.0, 0.0][i % 4]),
            Pose::Attack(i) => (1.0, 1.1, i % 2 == 1, 0.0),
            Pose::Pain => (0.95, 1.6, false, 0.0),
            Pose::Death(i, n) => (1.0 - 0.8 * (i + 1) as f32 / n as f32, 0.7, false, 0.0),
        };
        let colour = scale(body, tint);
        Texture::from_fn(name, TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
            let (fx, fy) = (x as f32 + 0.5 - sway, y as f32 + 0.5);
            // everything sits on the bottom edge; squash flattens towards it
            let top = s * (1.0 - squash);
            if fy < top {
                return CLEAR;
            }
            let v = (fy - top) / (s - top).max(1.0);
            let head = ((fx - s * 0.5) / (s * 0.12)).powi(2) + ((v - 0.15) / 0.12).powi(2);
            let torso = ((fx - s * 0.5) / (s * 0.25)).powi(2) + ((v - 0.6) / 0.4).powi(2);
            if flash && ((fx - s * 0.78).powi(2) + (v * s - s * 0.45).powi(2)) < 36.0 {
                0xFF_FFE060
            } else if head <= 1.0 {
                scale(colour, 1.2)
            } else if torso <= 1.0 {
                colour
            } else {
                CLEAR
            }
        })
    }

    /// Pole with a flickering flame; frame index varies the flame height.
    pub fn light(name: &str, frame: usize) -> Texture {
        let s = TEXTURE_SIZE as f32;
        let flame = 0.18 + 0.04 * (frame % 3) as f32;
        Texture::from_fn(name, TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let dx = (fx - s * 0.5).abs();
            if dx < 2.5 && fy > s * 0.3 {
                0xFF_5A4A3A
            } else if ((dx / (s * 0.1)).powi(2) + ((fy - s * 0.2) / (s * flame)).powi(2)) <= 1.0 {
                if dx < s * 0.04 { 0xFF_FFF0A0 } else { 0xFF_FF9020 }
            } else {
                CLEAR
            }
        })
    }

    /// First-person weapon, frames 1-3 are the recoil/reload cycle.
    pub fn shotgun(frame: usize) -> Texture {
        let (w, h) = (96usize, 64usize);
        let lift = [0.0, 6.0, 3.0, 1.0][frame % 4];
        Texture::from_fn(format!("SHOTGUN{frame}"), w, h, |x, y| {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5 + lift);
            let barrel = (fx - w as f32 * 0.5).abs() < 6.0 && fy > 10.0;
            let stock = (fx - w as f32 * 0.5).abs() < 16.0 && fy > 40.0;
            let muzzle = frame == 1 && ((fx - w as f32 * 0.5).powi(2) + (fy - 6.0).powi(2)) < 64.0;
            if muzzle {
                0xFF_FFD040
            } else if barrel {
                0xFF_3A3A40
            } else if stock {
                0xFF_6A4A2A
            } else {
                CLEAR
            }
        })
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Rgba) -> Texture {
        Texture::from_fn("Dummy", 2, 2, |_, _| color)
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF0000)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_0000FF)).unwrap();

        assert_ne!(red, NO_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.id_or_missing("NOPE"), NO_TEXTURE);
        assert_eq!(bank.texture(blue).unwrap().pixels[0], 0xFF_0000FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        // texture count still 2 (checker + first WOOD)
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad).unwrap_err(), TextureError::BadId(bad));
        assert_eq!(bank.texture_or_missing(bad).name, "CHECKER");
    }

    #[test]
    fn builtin_walls_map_tile_to_id() {
        let bank = TextureBank::builtin();
        for n in 1..=9u16 {
            assert_eq!(bank.id(&format!("WALL{n}")), Some(n));
        }
        for info in ENEMIES {
            for name in info.sprites.death {
                assert!(bank.id(name).is_some(), "{name} missing");
            }
        }
        assert!(bank.id("SHOTGUN3").is_some());
        assert!(bank.id("TORCH2").is_some());
    }
}
