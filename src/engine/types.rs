use std::ops::Index;

use crate::world::{Cell, TextureId};

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // pre-derived for speed
    pub half_w: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: w as f32 * 0.5,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Which kind of grid line the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Crossed an x = const line: east/west face.
    Vertical,
    /// Crossed a y = const line: north/south face.
    Horizontal,
}

/// One column of the depth buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance to the camera plane along the view axis (not Euclidean).
    pub perp_distance: f32,
    /// Wall tile value of the hit cell; doubles as its wall `TextureId`.
    pub texture_id: TextureId,
    /// Position along the wall face in `[0, 1)`.
    pub texture_offset: f32,
    pub side: Side,
    pub cell: Cell,
}

/// Per-frame wall distances, one entry per ray column.
///
/// A fresh value every frame.  `None` means the ray hit nothing within the
/// maximum distance (sky).  Column index grows with ray angle.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    columns: Vec<Option<RayHit>>,
    angles: Vec<f32>,
    max_depth: f32,
}

impl DepthBuffer {
    pub(crate) fn new(columns: Vec<Option<RayHit>>, angles: Vec<f32>, max_depth: f32) -> Self {
        debug_assert_eq!(columns.len(), angles.len());
        Self {
            columns,
            angles,
            max_depth,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    /// Ray angle of column `col`.
    #[inline]
    pub fn angle(&self, col: usize) -> f32 {
        self.angles[col]
    }

    /// Occlusion depth of `col`; sky columns never occlude.
    #[inline]
    pub fn depth(&self, col: usize) -> f32 {
        self.columns
            .get(col)
            .copied()
            .flatten()
            .map_or(f32::INFINITY, |h| h.perp_distance)
    }

    /// Ray column feeding screen pixel column `x` of a `width`-wide view.
    #[inline]
    pub fn column_for_pixel(&self, x: usize, width: usize) -> usize {
        (x * self.columns.len() / width.max(1)).min(self.columns.len().saturating_sub(1))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<RayHit>> {
        self.columns.iter()
    }
}

impl Index<usize> for DepthBuffer {
    type Output = Option<RayHit>;
    fn index(&self, col: usize) -> &Self::Output {
        &self.columns[col]
    }
}
