use glam::{Vec2, vec2};

/// Player view-point in world space.
///
/// * World y grows *down* the map; yaw 0 looks east (+x) and positive yaw
///   turns right, so ray angle increases from the left screen edge to the
///   right one.
/// * Read-only for everything but the player update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub yaw: f32, // radians
    pub fov: f32, // horizontal FoV (radians)
}

impl Camera {
    /// Create a new camera at `pos`, facing `yaw`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    /// Transform a world point `p` into camera-local coords:
    ///  .x = lateral offset (+ right)
    ///  .y = depth along forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        vec2(d.dot(self.right()), d.dot(self.forward()))
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }

    /// Unit vector pointing to the camera's right (towards higher columns).
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        self.forward().perp()
    }

    /*───────────────── projection / frustum helpers ─────────────────*/

    /// Ray angle for column `col` of `n`, sampled at the column centre so
    /// the middle column of an odd `n` looks exactly along `yaw`.
    #[inline]
    pub fn ray_angle(&self, col: usize, n: usize) -> f32 {
        let t = (col as f32 + 0.5) / n as f32 - 0.5;
        self.yaw + self.fov * t
    }

    /// Fractional column (0 … n) at which a camera-space point appears.
    /// Inverse of [`ray_angle`](Self::ray_angle); angle-linear like the rays.
    #[inline]
    pub fn column_of(&self, cam: Vec2, n: usize) -> f32 {
        let angle = cam.x.atan2(cam.y);
        (angle / self.fov + 0.5) * n as f32
    }

    /// Pixel-per-world-unit scale for viewport width `w`.
    ///
    /// ```text
    /// focal = w / (2 * tan(fov/2))
    /// ```
    #[inline]
    pub fn screen_scale(&self, w: usize) -> f32 {
        (w as f32) * 0.5 / (self.fov * 0.5).tan()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate (positive = turn right).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
