use glam::Vec2;

use crate::defs::{DecorInfo, EnemyInfo};

/// World-space position (cell units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Facing angle in radians, same convention as the camera yaw.
#[derive(Debug, Clone, Copy)]
pub struct Angle(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

#[derive(Debug, Copy, Clone)]
pub struct Class(pub &'static EnemyInfo);

#[derive(Debug, Copy, Clone)]
pub struct Decor(pub &'static DecorInfo);

/// Frame cycling over a fixed list of texture names.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    pub frames: &'static [&'static str],
    pub frame: usize,
    /// Tics until the next frame.
    pub tics: u32,
    /// A non-looping animation stops on its last frame.
    pub looping: bool,
}

impl Animation {
    pub fn looping(frames: &'static [&'static str]) -> Self {
        Self {
            frames,
            frame: 0,
            tics: super::ANIM_TICS,
            looping: true,
        }
    }

    pub fn once(frames: &'static [&'static str]) -> Self {
        Self {
            looping: false,
            ..Self::looping(frames)
        }
    }

    /// Switch to another frame list, restarting only if it changed.
    pub fn set(&mut self, frames: &'static [&'static str], looping: bool) {
        if self.frames.as_ptr() != frames.as_ptr() {
            *self = if looping {
                Self::looping(frames)
            } else {
                Self::once(frames)
            };
        }
    }

    #[inline]
    pub fn current(&self) -> &'static str {
        self.frames[self.frame.min(self.frames.len().saturating_sub(1))]
    }

    #[inline]
    pub fn finished(&self) -> bool {
        !self.looping && self.frame + 1 >= self.frames.len()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f32, // -1 ..= 1
    pub strafe: f32,  // -1 ..= 1  (left / right)
    pub turn: f32,    // -1 ..= 1  (left / right)
    /// Extra yaw this tic from the mouse, radians.
    pub look: f32,
    pub run: bool,  // Shift
    pub fire: bool, // Ctrl / LMB
}
