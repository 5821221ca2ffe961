//! The player: pose, movement and health.

use glam::Vec2;

use super::{InputCmd, collision::slide_move, tic::DT};
use crate::world::{Camera, Grid};

pub const PLAYER_SPEED: f32 = 4.0; // cells / second
pub const ROT_SPEED: f32 = 2.0; // rad / second
pub const RUN_FACTOR: f32 = 1.5;
pub const PLAYER_RADIUS: f32 = 0.2;
pub const MAX_HEALTH: i32 = 100;
/// One point of health comes back every this many tics.
pub const HEALTH_RECOVERY_TICS: u32 = 42;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub angle: f32,
    pub health: i32,
    recover_in: u32,
}

impl Player {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            health: MAX_HEALTH,
            recover_in: HEALTH_RECOVERY_TICS,
        }
    }

    /// Apply one tic of input: turn, then slide along the grid.
    pub fn update(&mut self, cmd: &InputCmd, grid: &Grid) {
        let turn = cmd.turn * ROT_SPEED * DT + cmd.look;
        if turn != 0.0 {
            self.angle = (self.angle + turn).rem_euclid(std::f32::consts::TAU);
        }

        if cmd.forward != 0.0 || cmd.strafe != 0.0 {
            let fwd = Vec2::from_angle(self.angle);
            let right = fwd.perp();
            let wish = (fwd * cmd.forward + right * cmd.strafe).normalize_or_zero();
            let speed = if cmd.run {
                PLAYER_SPEED * RUN_FACTOR
            } else {
                PLAYER_SPEED
            };
            self.pos = slide_move(grid, self.pos, wish * speed * DT, PLAYER_RADIUS).pos;
        }

        self.recover();
    }

    fn recover(&mut self) {
        if self.is_dead() || self.health >= MAX_HEALTH {
            self.recover_in = HEALTH_RECOVERY_TICS;
            return;
        }
        self.recover_in = self.recover_in.saturating_sub(1);
        if self.recover_in == 0 {
            self.health += 1;
            self.recover_in = HEALTH_RECOVERY_TICS;
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
        self.recover_in = HEALTH_RECOVERY_TICS;
        log::debug!("player hit for {amount}, health {}", self.health);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[inline]
    pub fn camera(&self, fov: f32) -> Camera {
        Camera::new(self.pos, self.angle, fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn grid() -> Grid {
        Grid::bordered(8, 8, 1)
    }

    #[test]
    fn walks_forward_at_speed() {
        let mut p = Player::new(Vec2::new(2.5, 2.5), 0.0);
        let cmd = InputCmd {
            forward: 1.0,
            ..Default::default()
        };
        p.update(&cmd, &grid());
        assert!((p.pos.x - (2.5 + PLAYER_SPEED * DT)).abs() < 1e-5);
        assert!((p.pos.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn strafe_right_moves_down_the_map_when_facing_east() {
        let mut p = Player::new(Vec2::new(2.5, 2.5), 0.0);
        let cmd = InputCmd {
            strafe: 1.0,
            ..Default::default()
        };
        p.update(&cmd, &grid());
        assert!(p.pos.y > 2.5);
    }

    #[test]
    fn turning_wraps_and_look_adds() {
        let mut p = Player::new(Vec2::new(2.5, 2.5), 0.0);
        let cmd = InputCmd {
            turn: -1.0,
            look: -FRAC_PI_2,
            ..Default::default()
        };
        p.update(&cmd, &grid());
        let expect = std::f32::consts::TAU - FRAC_PI_2 - ROT_SPEED * DT;
        assert!((p.angle - expect).abs() < 1e-4);
    }

    #[test]
    fn health_regenerates_slowly_and_not_when_dead() {
        let mut p = Player::new(Vec2::new(2.5, 2.5), 0.0);
        p.take_damage(10);
        let idle = InputCmd::default();
        for _ in 0..HEALTH_RECOVERY_TICS - 1 {
            p.update(&idle, &grid());
        }
        assert_eq!(p.health, 90);
        p.update(&idle, &grid());
        assert_eq!(p.health, 91);

        p.take_damage(500);
        assert!(p.is_dead());
        for _ in 0..HEALTH_RECOVERY_TICS * 2 {
            p.update(&idle, &grid());
        }
        assert_eq!(p.health, 0);
    }
}
