//! Hit-scan shotgun.
//!
//! Firing casts one ray along the exact view direction and damages the
//! nearest living enemy in front of the wall whose centre lies close
//! enough to the crosshair, whatever cell it is standing in.

use hecs::{Entity, World};

use super::{
    Animation, Class, Health,
    ai::{AiEvent, Enemy, PAIN_TICS},
    spacial::Occupancy,
};
use crate::{
    defs::ActorFlags,
    engine::cast_ray,
    world::{Camera, Grid, GridError},
};

pub const WEAPON_DAMAGE: i32 = 50;
/// Nothing farther than this is hit, even with open sky behind it.
pub const WEAPON_RANGE: f32 = 20.0;
/// Lateral distance from the view axis that still counts as a hit.
pub const ENEMY_HIT_HALF_WIDTH: f32 = 0.3;
/// Tics the weapon is busy after a shot.
pub const RELOAD_TICS: u32 = 24;

pub const FRAMES: [&str; 4] = ["SHOTGUN0", "SHOTGUN1", "SHOTGUN2", "SHOTGUN3"];

#[derive(Debug, Clone, Default)]
pub struct Weapon {
    reload_in: u32,
}

impl Weapon {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.reload_in == 0
    }

    /// Overlay frame: idle frame when ready, 1‥3 through the reload.
    pub fn sprite(&self) -> &'static str {
        if self.ready() {
            return FRAMES[0];
        }
        let elapsed = RELOAD_TICS - self.reload_in;
        FRAMES[1 + (elapsed * 3 / RELOAD_TICS) as usize]
    }

    /// One tic: advance the reload and, if `fire` and ready, shoot.
    ///
    /// Returns the entity that took the hit, if any.
    pub fn update(
        &mut self,
        fire: bool,
        world: &mut World,
        grid: &Grid,
        cam: &Camera,
    ) -> Result<Option<Entity>, GridError> {
        if !self.ready() {
            self.reload_in -= 1;
            return Ok(None);
        }
        if !fire {
            return Ok(None);
        }
        self.reload_in = RELOAD_TICS;

        let target = hit_scan(world, grid, cam)?;
        if let Some(ent) = target {
            damage(world, ent, WEAPON_DAMAGE);
        }
        Ok(target)
    }
}

/// First shootable enemy along the view axis, nearer than the wall.
pub fn hit_scan(world: &World, grid: &Grid, cam: &Camera) -> Result<Option<Entity>, GridError> {
    let wall = cast_ray(grid, cam, cam.yaw, WEAPON_RANGE)?
        .map_or(f32::INFINITY, |h| h.perp_distance);
    let occ = Occupancy::build(world);

    let best = occ
        .iter()
        .filter(|s| s.flags.contains(ActorFlags::SHOOTABLE))
        .filter_map(|s| {
            let p = cam.to_cam(s.pos.0);
            let hit = p.y > 0.0
                && p.y < wall
                && p.y <= WEAPON_RANGE
                && p.x.abs() <= ENEMY_HIT_HALF_WIDTH;
            hit.then_some((p.y, s.ent))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));
    Ok(best.map(|(_, ent)| ent))
}

/// Apply `amount` of damage; kills drop SOLID/SHOOTABLE and play the death
/// animation once.
pub fn damage(world: &mut World, ent: Entity, amount: i32) {
    let Ok((hp, enemy, flags, anim, class)) = world
        .query_one_mut::<(&mut Health, &mut Enemy, &mut ActorFlags, &mut Animation, &Class)>(ent)
    else {
        return;
    };
    if !enemy.alive() {
        return;
    }

    hp.0 -= amount;
    if hp.0 <= 0 {
        enemy.state = enemy.state.on(AiEvent::Killed);
        enemy.path.clear();
        flags.kill();
        *anim = Animation::once(class.0.sprites.death);
        log::info!("{} {:?} killed", class.0.id, ent);
    } else {
        enemy.state = enemy.state.on(AiEvent::Hurt);
        enemy.pain_tics = PAIN_TICS;
        anim.set(class.0.sprites.pain, false);
        log::debug!("{} {:?} hurt, {} hp left", class.0.id, ent, hp.0);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        defs::ENEMIES,
        sim::{Angle, Position, ai::AiState},
    };
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_3;

    fn spawn(world: &mut World, pos: Vec2, class: usize) -> Entity {
        let info = &ENEMIES[class];
        world.spawn((
            Position(pos),
            Angle(0.0),
            Enemy::new(1),
            Class(info),
            Animation::looping(info.sprites.idle),
            ActorFlags::MONSTER,
            Health(info.health),
        ))
    }

    fn cam_at(x: f32, y: f32) -> Camera {
        Camera::new(Vec2::new(x, y), 0.0, FRAC_PI_3)
    }

    #[test]
    fn nearest_enemy_on_axis_is_hit() {
        let grid = Grid::bordered(10, 5, 1);
        let mut world = World::new();
        let far = spawn(&mut world, Vec2::new(7.5, 2.5), 0);
        let near = spawn(&mut world, Vec2::new(4.5, 2.6), 0);
        let _off_axis = spawn(&mut world, Vec2::new(3.5, 3.5), 0);
        assert_eq!(hit_scan(&world, &grid, &cam_at(1.5, 2.5)).unwrap(), Some(near));

        damage(&mut world, near, 1000);
        assert_eq!(hit_scan(&world, &grid, &cam_at(1.5, 2.5)).unwrap(), Some(far));
    }

    #[test]
    fn walls_shield_enemies() {
        let mut rows = vec![vec![0u8; 10]; 5];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, t) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == 9 || y == 4 || (x == 4 && y == 2) {
                    *t = 1;
                }
            }
        }
        let grid = Grid::from_rows(&rows).unwrap();
        let mut world = World::new();
        spawn(&mut world, Vec2::new(6.5, 2.5), 0);
        assert_eq!(hit_scan(&world, &grid, &cam_at(1.5, 2.5)).unwrap(), None);
    }

    #[test]
    fn enemy_in_players_own_cell_can_be_hit() {
        let grid = Grid::bordered(5, 5, 1);
        let mut world = World::new();
        let e = spawn(&mut world, Vec2::new(2.8, 2.5), 0);
        assert_eq!(hit_scan(&world, &grid, &cam_at(2.2, 2.5)).unwrap(), Some(e));
        // but not one behind the player
        assert_eq!(hit_scan(&world, &grid, &cam_at(2.9, 2.5)).unwrap(), None);
    }

    #[test]
    fn enemy_straddling_a_row_boundary_is_hit() {
        // the ray runs along row 3, the soldier's centre is in row 2
        let grid = Grid::bordered(10, 6, 1);
        let mut world = World::new();
        let e = spawn(&mut world, Vec2::new(6.5, 2.95), 0);
        let cam = cam_at(1.5, 3.1);
        assert!(cam.to_cam(Vec2::new(6.5, 2.95)).x.abs() < ENEMY_HIT_HALF_WIDTH);
        assert_eq!(hit_scan(&world, &grid, &cam).unwrap(), Some(e));

        // same offset, too far off the axis
        let mut world = World::new();
        spawn(&mut world, Vec2::new(6.5, 2.7), 0);
        assert_eq!(hit_scan(&world, &grid, &cam).unwrap(), None);
    }

    #[test]
    fn two_shots_kill_a_soldier_and_reload_gates_fire() {
        let grid = Grid::bordered(10, 5, 1);
        let mut world = World::new();
        let e = spawn(&mut world, Vec2::new(5.5, 2.5), 0);
        let cam = cam_at(1.5, 2.5);
        let mut w = Weapon::new();

        assert_eq!(w.update(true, &mut world, &grid, &cam).unwrap(), Some(e));
        assert_eq!(world.get::<&Health>(e).unwrap().0, 50);
        assert_eq!(world.get::<&Enemy>(e).unwrap().state, AiState::Chasing);
        assert!(!w.ready());
        assert_ne!(w.sprite(), FRAMES[0]);

        // busy: trigger held through the reload does nothing
        for _ in 0..RELOAD_TICS {
            assert_eq!(w.update(true, &mut world, &grid, &cam).unwrap(), None);
        }
        assert!(w.ready());
        assert_eq!(w.sprite(), FRAMES[0]);

        assert_eq!(w.update(true, &mut world, &grid, &cam).unwrap(), Some(e));
        assert_eq!(world.get::<&Enemy>(e).unwrap().state, AiState::Dead);
        let flags = *world.get::<&ActorFlags>(e).unwrap();
        assert!(flags.contains(ActorFlags::CORPSE));
        assert!(!flags.intersects(ActorFlags::SOLID | ActorFlags::SHOOTABLE));

        // corpses are transparent to further shots
        for _ in 0..RELOAD_TICS {
            w.update(false, &mut world, &grid, &cam).unwrap();
        }
        assert_eq!(w.update(true, &mut world, &grid, &cam).unwrap(), None);
    }
}
