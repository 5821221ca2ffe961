use hecs::World;

use super::{Animation, Class, Decor, Position};
use crate::engine::SpriteRef;

/// Tics each animation frame stays on screen.
pub const ANIM_TICS: u32 = 8;

/* ── Animation system ─────────────────────────────────────────────── */
pub fn animation(world: &mut World) {
    for (_, anim) in world.query_mut::<&mut Animation>() {
        if anim.frames.len() <= 1 || anim.finished() {
            continue;
        }
        anim.tics = anim.tics.saturating_sub(1);
        if anim.tics == 0 {
            anim.frame = if anim.looping {
                (anim.frame + 1) % anim.frames.len()
            } else {
                anim.frame + 1
            };
            anim.tics = ANIM_TICS;
        }
    }
}

/* ── Billboards for the renderer ──────────────────────────────────── */
pub fn sprites(world: &World) -> Vec<SpriteRef> {
    let mut out = Vec::new();
    for (_, (pos, anim, class, decor)) in world
        .query::<(&Position, &Animation, Option<&Class>, Option<&Decor>)>()
        .iter()
    {
        let (scale, shift) = match (class, decor) {
            (Some(c), _) => (c.0.scale, c.0.shift),
            (None, Some(d)) => (d.0.scale, d.0.shift),
            (None, None) => continue,
        };
        out.push(SpriteRef {
            pos: pos.0,
            name: anim.current(),
            scale,
            shift,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{DECORATIONS, ENEMIES};
    use crate::sim::mob::{spawn_decor, spawn_enemy};
    use glam::Vec2;

    #[test]
    fn looping_wraps_and_once_sticks() {
        let mut world = World::new();
        let torch = spawn_decor(&mut world, &DECORATIONS[1], Vec2::new(1.5, 1.5));
        let soldier = spawn_enemy(&mut world, &ENEMIES[0], Vec2::new(2.5, 1.5), 0.0, 1);
        *world.get::<&mut Animation>(soldier).unwrap() = Animation::once(ENEMIES[0].sprites.death);

        for _ in 0..ANIM_TICS * 3 {
            animation(&mut world);
        }
        assert_eq!(world.get::<&Animation>(torch).unwrap().frame, 0);
        assert!(world.get::<&Animation>(soldier).unwrap().finished());

        for _ in 0..ANIM_TICS * 10 {
            animation(&mut world);
        }
        assert_eq!(world.get::<&Animation>(soldier).unwrap().current(), "SOLDIER_DEATH3");
    }

    #[test]
    fn sprites_cover_enemies_and_decor() {
        let mut world = World::new();
        spawn_decor(&mut world, &DECORATIONS[0], Vec2::new(1.5, 1.5));
        spawn_enemy(&mut world, &ENEMIES[2], Vec2::new(2.5, 1.5), 0.0, 1);
        let mut names: Vec<_> = sprites(&world).into_iter().map(|s| s.name).collect();
        names.sort();
        assert_eq!(names, ["CYBER_IDLE0", "LAMP"]);
    }
}
