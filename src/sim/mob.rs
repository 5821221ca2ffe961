use super::{Angle, Animation, Class, Decor, Health, Position, ai::Enemy};
use crate::defs::{ActorFlags, DecorInfo, EnemyInfo};
use glam::Vec2;
use hecs::World;

pub fn spawn_enemy(
    world: &mut World,
    info: &'static EnemyInfo,
    pos: Vec2,
    angle: f32,
    stagger: u32,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Angle(angle),
        Health(info.health),
        Enemy::new(stagger),
        Animation::looping(info.sprites.idle),
        ActorFlags::MONSTER,
        Class(info),
    ))
}

/// Decorations never block and never get shot.
pub fn spawn_decor(world: &mut World, info: &'static DecorInfo, pos: Vec2) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Animation::looping(info.frames),
        ActorFlags::empty(),
        Decor(info),
    ))
}
