//! Static actor tables: enemy classes and decorations.
//!
//! Map glyphs resolve to entries here through a lazily built index, the
//! same way the runtime never stores class data per entity; it only keeps
//! a `&'static` pointer into these tables.

pub mod flags;

pub use self::flags::ActorFlags;

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Sprite names per animation set; resolved to texture ids by the renderer.
#[derive(Debug)]
pub struct SpriteSet {
    pub idle: &'static [&'static str],
    pub walk: &'static [&'static str],
    pub attack: &'static [&'static str],
    pub pain: &'static [&'static str],
    pub death: &'static [&'static str],
}

/// Per-class enemy parameters.  Distances in cells, speeds in cells/second.
#[derive(Debug)]
pub struct EnemyInfo {
    pub id: &'static str,
    pub glyph: char,
    pub health: i32,
    pub speed: f32,
    pub radius: f32,
    /// Start shooting once the player is closer than this.
    pub attack_dist: f32,
    pub attack_damage: i32,
    /// Probability that one attack hits.
    pub accuracy: f32,
    /// Tics between two attacks.
    pub attack_tics: u32,
    /// Sprite height relative to a wall, and its vertical shift.
    pub scale: f32,
    pub shift: f32,
    pub sprites: SpriteSet,
}

#[derive(Debug)]
pub struct DecorInfo {
    pub id: &'static str,
    pub glyph: char,
    /// A single frame is a static sprite; more frames loop.
    pub frames: &'static [&'static str],
    pub scale: f32,
    pub shift: f32,
}

pub static ENEMIES: &[EnemyInfo] = &[
    EnemyInfo {
        id: "SOLDIER",
        glyph: 's',
        health: 100,
        speed: 1.8,
        radius: 0.2,
        attack_dist: 4.5,
        attack_damage: 10,
        accuracy: 0.15,
        attack_tics: 30,
        scale: 0.6,
        shift: 0.38,
        sprites: SpriteSet {
            idle: &["SOLDIER_IDLE0", "SOLDIER_IDLE1"],
            walk: &["SOLDIER_WALK0", "SOLDIER_WALK1", "SOLDIER_WALK2", "SOLDIER_WALK3"],
            attack: &["SOLDIER_ATTACK0", "SOLDIER_ATTACK1"],
            pain: &["SOLDIER_PAIN"],
            death: &["SOLDIER_DEATH0", "SOLDIER_DEATH1", "SOLDIER_DEATH2", "SOLDIER_DEATH3"],
        },
    },
    EnemyInfo {
        id: "CACO",
        glyph: 'c',
        health: 150,
        speed: 3.0,
        radius: 0.3,
        // reaches anywhere in a neighbouring cell
        attack_dist: 1.5,
        attack_damage: 25,
        accuracy: 0.35,
        attack_tics: 36,
        scale: 0.7,
        shift: 0.27,
        sprites: SpriteSet {
            idle: &["CACO_IDLE0", "CACO_IDLE1"],
            walk: &["CACO_WALK0", "CACO_WALK1", "CACO_WALK2"],
            attack: &["CACO_ATTACK0", "CACO_ATTACK1"],
            pain: &["CACO_PAIN"],
            death: &["CACO_DEATH0", "CACO_DEATH1", "CACO_DEATH2"],
        },
    },
    EnemyInfo {
        id: "CYBER",
        glyph: 'y',
        health: 350,
        speed: 3.3,
        radius: 0.35,
        attack_dist: 6.0,
        attack_damage: 15,
        accuracy: 0.25,
        attack_tics: 24,
        scale: 1.0,
        shift: 0.04,
        sprites: SpriteSet {
            idle: &["CYBER_IDLE0", "CYBER_IDLE1"],
            walk: &["CYBER_WALK0", "CYBER_WALK1", "CYBER_WALK2", "CYBER_WALK3"],
            attack: &["CYBER_ATTACK0", "CYBER_ATTACK1"],
            pain: &["CYBER_PAIN"],
            death: &["CYBER_DEATH0", "CYBER_DEATH1", "CYBER_DEATH2", "CYBER_DEATH3"],
        },
    },
];

pub static DECORATIONS: &[DecorInfo] = &[
    DecorInfo {
        id: "LAMP",
        glyph: 'l',
        frames: &["LAMP"],
        scale: 0.7,
        shift: 0.27,
    },
    DecorInfo {
        id: "TORCH",
        glyph: 't',
        frames: &["TORCH0", "TORCH1", "TORCH2"],
        scale: 0.8,
        shift: 0.16,
    },
];

/// Anything a map glyph can spawn.
#[derive(Clone, Copy, Debug)]
pub enum ThingInfo {
    Enemy(&'static EnemyInfo),
    Decor(&'static DecorInfo),
}

static BY_GLYPH: Lazy<HashMap<char, ThingInfo>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(ENEMIES.len() + DECORATIONS.len());
    for info in ENEMIES {
        map.insert(info.glyph, ThingInfo::Enemy(info));
    }
    for info in DECORATIONS {
        map.insert(info.glyph, ThingInfo::Decor(info));
    }
    map
});

pub fn by_glyph(glyph: char) -> Option<ThingInfo> {
    BY_GLYPH.get(&glyph).copied()
}

static BY_ID: Lazy<HashMap<&'static str, &'static EnemyInfo>> =
    Lazy::new(|| ENEMIES.iter().map(|info| (info.id, info)).collect());

pub fn by_id(id: &str) -> Option<&'static EnemyInfo> {
    BY_ID.get(id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_are_unique_and_resolve() {
        assert_eq!(BY_GLYPH.len(), ENEMIES.len() + DECORATIONS.len());
        assert!(matches!(by_glyph('s'), Some(ThingInfo::Enemy(i)) if i.id == "SOLDIER"));
        assert!(matches!(by_glyph('t'), Some(ThingInfo::Decor(i)) if i.id == "TORCH"));
        assert!(by_glyph('P').is_none());
        assert_eq!(by_id("CYBER").map(|i| i.health), Some(350));
    }

    #[test]
    fn every_enemy_has_frames_for_every_set() {
        for info in ENEMIES {
            let s = &info.sprites;
            for set in [s.idle, s.walk, s.attack, s.pain, s.death] {
                assert!(!set.is_empty(), "{} has an empty sprite set", info.id);
            }
        }
    }
}
