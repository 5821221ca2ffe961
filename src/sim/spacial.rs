//! Per-tic occupancy snapshot, a very small cell hash.
//!
//! * One bucket ≙ one grid cell.
//! * Each bucket keeps a `SmallVec`; maps rarely put more than one or two
//!   live enemies in the same cell, so lookups stay allocation-free in the
//!   common case.
//!
//! Built once per tic *before* the AI pass and read-only afterwards, so
//! every enemy plans against the same picture of the world.

use hecs::{Entity, World};
use smallvec::SmallVec;
use std::collections::HashMap;

use super::{Class, Position};
use crate::defs::ActorFlags;
use crate::world::Cell;

/// Pre-baked data needed during AI / hit-scan without touching `World`.
#[derive(Clone, Copy, Debug)]
pub struct ThingSpatial {
    pub ent: Entity,
    pub pos: Position,
    pub class: Class,
    pub flags: ActorFlags,
}

type Bucket = SmallVec<[ThingSpatial; 4]>;

#[derive(Default, Debug)]
pub struct Occupancy {
    cells: HashMap<Cell, Bucket>,
}

impl Occupancy {
    /// Snapshot every SOLID enemy; corpses are left out.
    pub fn build(world: &World) -> Self {
        let mut occ = Self::default();
        for (ent, (pos, class, flags)) in world.query::<(&Position, &Class, &ActorFlags)>().iter() {
            if flags.contains(ActorFlags::SOLID) {
                occ.insert(ThingSpatial {
                    ent,
                    pos: *pos,
                    class: *class,
                    flags: *flags,
                });
            }
        }
        occ
    }

    #[inline]
    pub fn insert(&mut self, stub: ThingSpatial) {
        self.cells.entry(Cell::of(stub.pos.0)).or_default().push(stub);
    }

    /// `true` when an enemy other than `me` stands in `c`.
    #[inline]
    pub fn occupied_by_other(&self, c: Cell, me: Entity) -> bool {
        self.cells
            .get(&c)
            .is_some_and(|b| b.iter().any(|s| s.ent != me))
    }

    /// Every snapshotted thing, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ThingSpatial> {
        self.cells.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|b| b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::ENEMIES;
    use glam::Vec2;

    #[test]
    fn corpses_are_not_obstacles() {
        let mut world = World::new();
        let a = world.spawn((Position(Vec2::new(1.5, 1.5)), Class(&ENEMIES[0]), ActorFlags::MONSTER));
        let b = world.spawn((Position(Vec2::new(2.5, 1.5)), Class(&ENEMIES[0]), ActorFlags::MONSTER));
        let mut dead = ActorFlags::MONSTER;
        dead.kill();
        world.spawn((Position(Vec2::new(3.5, 1.5)), Class(&ENEMIES[0]), dead));

        let occ = Occupancy::build(&world);
        assert_eq!(occ.len(), 2);
        assert!(occ.occupied_by_other(Cell::new(2, 1), a));
        assert!(!occ.occupied_by_other(Cell::new(2, 1), b));
        assert!(!occ.occupied_by_other(Cell::new(3, 1), a));
        assert!(!occ.occupied_by_other(Cell::new(5, 5), a));
        assert!(occ.iter().all(|s| s.ent == a || s.ent == b));
    }
}
