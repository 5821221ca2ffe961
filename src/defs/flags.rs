use bitflags::bitflags;

bitflags! {
    /// Behaviour / collision flags carried by every actor at runtime.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActorFlags: u8 {
        // Occupies its cell in the pathing snapshot.
        const SOLID     = 0x01;
        // Can be hit by the weapon.
        const SHOOTABLE = 0x02;
        // Dead body, rendered with the last death frame.
        const CORPSE    = 0x04;
    }
}

impl ActorFlags {
    /// Flags of a freshly spawned enemy.
    pub const MONSTER: ActorFlags = ActorFlags::SOLID.union(ActorFlags::SHOOTABLE);

    /// Strip the living bits and mark as corpse.
    #[inline]
    pub fn kill(&mut self) {
        self.remove(ActorFlags::SOLID | ActorFlags::SHOOTABLE);
        self.insert(ActorFlags::CORPSE);
    }
}
