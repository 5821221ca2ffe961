//! Enemy behaviour: a small tagged state machine plus grid pathing.
//!
//! ```text
//!  Idle ──Spotted/Hurt──▶ Chasing ──InRange──▶ Attacking
//!                            ▲                     │
//!                            └─────OutOfRange──────┘
//!  any ──Killed──▶ Dead   (absorbing)
//! ```

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{
    Angle, Animation, Class, Position, collision::slide_move, player::Player, spacial::Occupancy,
    tic::DT,
};
use crate::{
    defs::ActorFlags,
    engine::{find_path, line_of_sight},
    world::{Cell, Grid, GridError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Chasing,
    Attacking,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiEvent {
    Spotted,
    Hurt,
    InRange,
    OutOfRange,
    Killed,
}

impl AiState {
    /// Transition table.  Pairs not listed keep the current state.
    pub fn on(self, ev: AiEvent) -> AiState {
        use AiEvent::*;
        use AiState::*;
        match (self, ev) {
            (Dead, _) => Dead,
            (_, Killed) => Dead,
            (Idle, Spotted | Hurt) => Chasing,
            (Chasing, InRange) => Attacking,
            (Attacking, OutOfRange) => Chasing,
            (s, _) => s,
        }
    }
}

/// Tics an enemy flinches after being shot.
pub const PAIN_TICS: u32 = 12;

/// Per-enemy brain.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub state: AiState,
    /// Remaining waypoints, next one first.
    pub path: VecDeque<Cell>,
    /// Tics until the next path search.
    pub repath_in: u32,
    /// Tics until the next attack roll.
    pub attack_in: u32,
    pub pain_tics: u32,
}

impl Enemy {
    /// `stagger` spreads the first path search of a group of enemies over
    /// several tics.
    pub fn new(stagger: u32) -> Self {
        Self {
            state: AiState::Idle,
            path: VecDeque::new(),
            repath_in: stagger,
            attack_in: 0,
            pain_tics: 0,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.state != AiState::Dead
    }
}

/// Run one tic of AI for every living enemy.
///
/// `occ` is the snapshot taken at the start of this tic; enemies moved
/// earlier in the same pass are still seen at their old cells.
pub fn enemy_ai(
    world: &mut World,
    grid: &Grid,
    occ: &Occupancy,
    player: &mut Player,
    path_interval: u32,
    rng: &mut Pcg32,
) -> Result<(), GridError> {
    let target = player.pos;
    let player_cell = Cell::of(target);

    for (me, (pos, angle, enemy, class, anim, flags)) in world.query_mut::<(
        &mut Position,
        &mut Angle,
        &mut Enemy,
        &Class,
        &mut Animation,
        &ActorFlags,
    )>() {
        if !enemy.alive() || flags.contains(ActorFlags::CORPSE) {
            continue;
        }
        let info = class.0;

        if enemy.pain_tics > 0 {
            enemy.pain_tics -= 1;
            anim.set(info.sprites.pain, false);
            continue;
        }

        /* ------------------------------------------------ perception */
        let sees = line_of_sight(grid, pos.0, target)?;
        let dist = pos.0.distance(target);
        let ev = match enemy.state {
            AiState::Idle if sees => Some(AiEvent::Spotted),
            AiState::Chasing | AiState::Attacking if sees && dist <= info.attack_dist => {
                Some(AiEvent::InRange)
            }
            AiState::Chasing | AiState::Attacking => Some(AiEvent::OutOfRange),
            _ => None,
        };
        if let Some(ev) = ev {
            let next = enemy.state.on(ev);
            if next != enemy.state {
                log::debug!("{:?} {:?}: {:?} → {:?}", info.id, me, enemy.state, next);
                if next == AiState::Attacking {
                    enemy.attack_in = 0;
                }
                if enemy.state == AiState::Attacking && next == AiState::Chasing {
                    enemy.repath_in = 0;
                }
                enemy.state = next;
            }
        }

        /* ------------------------------------------------ action     */
        match enemy.state {
            AiState::Idle => anim.set(info.sprites.idle, true),

            AiState::Attacking => {
                enemy.path.clear();
                angle.0 = face(pos.0, target, angle.0);
                anim.set(info.sprites.attack, true);
                if enemy.attack_in == 0 {
                    if rng.random::<f32>() < info.accuracy {
                        player.take_damage(info.attack_damage);
                    }
                    enemy.attack_in = info.attack_tics;
                } else {
                    enemy.attack_in -= 1;
                }
            }

            AiState::Chasing => {
                anim.set(info.sprites.walk, true);

                enemy.repath_in = enemy.repath_in.saturating_sub(1);
                let blocked_ahead = enemy
                    .path
                    .front()
                    .is_some_and(|&c| occ.occupied_by_other(c, me));
                if enemy.repath_in == 0 || blocked_ahead {
                    let from = Cell::of(pos.0);
                    let path = find_path(grid, from, player_cell, |c| occ.occupied_by_other(c, me))?;
                    if path.is_empty() && from != player_cell {
                        log::debug!("{} {:?}: no route to {:?}", info.id, me, player_cell);
                    }
                    enemy.path = path.into();
                    enemy.repath_in = path_interval;
                }

                // paths end next to the player; the last gap is closed directly
                let next = match enemy.path.front() {
                    Some(&c) if c != player_cell => c,
                    _ => {
                        if sees && Cell::of(pos.0).manhattan(player_cell) == 1 {
                            let step = info.speed * DT;
                            close_in(grid, pos, angle, target, player_cell, step, info.radius);
                        }
                        continue;
                    }
                };
                let goal = next.center();
                let step = info.speed * DT;
                if pos.0.distance(goal) <= step {
                    pos.0 = goal;
                    enemy.path.pop_front();
                } else {
                    let dir = (goal - pos.0).normalize_or_zero();
                    pos.0 = slide_move(grid, pos.0, dir * step, info.radius).pos;
                }
                angle.0 = face(pos.0, goal, angle.0);
            }

            AiState::Dead => {}
        }
    }
    Ok(())
}

/// Step straight at the player without entering their cell.
fn close_in(
    grid: &Grid,
    pos: &mut Position,
    angle: &mut Angle,
    target: Vec2,
    player_cell: Cell,
    step: f32,
    radius: f32,
) {
    let dir = (target - pos.0).normalize_or_zero();
    let moved = slide_move(grid, pos.0, dir * step, radius).pos;
    if Cell::of(moved) != player_cell {
        pos.0 = moved;
    }
    angle.0 = face(pos.0, target, angle.0);
}

/// Angle from `from` towards `to`; keeps `current` when they coincide.
fn face(from: Vec2, to: Vec2, current: f32) -> f32 {
    let d = to - from;
    if d.length_squared() < 1e-8 {
        current
    } else {
        d.y.atan2(d.x)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
