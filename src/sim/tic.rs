use super::{
    Enemy, InputCmd, ai, mob, player::Player, spacial::Occupancy, systems, weapon::Weapon,
};
use crate::{
    defs::ThingInfo,
    engine::{DepthBuffer, SpriteRef, cast},
    settings::Settings,
    world::{Camera, GridError, Level},
};
use hecs::World;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);
/// Upper bound on catch-up tics per `pump`, so a stall does not snowball.
const MAX_CATCH_UP: u32 = 5;

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// What the renderer needs from one tic.
#[derive(Debug, Clone)]
pub struct Frame {
    pub camera: Camera,
    pub depth: DepthBuffer,
}

/// Owns the ECS world and drives all game‑logic systems.
pub struct TicRunner {
    world: World,
    player: Player,
    weapon: Weapon,
    rng: Pcg32,
    tic: u64,
    fov: f32,
    num_rays: usize,
    max_depth: f32,
    path_interval: u32,
    last: Instant,
}

impl TicRunner {
    /// Spawn the level's things and place the player at its start.
    pub fn new(level: &Level, settings: &Settings) -> Self {
        let mut world = World::new();
        let interval = settings.path_interval.max(1);
        let mut enemies = 0u32;
        for thing in &level.things {
            match thing.info {
                ThingInfo::Enemy(info) => {
                    // first searches spread over one interval
                    let stagger = 1 + enemies % interval;
                    mob::spawn_enemy(&mut world, info, thing.pos, level.player_angle, stagger);
                    enemies += 1;
                }
                ThingInfo::Decor(info) => {
                    mob::spawn_decor(&mut world, info, thing.pos);
                }
            }
        }
        log::info!("level `{}`: {} enemies", level.name, enemies);

        Self {
            world,
            player: Player::new(level.player_start, level.player_angle),
            weapon: Weapon::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            tic: 0,
            fov: settings.fov(),
            num_rays: settings.rays(),
            max_depth: settings.max_depth,
            path_interval: interval,
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[inline]
    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    #[inline]
    pub fn tic_count(&self) -> u64 {
        self.tic
    }

    pub fn camera(&self) -> Camera {
        self.player.camera(self.fov)
    }

    /// Advance enough tics to synchronise simulation with real time.
    ///
    /// Returns the frame of the last tic run, `None` if none was due.
    pub fn pump(&mut self, level: &Level, cmd: &InputCmd) -> Result<Option<Frame>, GridError> {
        let mut frame = None;
        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            if ran == MAX_CATCH_UP {
                self.last = Instant::now();
                break;
            }
            frame = Some(self.tick(level, cmd)?);
            self.last += TIC;
            ran += 1;
        }
        Ok(frame)
    }

    /* ---------------------------------------------------------------- */
    /* run one fixed‑rate game tic                                       */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, level: &Level, cmd: &InputCmd) -> Result<Frame, GridError> {
        if !self.player.is_dead() {
            self.player.update(cmd, &level.grid);
        }
        let camera = self.camera();
        let depth = cast(&camera, &level.grid, self.num_rays, self.max_depth)?;

        let occ = Occupancy::build(&self.world);
        ai::enemy_ai(
            &mut self.world,
            &level.grid,
            &occ,
            &mut self.player,
            self.path_interval,
            &mut self.rng,
        )?;

        let fire = cmd.fire && !self.player.is_dead();
        self.weapon.update(fire, &mut self.world, &level.grid, &camera)?;
        systems::animation(&mut self.world);

        self.tic += 1;
        Ok(Frame { camera, depth })
    }

    /// Billboards to draw this frame.
    pub fn sprites(&self) -> Vec<SpriteRef> {
        systems::sprites(&self.world)
    }

    /// Living enemies left.
    pub fn enemies_alive(&self) -> usize {
        self.world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, e)| e.alive())
            .count()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.player.is_dead() {
            Some(Outcome::Defeat)
        } else if self.enemies_alive() == 0 {
            Some(Outcome::Victory)
        } else {
            None
        }
    }
}
