pub mod ai;
mod collision;
mod components;
mod mob;
pub mod player;
mod spacial;
mod systems;
mod tic;
pub mod weapon;

pub use ai::{AiEvent, AiState, Enemy};
pub use collision::{MoveResult, slide_move};
pub use components::{Angle, Animation, Class, Decor, Health, InputCmd, Position};
pub use mob::{spawn_decor, spawn_enemy};
pub use player::Player;
pub use spacial::{Occupancy, ThingSpatial};
pub use systems::{ANIM_TICS, animation, sprites};
pub use tic::{DT, Frame, Outcome, SIM_FPS, TicRunner};
pub use weapon::Weapon;
