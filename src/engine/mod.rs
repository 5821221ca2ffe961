//! View-independent engine core: ray casting, grid search, sprite
//! projection and frame assembly.

pub mod frame;
pub mod pathfinding;
pub mod projection;
pub mod raycast;
pub mod types;

pub use frame::{HORIZONTAL_SHADE, Palette, SpriteRef, build_frame};
pub use pathfinding::find_path;
pub use raycast::{GridWalk, MAX_DEPTH, Step, cast, cast_ray, line_of_sight};
pub use types::{DepthBuffer, RayHit, Screen, Side};
