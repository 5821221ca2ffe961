pub mod camera;
pub mod grid;
pub mod level;
pub mod maps;
pub mod texture;

pub use grid::{Cell, Grid, GridError, OPEN, Tile};
pub use level::{Level, LevelError, Thing};

pub use camera::Camera;

pub use texture::{NO_TEXTURE, Rgba, TEXTURE_SIZE, Texture, TextureBank, TextureError, TextureId};
