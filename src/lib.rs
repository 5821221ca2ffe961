//! Grid ray-casting engine: DDA ray casting, BFS enemy pathing, sprite
//! projection and a small hecs-driven simulation around them.

pub mod defs;
pub mod engine;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod world;
