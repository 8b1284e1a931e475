/// Turn resolution: registry, world access, commit ordering, engine and
/// the level codec.

pub mod engine;
pub mod event;
pub mod forest;
pub mod level;
pub mod registry;
pub mod world;
