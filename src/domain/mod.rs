/// Leaf types: geometry, terrain, actors and their proposals.

pub mod actor;
pub mod board;
pub mod door;
pub mod geometry;
pub mod pushable;
pub mod pusher;
pub mod slime;
pub mod spike;
pub mod state;
pub mod switch;
pub mod tile;
