/// Terminal front end: key/script input and the board view.

pub mod input;
pub mod renderer;
