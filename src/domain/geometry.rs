/// Integer grid geometry: positions and the five input directions.

use std::fmt;
use std::ops::Add;

/// A cell coordinate. `y` grows downwards (row-major boards).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Vector2 { x, y }
    }

    /// The neighbouring cell one step in `dir`. `Direction::None` stays put.
    #[inline]
    pub fn step(self, dir: Direction) -> Vector2 {
        self + dir.offset()
    }

    /// Direction of travel from `self` towards an orthogonal neighbour.
    ///
    /// Vertical wins when both axes are equal; non-adjacent inputs still get
    /// the dominant axis, and identical points yield `Direction::None`.
    pub fn direction_to(self, other: Vector2) -> Direction {
        if self == other {
            return Direction::None;
        }
        if self.x == other.x {
            if self.y > other.y { Direction::Up } else { Direction::Down }
        } else if self.x > other.x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One turn's input. `None` is a turn without movement.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn offset(self) -> Vector2 {
        match self {
            Direction::None  => Vector2::new(0, 0),
            Direction::Up    => Vector2::new(0, -1),
            Direction::Down  => Vector2::new(0, 1),
            Direction::Left  => Vector2::new(-1, 0),
            Direction::Right => Vector2::new(1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::None  => "none",
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
