/// Terrain cell kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so terrain semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Pit, // Swallows slimes; a box falling in fills it
}

impl Cell {
    /// Does this cell stop every actor from entering?
    pub fn is_blocking(self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_pit(self) -> bool {
        matches!(self, Cell::Pit)
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall  => '#',
            Cell::Pit   => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'O' => Some(Cell::Pit),
            _ => None,
        }
    }
}
