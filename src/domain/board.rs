/// Static terrain grid.
///
/// Stored y-major (`cells[y][x]`). Anything outside the grid counts as a
/// wall, so callers never bounds-check before asking `is_blocked`.
///
/// The board is only mutated by actor effects during tick (a box filling a
/// pit); it never changes during negotiation or commit.

use std::fmt;

use super::geometry::Vector2;
use super::tile::Cell;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Build from rows. Rows must already share one width (the level codec
    /// enforces this before construction).
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, |r| r.len());
        Board { width, height, cells }
    }

    pub fn empty(width: usize, height: usize) -> Self {
        Board { width, height, cells: vec![vec![Cell::Empty; width]; height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Vector2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Terrain at `pos`, `None` outside the grid.
    #[inline]
    pub fn cell(&self, pos: Vector2) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Out of range or wall.
    #[inline]
    pub fn is_blocked(&self, pos: Vector2) -> bool {
        self.cell(pos).map_or(true, Cell::is_blocking)
    }

    #[inline]
    pub fn is_pit(&self, pos: Vector2) -> bool {
        self.cell(pos).map_or(false, Cell::is_pit)
    }

    /// Overwrite one cell. Out-of-range writes are ignored.
    pub fn set(&mut self, pos: Vector2, cell: Cell) {
        if self.in_bounds(pos) {
            self.cells[pos.y as usize][pos.x as usize] = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|r| r.as_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        Board::from_rows(
            rows.iter()
                .map(|r| r.chars().map(|c| Cell::from_symbol(c).unwrap_or_default()).collect())
                .collect(),
        )
    }

    #[test]
    fn outside_is_blocked() {
        let b = board_from(&["..", ".."]);
        assert!(b.is_blocked(Vector2::new(-1, 0)));
        assert!(b.is_blocked(Vector2::new(0, -1)));
        assert!(b.is_blocked(Vector2::new(2, 0)));
        assert!(b.is_blocked(Vector2::new(0, 2)));
        assert!(!b.is_blocked(Vector2::new(1, 1)));
    }

    #[test]
    fn walls_block_pits_do_not() {
        let b = board_from(&["#O."]);
        assert!(b.is_blocked(Vector2::new(0, 0)));
        assert!(!b.is_blocked(Vector2::new(1, 0)));
        assert!(b.is_pit(Vector2::new(1, 0)));
        assert!(!b.is_pit(Vector2::new(2, 0)));
    }

    #[test]
    fn filling_a_pit() {
        let mut b = board_from(&["O"]);
        b.set(Vector2::new(0, 0), Cell::Empty);
        assert!(!b.is_pit(Vector2::new(0, 0)));
        // out of range: ignored
        b.set(Vector2::new(5, 5), Cell::Wall);
        assert_eq!(b.to_string(), ".");
    }
}
