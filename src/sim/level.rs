/// Level text codec and loader.
///
/// ## Format
///
/// One character per cell, one line per row, every row the same width.
/// Spaces and tabs are ignored, CRLF is accepted, and blank lines before
/// the first row or after the last are dropped.
///
/// ## Legend
///   '#' = Wall             '.' = Empty            'O' = Pit
///   '@' = Slime            'o' = Small slime      'B' = Box
///   'x' = Switch           'D' = Closed door      '_' = Open door
///   '^' = Spike (up)       '-' = Spike (down)
///   'P' = Pusher (idle)    'p' = Pusher (active)
///
/// Actor cells are Empty terrain underneath. Actors are registered in
/// row-major order, which fixes every registry-order tie-break.

use std::path::Path;

use crate::domain::actor::{Actor, Symbol};
use crate::domain::board::Board;
use crate::domain::geometry::Vector2;
use crate::domain::tile::Cell;
use crate::error::LevelError;

/// Parsed level: terrain plus initial actors in registry order.
#[derive(Clone, Debug)]
pub struct Level {
    pub board: Board,
    pub actors: Vec<Actor>,
}

/// Built-in level used when no level file can be found.
pub const DEMO_LEVEL: &str = "\
#########
#@.B.O..#
#.......#
#ox#.D..#
#########";

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

pub fn parse(text: &str) -> Result<Level, LevelError> {
    let cleaned = clean(text);
    let lines: Vec<&str> = cleaned.lines().collect();
    let first = lines.iter().position(|l| !l.is_empty()).ok_or(LevelError::Empty)?;
    let last = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(first);
    let rows = &lines[first..=last];

    let width = rows[0].chars().count();
    let mut cells = Vec::with_capacity(rows.len());
    let mut actors = Vec::new();

    for (y, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LevelError::RowWidth { row: y, expected: width, found });
        }

        let mut row = Vec::with_capacity(width);
        for (x, c) in line.chars().enumerate() {
            if let Some(cell) = Cell::from_symbol(c) {
                row.push(cell);
            } else if let Some(symbol) = Symbol::from_char(c) {
                row.push(Cell::Empty);
                actors.push(Actor::from_symbol(symbol, Vector2::new(x as i32, y as i32)));
            } else {
                return Err(LevelError::UnknownSymbol { symbol: c, x, y });
            }
        }
        cells.push(row);
    }

    Ok(Level { board: Board::from_rows(cells), actors })
}

/// Inverse of `parse`. A cell shared by several actors shows the one with
/// the highest render priority, the earliest in registry order on ties.
pub fn render(board: &Board, actors: &[&Actor]) -> String {
    let mut lines = Vec::with_capacity(board.height());
    for (y, row) in board.rows().enumerate() {
        let line: String = row.iter().enumerate().map(|(x, cell)| {
            let pos = Vector2::new(x as i32, y as i32);
            top_symbol(actors, pos).map_or(cell.symbol(), Symbol::as_char)
        }).collect();
        lines.push(line);
    }
    lines.join("\n")
}

pub fn load_level(path: &Path) -> Result<Level, LevelError> {
    parse(&read_level(path)?)
}

/// Raw level text, kept by front ends that restart by re-parsing.
pub fn read_level(path: &Path) -> Result<String, LevelError> {
    std::fs::read_to_string(path)
        .map_err(|source| LevelError::Io { path: path.to_path_buf(), source })
}

// ══════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════

fn clean(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|&c| c != ' ' && c != '\t')
        .collect()
}

/// Symbol shown for `pos`, if any actor stands there.
pub fn top_symbol(actors: &[&Actor], pos: Vector2) -> Option<Symbol> {
    let mut best: Option<Symbol> = None;
    for actor in actors.iter().filter(|a| a.position() == pos) {
        let symbol = actor.symbol();
        match best {
            Some(b) if b.render_priority() >= symbol.render_priority() => {}
            _ => best = Some(symbol),
        }
    }
    best
}
