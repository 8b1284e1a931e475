/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use slimesolver::domain::actor::Symbol;
use slimesolver::domain::tile::Cell as Terrain;
use slimesolver::sim::level::top_symbol;
use slimesolver::{Engine, Vector2};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Renderer ──

/// Each board cell is drawn two terminal columns wide.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

/// Everything one frame shows besides the board itself.
pub struct Hud<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub help: &'a str,
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, engine: &Engine, hud: &Hud<'_>) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose(engine, hud);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, engine: &Engine, hud: &Hud<'_>) {
        let (board, actors) = engine.board_state();

        // ── HUD row ──
        let status = format!(" {}  Turn:{:<4} Actors:{} ", hud.title, engine.turns(), actors.len());
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &status, Color::White, HUD_BG);

        // ── Board ──
        for y in 0..board.height() {
            let row = MAP_ROW + y;
            if row >= self.front.height { break; }
            for x in 0..board.width() {
                let col = x * CELL_W;
                if col + 1 >= self.front.width { break; }

                let pos = Vector2::new(x as i32, y as i32);
                let terrain = board.cell(pos).unwrap_or(Terrain::Wall);
                let (ch, fg, bg) = match top_symbol(&actors, pos) {
                    Some(symbol) => {
                        let (fg, bg) = symbol_colors(symbol, terrain);
                        (symbol.as_char(), fg, bg)
                    }
                    None => {
                        let (fg, bg) = terrain_colors(terrain);
                        (terrain.symbol(), fg, bg)
                    }
                };
                self.front.set(col, row, Cell::new(ch, fg, bg));
                self.front.set(col + 1, row, Cell::new(' ', fg, bg));
            }
        }

        // ── Message bar ──
        let msg_row = MAP_ROW + board.height() + 1;
        if msg_row < self.front.height && !hud.message.is_empty() {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(0, msg_row, &format!(" {} ", hud.message), Color::Black, MSG_BG);
        }

        // ── Help bar ──
        let help_row = MAP_ROW + board.height() + 3;
        if help_row < self.front.height {
            self.front.put_str(0, help_row, &format!(" {}", hud.help), Color::DarkGrey, Color::Reset);
        }
    }
}

fn terrain_colors(terrain: Terrain) -> (Color, Color) {
    match terrain {
        Terrain::Wall  => (Color::Grey, Color::Rgb { r: 70, g: 70, b: 90 }),
        Terrain::Pit   => (Color::DarkGrey, Color::Black),
        Terrain::Empty => (Color::Rgb { r: 60, g: 60, b: 80 }, Color::Reset),
    }
}

fn symbol_colors(symbol: Symbol, under: Terrain) -> (Color, Color) {
    let (_, bg) = terrain_colors(under);
    let fg = match symbol {
        Symbol::Slime | Symbol::SmallSlime => Color::Green,
        Symbol::Box => Color::Rgb { r: 190, g: 130, b: 60 },
        Symbol::Switch => Color::Cyan,
        Symbol::ClosedDoor => Color::Red,
        Symbol::OpenDoor => Color::DarkRed,
        Symbol::SpikeUp => Color::Magenta,
        Symbol::SpikeDown => Color::DarkMagenta,
        Symbol::Pusher | Symbol::PusherActive => Color::Yellow,
    };
    (fg, bg)
}
