/// Player commands and where they come from.
///
/// Two sources map onto the same `Command`:
///   - interactive key presses (arrows, WASD, r, q/Esc, Ctrl+C)
///   - textual commands from a `--moves` script (`w|up`, `r|restart`, ...)
///
/// Only Press events count; Repeat and Release are ignored so holding a
/// key does not queue a burst of turns.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use slimesolver::Direction;

pub const HELP_TEXT: &str = "w|up, s|down, a|left, d|right, q|quit, r|restart";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

/// Parse one textual command, case-insensitive.
pub fn parse_command(word: &str) -> Option<Command> {
    let cmd = match word.trim().to_ascii_lowercase().as_str() {
        "w" | "up"    => Command::Move(Direction::Up),
        "s" | "down"  => Command::Move(Direction::Down),
        "a" | "left"  => Command::Move(Direction::Left),
        "d" | "right" => Command::Move(Direction::Right),
        "r" | "restart" | "reset" => Command::Restart,
        "q" | "quit" | "exit"     => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Split a move script on whitespace and commas. Unknown words are
/// returned as errors so the caller can point at them.
pub fn parse_script(script: &str) -> Result<Vec<Command>, String> {
    script.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| parse_command(w).ok_or_else(|| w.to_string()))
        .collect()
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up    => Some(Command::Move(Direction::Up)),
        KeyCode::Down  => Some(Command::Move(Direction::Down)),
        KeyCode::Left  => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Esc   => Some(Command::Quit),
        KeyCode::Char(c) => parse_command(c.encode_utf8(&mut [0; 4])),
        _ => None,
    }
}

/// Block until the next key press that maps to a command.
/// Resize and other events are reported as `None` so the caller redraws.
pub fn read_command() -> std::io::Result<Option<Command>> {
    match event::read()? {
        Event::Key(key) => Ok(command_for_key(key)),
        _ => Ok(None),
    }
}
