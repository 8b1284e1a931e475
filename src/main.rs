/// Entry point and game loop.

mod ui;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slimesolver::config::{AppConfig, EngineConfig, LogConfig};
use slimesolver::sim::level::{read_level, DEMO_LEVEL};
use slimesolver::{parse, Engine, LevelError, TurnReport};
use ui::input::{self, Command, HELP_TEXT};
use ui::renderer::{Hud, Renderer};

/// Slime Solver: push boxes, press switches, merge slimes
#[derive(Parser, Debug)]
#[command(name = "slimesolver")]
#[command(about = "Turn-based slime puzzle for the terminal")]
struct Args {
    /// Level file (default: `[general] level` from config.toml)
    level: Option<PathBuf>,

    /// Play these moves without a terminal UI and print the final board,
    /// e.g. "d,d,s" or "right right down"
    #[arg(long)]
    moves: Option<String>,

    /// Negotiation rounds before a turn is rejected as unresolvable
    #[arg(long)]
    max_rounds: Option<usize>,
}

fn main() {
    let args = Args::parse();
    let mut config = AppConfig::load();
    if let Some(rounds) = args.max_rounds {
        config.engine.max_rounds = rounds.max(1);
    }

    let interactive = args.moves.is_none();
    if let Err(e) = init_logging(&config.log, interactive) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let (text, title) = match &args.level {
        Some(path) => match read_level(path) {
            Ok(text) => (text, level_title(path)),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => match read_level(&config.level_path) {
            Ok(text) => (text, level_title(&config.level_path)),
            Err(e) => {
                eprintln!("Warning: {e}");
                eprintln!("Using the built-in demo level.");
                (DEMO_LEVEL.to_string(), "demo".to_string())
            }
        },
    };

    let mut session = match Session::start(text, title, config.engine.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Level error: {e}");
            std::process::exit(1);
        }
    };

    let result = match &args.moves {
        Some(script) => run_script(&mut session, script),
        None => run_interactive(&mut session),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the configured filter. Without a log file the
/// interactive UI runs silent so log lines never land on the board.
fn init_logging(log: &LogConfig, interactive: bool) -> Result<(), Box<dyn Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&log.filter)?,
    };
    match &log.file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn level_title(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "level".to_string())
}

// ══════════════════════════════════════════════════════════════
// Session: one puzzle attempt plus what the player sees
// ══════════════════════════════════════════════════════════════

struct Session {
    text: String,
    title: String,
    config: EngineConfig,
    engine: Engine,
    message: String,
}

#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl Session {
    fn start(text: String, title: String, config: EngineConfig) -> Result<Self, LevelError> {
        let engine = build_engine(&text, &config)?;
        Ok(Session { text, title, config, engine, message: String::new() })
    }

    fn handle(&mut self, cmd: Command) -> Result<Flow, LevelError> {
        match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Restart => {
                self.engine = build_engine(&self.text, &self.config)?;
                self.message = "Restarted".to_string();
            }
            Command::Move(dir) => {
                self.message = match self.engine.step(dir) {
                    Ok(report) => summarize(&report),
                    Err(e) => format!("Move rejected: {e}"),
                };
            }
        }
        Ok(Flow::Continue)
    }
}

fn build_engine(text: &str, config: &EngineConfig) -> Result<Engine, LevelError> {
    let level = parse(text)?;
    Ok(Engine::new(level.board, level.actors).with_config(config.clone()))
}

fn summarize(report: &TurnReport) -> String {
    let parts: Vec<String> = report.events.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

// ══════════════════════════════════════════════════════════════
// Front ends
// ══════════════════════════════════════════════════════════════

fn run_script(session: &mut Session, script: &str) -> Result<(), Box<dyn Error>> {
    let commands = input::parse_script(script)
        .map_err(|word| format!("unknown move {word:?} (expected {HELP_TEXT})"))?;

    for cmd in commands {
        if session.handle(cmd)? == Flow::Quit {
            break;
        }
        if !session.message.is_empty() {
            eprintln!("{}", session.message);
        }
    }
    println!("{}", session.engine.render());
    Ok(())
}

fn run_interactive(session: &mut Session) -> Result<(), Box<dyn Error>> {
    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        return Err(format!("Terminal init failed: {e}").into());
    }

    let result = game_loop(session, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result
}

fn game_loop(session: &mut Session, renderer: &mut Renderer) -> Result<(), Box<dyn Error>> {
    loop {
        let hud = Hud { title: &session.title, message: &session.message, help: HELP_TEXT };
        renderer.render(&session.engine, &hud)?;

        let Some(cmd) = input::read_command()? else { continue };
        if session.handle(cmd)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
