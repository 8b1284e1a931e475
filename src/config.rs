/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub log: LogConfig,
    pub level_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Negotiation rounds before a turn is declared unresolvable.
    pub max_rounds: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_rounds: default_max_rounds() }
    }
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `slimesolver=debug`.
    pub filter: String,
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    engine: TomlEngine,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlEngine {
    #[serde(default = "default_max_rounds")]
    max_rounds: usize,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_filter")]
    filter: String,
    #[serde(default)]
    file: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_level")]
    level: String,
}

// ── Defaults ──

fn default_max_rounds() -> usize { 16 }
fn default_log_filter() -> String { "slimesolver=info".into() }
fn default_level() -> String { "level.txt".into() }

impl Default for TomlEngine {
    fn default() -> Self {
        TomlEngine { max_rounds: default_max_rounds() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { filter: default_log_filter(), file: None }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { level: default_level() }
    }
}

// ── Loading ──

impl AppConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::resolve(toml_cfg, &search_dirs)
    }

    /// Parse a config document directly; relative paths stay relative.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(Self::resolve(toml_cfg, &[]))
    }

    fn resolve(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // A relative level path is looked up next to the config first
        let level_str = &toml_cfg.general.level;
        let level_path = if PathBuf::from(level_str).is_absolute() {
            PathBuf::from(level_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(level_str))
                .find(|p| p.is_file())
                .unwrap_or_else(|| PathBuf::from(level_str))
        };

        AppConfig {
            engine: EngineConfig {
                max_rounds: toml_cfg.engine.max_rounds.max(1),
            },
            log: LogConfig {
                filter: toml_cfg.log.filter,
                file: toml_cfg.log.file.map(PathBuf::from),
            },
            level_path,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(TomlConfig::default(), &[])
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = AppConfig::from_toml_str("").expect("valid");
        assert_eq!(cfg.engine.max_rounds, 16);
        assert_eq!(cfg.log.filter, "slimesolver=info");
        assert!(cfg.log.file.is_none());
        assert_eq!(cfg.level_path, PathBuf::from("level.txt"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml_str(
            "[engine]\nmax_rounds = 4\n\n[log]\nfile = \"turns.log\"\n",
        ).expect("valid");
        assert_eq!(cfg.engine.max_rounds, 4);
        assert_eq!(cfg.log.filter, "slimesolver=info");
        assert_eq!(cfg.log.file, Some(PathBuf::from("turns.log")));
    }

    #[test]
    fn zero_rounds_is_clamped() {
        let cfg = AppConfig::from_toml_str("[engine]\nmax_rounds = 0\n").expect("valid");
        assert_eq!(cfg.engine.max_rounds, 1);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(AppConfig::from_toml_str("[engine]\nmax_rounds = \"many\"\n").is_err());
    }
}
