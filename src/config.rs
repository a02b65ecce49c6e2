//! Game configuration: defaults, then environment, then command-line flags.

use std::env;

use anyhow::{anyhow, Result};

use crate::core::ControllerOptions;
use crate::types::{COLOR_COUNT, DEFAULT_MOVE_MS};

/// Smallest palette accepted from the outside.
pub const MIN_COLORS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    /// Palette size, `MIN_COLORS..=COLOR_COUNT`.
    pub colors: usize,
    /// Animation duration handed to the engine for every move.
    pub move_ms: u32,
    /// Level file; `None` uses the built-in level.
    pub level_path: Option<String>,
    /// JSON-lines event log; `None` disables it.
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            colors: COLOR_COUNT,
            move_ms: DEFAULT_MOVE_MS,
            level_path: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `GEMS_*` environment variables.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = parse_var(&lookup, "GEMS_SEED").unwrap_or(defaults.seed);
        let colors = parse_var(&lookup, "GEMS_COLORS")
            .filter(|n| valid_colors(*n))
            .unwrap_or(defaults.colors);
        let move_ms = parse_var(&lookup, "GEMS_MOVE_MS").unwrap_or(defaults.move_ms);

        Self {
            seed,
            colors,
            move_ms,
            level_path: path_var(&lookup, "GEMS_LEVEL"),
            log_path: path_var(&lookup, "GEMS_LOG_PATH"),
        }
    }

    /// Apply command-line flags on top of the current values.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" => {
                    self.seed = parse_flag(args.get(i + 1), flag)?;
                    i += 1;
                }
                "--colors" => {
                    let colors: usize = parse_flag(args.get(i + 1), flag)?;
                    if !valid_colors(colors) {
                        return Err(anyhow!(
                            "config: --colors must be between {} and {}, got {}",
                            MIN_COLORS,
                            COLOR_COUNT,
                            colors
                        ));
                    }
                    self.colors = colors;
                    i += 1;
                }
                "--move-ms" => {
                    self.move_ms = parse_flag(args.get(i + 1), flag)?;
                    i += 1;
                }
                "--level" => {
                    self.level_path = Some(flag_value(args.get(i + 1), flag)?.to_string());
                    i += 1;
                }
                "--log" => {
                    self.log_path = Some(flag_value(args.get(i + 1), flag)?.to_string());
                    i += 1;
                }
                other => return Err(anyhow!("config: unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }

    /// Environment first, then `args` (without the program name).
    pub fn load(args: &[String]) -> Result<Self> {
        let mut config = Self::from_env();
        config.apply_args(args)?;
        Ok(config)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            seed: self.seed,
            colors: self.colors,
            move_ms: self.move_ms,
        }
    }
}

fn valid_colors(n: usize) -> bool {
    (MIN_COLORS..=COLOR_COUNT).contains(&n)
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("[Config] Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

fn path_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn flag_value<'a>(value: Option<&'a String>, flag: &str) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| anyhow!("config: missing value for {}", flag))
}

fn parse_flag<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T> {
    let v = flag_value(value, flag)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("config: invalid {} value: {}", flag, v))
}
