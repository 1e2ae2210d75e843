//! Engine configuration from environment variables.
//!
//! | Variable                     | Default                | Meaning                          |
//! |------------------------------|------------------------|----------------------------------|
//! | `TUI2048_STORE_DIR`          | `$HOME/.tui-2048`      | directory of the file store      |
//! | `TUI2048_WIN_VALUE`          | `2048`                 | win threshold (power of two >= 4)|
//! | `TUI2048_UNDO_DEPTH`         | `1`                    | undo entries kept (>= 1)         |
//! | `TUI2048_REPLAY_INTERVAL_MS` | `250`                  | pause between replayed moves     |
//! | `TUI2048_SEED`               | from the clock         | spawner seed                     |
//! | `TUI2048_PERSIST_DISABLED`   | unset                  | `1`/`true` keeps saves in memory |
//! | `TUI2048_LOG_PATH`           | unset                  | log file for the binary          |
//!
//! Values that are missing or do not parse fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::SessionConfig;
use crate::types::{DEFAULT_UNDO_DEPTH, REPLAY_INTERVAL_MS, WIN_VALUE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub store_dir: PathBuf,
    pub win_value: u32,
    pub undo_depth: usize,
    pub replay_interval_ms: u32,
    pub seed: u32,
    pub persist_disabled: bool,
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(std::env::var("HOME").ok()),
            win_value: WIN_VALUE,
            undo_depth: DEFAULT_UNDO_DEPTH,
            replay_interval_ms: REPLAY_INTERVAL_MS,
            seed: clock_seed(),
            persist_disabled: false,
            log_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let store_dir = non_empty("TUI2048_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_store_dir(var("HOME")));

        let win_value = non_empty("TUI2048_WIN_VALUE")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&v| v >= 4 && v.is_power_of_two())
            .unwrap_or(WIN_VALUE);

        let undo_depth = non_empty("TUI2048_UNDO_DEPTH")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&d| d >= 1)
            .unwrap_or(DEFAULT_UNDO_DEPTH);

        let replay_interval_ms = non_empty("TUI2048_REPLAY_INTERVAL_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(REPLAY_INTERVAL_MS);

        let seed = non_empty("TUI2048_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let persist_disabled = non_empty("TUI2048_PERSIST_DISABLED")
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            store_dir,
            win_value,
            undo_depth,
            replay_interval_ms,
            seed,
            persist_disabled,
            log_path: non_empty("TUI2048_LOG_PATH"),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            win_value: self.win_value,
            undo_depth: self.undo_depth,
        }
    }
}

fn default_store_dir(home: Option<String>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".tui-2048"),
        None => PathBuf::from(".tui-2048"),
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_vars(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[("HOME", "/home/player")]);
        assert_eq!(c.store_dir, PathBuf::from("/home/player/.tui-2048"));
        assert_eq!(c.win_value, 2048);
        assert_eq!(c.undo_depth, 1);
        assert_eq!(c.replay_interval_ms, 250);
        assert!(!c.persist_disabled);
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_no_home() {
        assert_eq!(config(&[]).store_dir, PathBuf::from(".tui-2048"));
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("TUI2048_STORE_DIR", "/tmp/saves"),
            ("TUI2048_WIN_VALUE", "512"),
            ("TUI2048_UNDO_DEPTH", "5"),
            ("TUI2048_REPLAY_INTERVAL_MS", "10"),
            ("TUI2048_SEED", "99"),
            ("TUI2048_PERSIST_DISABLED", "TRUE"),
            ("TUI2048_LOG_PATH", " /tmp/2048.log "),
        ]);
        assert_eq!(c.store_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(c.win_value, 512);
        assert_eq!(c.undo_depth, 5);
        assert_eq!(c.replay_interval_ms, 10);
        assert_eq!(c.seed, 99);
        assert!(c.persist_disabled);
        assert_eq!(c.log_path.as_deref(), Some("/tmp/2048.log"));
        assert_eq!(
            c.session_config(),
            SessionConfig {
                win_value: 512,
                undo_depth: 5
            }
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let c = config(&[
            ("TUI2048_WIN_VALUE", "1000"),
            ("TUI2048_UNDO_DEPTH", "0"),
            ("TUI2048_REPLAY_INTERVAL_MS", "soon"),
            ("TUI2048_PERSIST_DISABLED", "no"),
            ("TUI2048_LOG_PATH", "  "),
        ]);
        assert_eq!(c.win_value, 2048);
        assert_eq!(c.undo_depth, 1);
        assert_eq!(c.replay_interval_ms, 250);
        assert!(!c.persist_disabled);
        assert_eq!(c.log_path, None);

        assert_eq!(config(&[("TUI2048_WIN_VALUE", "2")]).win_value, 2048);
    }

    #[test]
    fn test_from_env() {
        // This test just ensures it doesn't panic
        let _config = EngineConfig::from_env();
    }
}
