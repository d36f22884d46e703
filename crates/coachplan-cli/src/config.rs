//! Configuration file management for coachplan.
//!
//! Provides a TOML-based config file at `~/.config/coachplan/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coachplan_core::plan::PlanDraft;

/// Env var that overrides the data directory.
pub const DATA_DIR_ENV: &str = "COACHPLAN_DATA_DIR";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub plan: PlanSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataSection {
    /// Directory holding catalog, customers and submitted plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Defaults applied by `plan new`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSection {
    #[serde(default = "default_set_rest")]
    pub set_rest_seconds: u32,
    #[serde(default = "default_exercise_rest")]
    pub exercise_rest_seconds: u32,
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            set_rest_seconds: default_set_rest(),
            exercise_rest_seconds: default_exercise_rest(),
        }
    }
}

fn default_set_rest() -> u32 {
    PlanDraft::DEFAULT_SET_REST_SECONDS
}

fn default_exercise_rest() -> u32 {
    PlanDraft::DEFAULT_EXERCISE_REST_SECONDS
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the coachplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/coachplan` or
/// `~/.config/coachplan`, also on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("coachplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("coachplan")
}

/// Return the path to the coachplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Platform data directory, e.g. `~/.local/share/coachplan`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("coachplan"))
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct CoachConfig {
    pub data_dir: PathBuf,
    pub set_rest_seconds: u32,
    pub exercise_rest_seconds: u32,
}

impl CoachConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Data dir: `cli_data_dir` > `COACHPLAN_DATA_DIR` env > `data.dir` > [`default_data_dir`]
    /// - Rest defaults: `plan.*` in the config file > built-in defaults
    pub fn resolve(cli_data_dir: Option<&Path>) -> Result<Self> {
        let file_config = match load_config() {
            Ok(cfg) => Some(cfg),
            Err(e) if config_path().exists() => return Err(e),
            Err(_) => None,
        };

        let data_dir = if let Some(dir) = cli_data_dir {
            dir.to_path_buf()
        } else if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(dir)
        } else if let Some(dir) = file_config.as_ref().and_then(|c| c.data.dir.clone()) {
            dir
        } else {
            default_data_dir().context(
                "no data directory: pass --data-dir, set COACHPLAN_DATA_DIR, or run `coachplan init`",
            )?
        };

        let plan = file_config.map(|c| c.plan).unwrap_or_default();
        tracing::debug!(data_dir = %data_dir.display(), "configuration resolved");

        Ok(Self {
            data_dir,
            set_rest_seconds: plan.set_rest_seconds,
            exercise_rest_seconds: plan.exercise_rest_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point XDG_CONFIG_HOME at a temp dir for the duration of `f`.
    fn with_config_home<T>(f: impl FnOnce(&Path) -> T) -> T {
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let out = f(tmp.path());

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        out
    }

    #[test]
    fn config_round_trip() {
        let original = ConfigFile {
            data: DataSection {
                dir: Some(PathBuf::from("/srv/coach")),
            },
            plan: PlanSection {
                set_rest_seconds: 45,
                exercise_rest_seconds: 90,
            },
        };
        let contents = toml::to_string_pretty(&original).unwrap();
        let loaded: ConfigFile = toml::from_str(&contents).unwrap();

        assert_eq!(loaded.data.dir, original.data.dir);
        assert_eq!(loaded.plan.set_rest_seconds, 45);
        assert_eq!(loaded.plan.exercise_rest_seconds, 90);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let loaded: ConfigFile = toml::from_str("[data]\ndir = \"/tmp/x\"\n").unwrap();
        assert_eq!(loaded.plan.set_rest_seconds, 60);
        assert_eq!(loaded.plan.exercise_rest_seconds, 120);

        let empty: ConfigFile = toml::from_str("").unwrap();
        assert!(empty.data.dir.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn save_config_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();
        with_config_home(|_| {
            save_config(&ConfigFile::default()).unwrap();
            let meta = std::fs::metadata(config_path()).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        });
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        unsafe { std::env::set_var(DATA_DIR_ENV, "/from/env") };

        let config = with_config_home(|_| CoachConfig::resolve(Some(Path::new("/from/cli"))));

        unsafe { std::env::remove_var(DATA_DIR_ENV) };
        assert_eq!(config.unwrap().data_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        unsafe { std::env::set_var(DATA_DIR_ENV, "/from/env") };

        let config = with_config_home(|_| {
            let cfg = ConfigFile {
                data: DataSection {
                    dir: Some(PathBuf::from("/from/file")),
                },
                plan: PlanSection::default(),
            };
            save_config(&cfg).unwrap();
            CoachConfig::resolve(None)
        });

        unsafe { std::env::remove_var(DATA_DIR_ENV) };
        assert_eq!(config.unwrap().data_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn resolve_reads_config_file() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(DATA_DIR_ENV) };

        let config = with_config_home(|_| {
            let cfg = ConfigFile {
                data: DataSection {
                    dir: Some(PathBuf::from("/from/file")),
                },
                plan: PlanSection {
                    set_rest_seconds: 30,
                    exercise_rest_seconds: 150,
                },
            };
            save_config(&cfg).unwrap();
            CoachConfig::resolve(None)
        })
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.set_rest_seconds, 30);
        assert_eq!(config.exercise_rest_seconds, 150);
    }

    #[test]
    fn resolve_rejects_malformed_config_file() {
        let _lock = lock_env();

        let result = with_config_home(|home| {
            let dir = home.join("coachplan");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("config.toml"), "[data\n").unwrap();
            CoachConfig::resolve(Some(Path::new("/from/cli")))
        });

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("failed to parse config file"), "unexpected error: {msg}");
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("coachplan/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
