//! Profile store location.
//!
//! Implements deterministic resolution of the directory holding profile
//! documents:
//! 1. Explicit CLI flag (--profile-dir)
//! 2. PSCOMPAT_PROFILE_DIR
//! 3. XDG_DATA_HOME/pscompat/profiles
//! 4. Platform data dir (~/.local/share/pscompat/profiles)

use crate::document::{self, LoadedProfile};
use pscompat_common::{Error, Result};
use serde::Serialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const PROFILE_DIR_ENV: &str = "PSCOMPAT_PROFILE_DIR";
const STORE_SUBDIR: &str = "pscompat/profiles";
const PROFILE_EXTENSION: &str = "json";

/// Paths supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct StorePaths {
    pub profile_dir: Option<PathBuf>,
}

/// Environment values that influence resolution, captured once.
#[derive(Debug, Clone, Default)]
pub struct StoreEnv {
    pub profile_dir: Option<String>,
    pub xdg_data_home: Option<String>,
}

impl StoreEnv {
    pub fn from_process() -> Self {
        StoreEnv {
            profile_dir: non_empty_var(PROFILE_DIR_ENV),
            xdg_data_home: non_empty_var("XDG_DATA_HOME"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// How the store directory was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreResolution {
    /// From explicit CLI flag
    CliFlag,
    /// From PSCOMPAT_PROFILE_DIR
    EnvVar,
    /// From XDG_DATA_HOME
    XdgData,
    /// Platform default data directory
    Default,
}

impl fmt::Display for StoreResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreResolution::CliFlag => write!(f, "cli"),
            StoreResolution::EnvVar => write!(f, "env"),
            StoreResolution::XdgData => write!(f, "xdg"),
            StoreResolution::Default => write!(f, "default"),
        }
    }
}

/// A profile document found in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    /// File stem, used as the profile id on the command line.
    pub id: String,
    pub path: PathBuf,
}

/// Store resolver with deterministic resolution order.
#[derive(Debug)]
pub struct StoreResolver {
    cli_paths: StorePaths,
    env: StoreEnv,
}

impl StoreResolver {
    pub fn new(paths: StorePaths) -> Self {
        StoreResolver {
            cli_paths: paths,
            env: StoreEnv::from_process(),
        }
    }

    /// Resolver reading a fixed environment instead of the process one.
    pub fn with_env(paths: StorePaths, env: StoreEnv) -> Self {
        StoreResolver { cli_paths: paths, env }
    }

    pub fn with_defaults() -> Self {
        StoreResolver::new(StorePaths::default())
    }

    /// Resolve the store directory; `None` only when no data dir exists.
    pub fn resolve_profile_dir(&self) -> (Option<PathBuf>, StoreResolution) {
        // 1. CLI flag
        if let Some(ref dir) = self.cli_paths.profile_dir {
            return (Some(dir.clone()), StoreResolution::CliFlag);
        }

        // 2. PSCOMPAT_PROFILE_DIR
        if let Some(ref dir) = self.env.profile_dir {
            return (Some(PathBuf::from(dir)), StoreResolution::EnvVar);
        }

        // 3. XDG_DATA_HOME/pscompat/profiles
        if let Some(ref xdg) = self.env.xdg_data_home {
            return (Some(PathBuf::from(xdg).join(STORE_SUBDIR)), StoreResolution::XdgData);
        }

        // 4. Platform default
        (dirs::data_dir().map(|d| d.join(STORE_SUBDIR)), StoreResolution::Default)
    }

    fn require_dir(&self) -> Result<PathBuf> {
        match self.resolve_profile_dir() {
            (Some(dir), resolution) => {
                debug!(dir = %dir.display(), resolution = %resolution, "resolved profile store");
                Ok(dir)
            }
            (None, _) => Err(Error::Config(format!(
                "no profile directory: pass --profile-dir or set {}",
                PROFILE_DIR_ENV
            ))),
        }
    }

    /// Path of the document for `id` (`<dir>/<id>.json`).
    pub fn profile_path(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(Error::Config(format!("invalid profile id {:?}", id)));
        }
        Ok(self.require_dir()?.join(format!("{}.{}", id, PROFILE_EXTENSION)))
    }

    /// Every `*.json` document in the store, sorted by id.
    ///
    /// A store directory that does not exist yet is empty.
    pub fn list_profiles(&self) -> Result<Vec<ProfileEntry>> {
        let dir = self.require_dir()?;
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&dir, e)),
        };

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push(ProfileEntry {
                    id: id.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    /// Load the stored profile `id`.
    pub fn load(&self, id: &str) -> Result<LoadedProfile> {
        let path = self.profile_path(id)?;
        if !path.is_file() {
            return Err(Error::ProfileNotFound { id: id.to_string() });
        }
        document::load_profile(path)
    }
}
