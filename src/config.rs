use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::ellipse::{EllipseSettings, DEFAULT_SCALE, DEFAULT_STEPS};
use crate::score::Difficulty;

pub const MIN_POINTS: usize = 20;
pub const MAX_POINTS: usize = 500;
pub const DEFAULT_POINTS: usize = 80;

pub const MIN_DIGITS: u32 = 1;
pub const MAX_DIGITS: u32 = 4;
pub const DEFAULT_DIGITS: u32 = 2;

pub const MIN_ELLIPSE_STEPS: usize = 3;
pub const MAX_ELLIPSE_STEPS: usize = 720;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub n_points: usize,
    pub difficulty: Difficulty,
    /// Decimal places the guess moves by and is shown with.
    pub r_digits: u32,
    pub show_guess_ellipse: bool,
    pub show_true_ellipse: bool,
    pub ellipse_scale: f64,
    pub ellipse_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_POINTS,
            difficulty: Difficulty::Normal,
            r_digits: DEFAULT_DIGITS,
            show_guess_ellipse: true,
            show_true_ellipse: true,
            ellipse_scale: DEFAULT_SCALE,
            ellipse_steps: DEFAULT_STEPS,
        }
    }
}

impl Config {
    /// Pull every field back into its supported range.
    pub fn sanitized(mut self) -> Self {
        self.n_points = self.n_points.clamp(MIN_POINTS, MAX_POINTS);
        self.r_digits = self.r_digits.clamp(MIN_DIGITS, MAX_DIGITS);
        self.ellipse_steps = self
            .ellipse_steps
            .clamp(MIN_ELLIPSE_STEPS, MAX_ELLIPSE_STEPS);
        if !(self.ellipse_scale.is_finite() && self.ellipse_scale > 0.0) {
            self.ellipse_scale = DEFAULT_SCALE;
        }
        self
    }

    pub fn ellipse(&self) -> EllipseSettings {
        EllipseSettings {
            scale: self.ellipse_scale,
            steps: self.ellipse_steps,
        }
    }

    /// 1 -> 2 -> 3 -> 4 -> 1
    pub fn cycle_digits(&mut self) {
        self.r_digits = if self.r_digits >= MAX_DIGITS {
            MIN_DIGITS
        } else {
            self.r_digits + 1
        };
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "corrguess") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("corrguess_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}

/// Keeps the last saved config in memory; nothing touches disk.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    saved: RefCell<Option<Config>>,
}

impl MemoryConfigStore {
    pub fn saved(&self) -> Option<Config> {
        self.saved.borrow().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        self.saved().unwrap_or_default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        *self.saved.borrow_mut() = Some(cfg.clone());
        Ok(())
    }
}
