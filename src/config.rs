use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::quiz::session::{DEFAULT_HINT_BUDGET, DEFAULT_MAX_QUESTIONS};
use crate::quiz::{Category, Difficulty};

/// User preferences persisted between runs. Session state itself is never
/// written anywhere; only the knobs and the last filter selection are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub max_questions: usize,
    pub hint_budget: usize,
    pub categories: BTreeSet<Category>,
    pub difficulties: BTreeSet<Difficulty>,
    pub balanced: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            hint_budget: DEFAULT_HINT_BUDGET,
            categories: [Category::Php, Category::MySql].into_iter().collect(),
            difficulties: Difficulty::ALL.into_iter().collect(),
            balanced: true,
        }
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
        let path = if let Some(pd) = ProjectDirs::from("", "", "kwiz") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("kwiz_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
