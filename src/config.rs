use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::quiz::grade::DEFAULT_PASS_THRESHOLD;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_shuffle_questions")]
    pub shuffle_questions: bool,
    #[serde(default = "default_shuffle_answers")]
    pub shuffle_answers: bool,
}

fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_shuffle_questions() -> bool {
    true
}
fn default_shuffle_answers() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            theme: default_theme(),
            shuffle_questions: default_shuffle_questions(),
            shuffle_answers: default_shuffle_answers(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdr")
            .join("config.toml")
    }

    /// Clamp a stale or hand-edited threshold into the 0-100 range.
    pub fn normalize_pass_threshold(&mut self) {
        if self.pass_threshold > 100 {
            self.pass_threshold = 100;
        }
    }
}
