use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::store::question_store::{DEFAULT_SET, QuestionSource};
use crate::ui::theme::DEFAULT_THEME;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_question_set")]
    pub question_set: String,
    /// Overrides `question_set` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub reveal_correct_answer: bool,
    #[serde(default = "default_true")]
    pub confirm_restart: bool,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_question_set() -> String {
    DEFAULT_SET.to_string()
}
fn default_true() -> bool {
    true
}
fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            question_set: default_question_set(),
            questions_path: None,
            reveal_correct_answer: default_true(),
            confirm_restart: default_true(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trivia")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file may have broken and fall back to
    /// defaults for names that no longer exist.
    pub fn validate(&mut self, themes: &[String], question_sets: &[String]) {
        self.tick_rate_ms = self.tick_rate_ms.clamp(50, 1000);
        if !themes.contains(&self.theme) {
            tracing::warn!(theme = %self.theme, "unknown theme in config, using default");
            self.theme = default_theme();
        }
        if !question_sets.contains(&self.question_set) {
            tracing::warn!(
                set = %self.question_set,
                "unknown question set in config, using default"
            );
            self.question_set = default_question_set();
        }
    }

    /// The settings in effect for this run. `self` stays as saved on disk.
    pub fn with_overrides(&self, overrides: &Overrides) -> Config {
        let mut effective = self.clone();
        if let Some(ref theme) = overrides.theme {
            effective.theme = theme.clone();
        }
        if let Some(ref set) = overrides.question_set {
            effective.question_set = set.clone();
            effective.questions_path = None;
        }
        if let Some(ref path) = overrides.questions_path {
            effective.questions_path = Some(path.clone());
        }
        effective
    }

    pub fn question_source(&self) -> QuestionSource {
        QuestionSource::resolve(self.questions_path.as_deref(), &self.question_set)
    }
}

/// Command-line choices that apply to one run and are never saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub theme: Option<String>,
    pub question_set: Option<String>,
    pub questions_path: Option<PathBuf>,
}

impl Overrides {
    /// An unknown set is an error; an unknown theme is dropped with a warning
    /// so the configured one applies.
    pub fn check(&mut self, themes: &[String], question_sets: &[String]) -> Result<()> {
        if let Some(ref set) = self.question_set {
            if !question_sets.contains(set) {
                bail!(
                    "unknown question set '{set}' (available: {})",
                    question_sets.join(", ")
                );
            }
        }
        if let Some(ref theme) = self.theme {
            if !themes.contains(theme) {
                tracing::warn!(theme = %theme, "unknown theme on command line, ignoring");
                self.theme = None;
            }
        }
        Ok(())
    }
}
