use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;

use crate::session::question::{DatasetError, QuestionSet};

#[derive(Embed)]
#[folder = "assets/questions/"]
struct QuestionAssets;

pub const DEFAULT_SET: &str = "general";

/// Where a question set comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionSource {
    /// A set compiled into the binary, by name without extension.
    Bundled(String),
    File(PathBuf),
}

impl QuestionSource {
    /// An explicit file wins over a bundled set name.
    pub fn resolve(path: Option<&Path>, set_name: &str) -> Self {
        match path {
            Some(p) => QuestionSource::File(p.to_path_buf()),
            None => QuestionSource::Bundled(set_name.to_string()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            QuestionSource::Bundled(name) => format!("bundled set '{name}'"),
            QuestionSource::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<QuestionSet, DatasetError> {
        let set = match self {
            QuestionSource::Bundled(name) => load_bundled(name)?,
            QuestionSource::File(path) => load_file(path)?,
        };
        tracing::info!(
            source = %self.describe(),
            questions = set.len(),
            "question set loaded"
        );
        Ok(set)
    }
}

pub fn load_bundled(name: &str) -> Result<QuestionSet, DatasetError> {
    let filename = format!("{name}.json");
    let file =
        QuestionAssets::get(&filename).ok_or_else(|| DatasetError::MissingAsset(name.to_string()))?;
    let json = String::from_utf8_lossy(file.data.as_ref());
    QuestionSet::from_json(&json)
}

pub fn load_file(path: &Path) -> Result<QuestionSet, DatasetError> {
    let json = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    QuestionSet::from_json(&json)
}

pub fn bundled_sets() -> Vec<String> {
    let mut names: Vec<String> = QuestionAssets::iter()
        .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
        .collect();
    names.sort();
    names
}
