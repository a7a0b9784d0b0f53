use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::summary::ReportOptions;

/// Load a JSON configuration from disk, creating it with the provided initializer if missing.
pub fn load_or_init<T, F>(path: &Path, initializer: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;
        Ok(value)
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let value = initializer();
        let serialized = serde_json::to_string_pretty(&value)?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        info!("wrote default config to {}", path.display());
        Ok(value)
    }
}

/// What to report on and where the precomputed classification run lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// CNN architecture the run was classified with (resnet, alexnet, vgg).
    pub model: String,
    /// Image folder the run processed; names the results file.
    pub folder: String,
    /// Classification run JSON, relative paths resolve against the config directory.
    pub results: PathBuf,
    #[serde(default)]
    pub print_incorrect_dogs: bool,
    #[serde(default)]
    pub print_incorrect_breed: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: "resnet".into(),
            folder: "pet_images/".into(),
            results: PathBuf::from("results.json"),
            print_incorrect_dogs: false,
            print_incorrect_breed: false,
        }
    }
}

impl RunConfig {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            print_incorrect_dogs: self.print_incorrect_dogs,
            print_incorrect_breed: self.print_incorrect_breed,
        }
    }

    pub fn results_path(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if self.results.is_relative() => dir.join(&self.results),
            _ => self.results.clone(),
        }
    }
}
