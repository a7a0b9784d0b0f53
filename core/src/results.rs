use std::{fs, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Classification outcome for a single pet image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub reference_label: String,
    pub predicted_label: String,
    pub labels_match: bool,
    pub is_actually_dog: bool,
    pub is_predicted_dog: bool,
}

impl ClassificationRecord {
    /// The classifier put the image on the wrong side of dog / not-dog.
    pub fn is_misclassified_dog(&self) -> bool {
        self.is_actually_dog ^ self.is_predicted_dog
    }

    /// Both sides agree the image is a dog but the breed labels differ.
    pub fn is_misclassified_breed(&self) -> bool {
        self.is_actually_dog && self.is_predicted_dog && !self.labels_match
    }
}

/// Records keyed by image filename, iterated in insertion order.
pub type ResultsTable = IndexMap<String, ClassificationRecord>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsStats {
    pub n_images: u64,
    pub n_dogs_img: u64,
    pub n_notdogs_img: u64,
    pub pct_correct_dogs: f64,
    pub pct_correct_breed: f64,
    pub pct_correct_notdogs: f64,
    pub pct_match: f64,
}

/// A finished classification run as handed over by the classifier stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassificationRun {
    pub results: ResultsTable,
    pub stats: ResultsStats,
    pub elapsed_seconds: f64,
}

impl ClassificationRun {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read classification run from {}", path.display()))?;
        let run = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse classification run at {}", path.display()))?;
        Ok(run)
    }
}
