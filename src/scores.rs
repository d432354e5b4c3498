//! Precomputed per-sample utility scores.
//!
//! Score files are JSON arrays of numbers where array position `i` holds the
//! score of sample `i`. On load the positions become explicit keys; a lookup
//! for an unscored sample is an error rather than a neighbour's score.

use crate::criterion::DropOrder;
use crate::util::{SampleDropError, SampleDropResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the score file for `dataset` and `indicator` under `root`.
pub fn score_file_path(root: &Path, dataset: &str, indicator: &str) -> PathBuf {
    root.join(format!("{dataset}_{indicator}.json"))
}

/// Mapping from global sample index to utility score.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtilityScores {
    values: BTreeMap<usize, f64>,
}

impl UtilityScores {
    /// Keys scores by their position in `values`.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            values: values.into_iter().enumerate().collect(),
        }
    }

    /// Wraps an explicit index to score mapping.
    pub fn from_map(values: BTreeMap<usize, f64>) -> Self {
        Self { values }
    }

    /// Loads a positional JSON array from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> SampleDropResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SampleDropError::ScoreFileMissing {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|err| SampleDropError::ScoreFileRead {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::parse_json(&text).map_err(|err| SampleDropError::ScoreFileParse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Loads `{root}/{dataset}_{indicator}.json`.
    pub fn open(root: &Path, dataset: &str, indicator: &str) -> SampleDropResult<Self> {
        Self::load(score_file_path(root, dataset, indicator))
    }

    fn parse_json(text: &str) -> serde_json::Result<Self> {
        let values: Vec<f64> = serde_json::from_str(text)?;
        Ok(Self::from_values(values))
    }

    /// Number of scored samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no sample is scored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Score for `index`, if present.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(&index).copied()
    }

    /// Score for `index`, failing when the sample is unscored.
    pub fn score(&self, index: usize) -> SampleDropResult<f64> {
        self.get(index)
            .ok_or(SampleDropError::MissingScore { index })
    }

    /// Returns a copy with every score negated.
    pub fn negated(&self) -> Self {
        Self {
            values: self.values.iter().map(|(&idx, &v)| (idx, -v)).collect(),
        }
    }

    /// Orients scores so the samples to drop always sort first.
    ///
    /// `Large` negates, `Small` leaves the scores untouched.
    pub fn oriented(self, order: DropOrder) -> Self {
        match order {
            DropOrder::Small => self,
            DropOrder::Large => self.negated(),
        }
    }
}
