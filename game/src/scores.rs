use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

/// How many best times survive a save.
pub const MAX_SCORES: usize = 5;
pub const DEFAULT_SCORES_FILE: &str = "high_scores.txt";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to read scores from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write scores to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {} is corrupt at line {line}: {content:?} is not a time in seconds", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

/// Best completion times (seconds, lower is better), kept ascending and capped at
/// `MAX_SCORES`, mirrored to a plain-text file with one value per line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreStore {
    path: PathBuf,
    scores: Vec<f64>,
}

impl ScoreStore {
    /// A store with no scores that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scores: Vec::new(),
        }
    }

    /// Reads `path`. A missing file means no scores yet; anything unparsable is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScoreError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no score file at {}, starting fresh", path.display());
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(ScoreError::Read { path, source }),
        };

        let mut scores = parse_scores(&path, &text)?;
        scores.sort_by(f64::total_cmp);
        scores.truncate(MAX_SCORES);
        info!("loaded {} score(s) from {}", scores.len(), path.display());
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn best(&self) -> Option<f64> {
        self.scores.first().copied()
    }

    /// Merges `score` in, keeps the best `MAX_SCORES`, and rewrites the file.
    ///
    /// Returns the new score's 0-based rank when it made the cut. The in-memory list is
    /// updated even when the write fails.
    pub fn record(&mut self, score: f64) -> Result<Option<usize>, ScoreError> {
        if !score.is_finite() {
            warn!("ignoring non-finite score {score}");
            return Ok(None);
        }

        // Ties go after existing entries, same as appending then stable-sorting.
        let pos = self.scores.partition_point(|s| *s <= score);
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_SCORES);
        self.save()?;

        Ok((pos < MAX_SCORES).then_some(pos))
    }

    fn save(&self) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ScoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, format_scores(&self.scores)).map_err(|source| ScoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_scores(path: &Path, text: &str) -> Result<Vec<f64>, ScoreError> {
    let mut scores = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => scores.push(value),
            _ => {
                return Err(ScoreError::Corrupt {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    content: trimmed.to_string(),
                });
            }
        }
    }
    Ok(scores)
}

/// Shortest round-trip form, always with a fractional part (`2.0`, not `2`).
fn format_scores(scores: &[f64]) -> String {
    scores.iter().map(|s| format!("{s:?}\n")).collect()
}
