//! In-memory result set: shooters, their panes and the recorded shots.
//!
//! Results arrive already parsed (the competition file reader lives outside
//! this crate). [`ResultSet::new`] normalizes timestamps once and validates the
//! invariants the scoring and layout code rely on.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

// ── Error type ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ResultSetError {
    /// The input file could not be read.
    Io(String),
    /// The input is not a valid result list.
    Parse(String),
    /// A shot declares a zero resolution.
    InvalidResolution {
        shooter: String,
        shot_index: usize,
        resolution: u32,
    },
    /// Two panes of one shooter start with the same timestamp.
    DuplicatePane { shooter: String, timestamp: String },
}

impl std::fmt::Display for ResultSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "failed to read results: {}", msg),
            Self::Parse(msg) => write!(f, "failed to parse results: {}", msg),
            Self::InvalidResolution {
                shooter,
                shot_index,
                resolution,
            } => write!(
                f,
                "shot {} of '{}' has resolution {} (must be > 0)",
                shot_index, shooter, resolution
            ),
            Self::DuplicatePane { shooter, timestamp } => {
                write!(f, "'{}' has more than one pane at {}", shooter, timestamp)
            }
        }
    }
}

impl std::error::Error for ResultSetError {}

// ── Types ────────────────────────────────────────────────────────────────

/// One recorded shot. `x`/`y` are signed offsets from the center in
/// `1 / resolution` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub timestamp: String,
    pub resolution: u32,
    pub x: i64,
    pub y: i64,
}

impl Shot {
    /// Offset from the center after dividing by the resolution.
    pub fn scaled_xy(&self) -> [f64; 2] {
        let res = self.resolution as f64;
        [self.x as f64 / res, self.y as f64 / res]
    }
}

/// All shots one shooter fired on one target pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    pub shooter_name: String,
    #[serde(default)]
    pub target_id: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub match_class: String,
    #[serde(default)]
    pub club: String,
    /// Shots in acquisition order.
    pub shots: Vec<Shot>,
}

impl TargetResult {
    /// Timestamp of the first shot, which identifies the pane.
    pub fn pane_timestamp(&self) -> Option<&str> {
        self.shots.first().map(|s| s.timestamp.as_str())
    }

    pub fn key(&self) -> Option<PaneKey> {
        self.pane_timestamp()
            .map(|ts| PaneKey::new(self.shooter_name.clone(), ts))
    }
}

/// Identifies a pane: shooter plus first-shot timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneKey {
    pub shooter_name: String,
    pub timestamp: String,
}

impl PaneKey {
    pub fn new(shooter_name: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            shooter_name: shooter_name.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Validated, immutable collection of loaded panes.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<TargetResult>,
}

impl ResultSet {
    /// Normalize and validate parsed results.
    ///
    /// Panes without shots have no identifying timestamp and are dropped.
    pub fn new(results: Vec<TargetResult>) -> Result<Self, ResultSetError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(results.len());
        for mut result in results {
            for shot in &mut result.shots {
                shot.timestamp = normalize_timestamp(&shot.timestamp);
            }
            validate_result(&result)?;
            let Some(key) = result.key() else {
                tracing::warn!(
                    "skipping pane {} of '{}': no shots",
                    result.target_id,
                    result.shooter_name
                );
                continue;
            };
            if !seen.insert(key.clone()) {
                return Err(ResultSetError::DuplicatePane {
                    shooter: key.shooter_name,
                    timestamp: key.timestamp,
                });
            }
            kept.push(result);
        }
        let results = kept;

        let n_shots: usize = results.iter().map(|r| r.shots.len()).sum();
        tracing::info!("loaded {} panes with {} shots", results.len(), n_shots);
        Ok(Self { results })
    }

    /// Parse a JSON array of results.
    pub fn from_json_str(data: &str) -> Result<Self, ResultSetError> {
        let results: Vec<TargetResult> =
            serde_json::from_str(data).map_err(|e| ResultSetError::Parse(e.to_string()))?;
        Self::new(results)
    }

    /// Load a JSON array of results from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, ResultSetError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ResultSetError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&data)
    }

    pub fn results(&self) -> &[TargetResult] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Distinct shooter names, sorted.
    pub fn shooter_names(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| r.shooter_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First-shot timestamps of every pane fired by `shooter`, sorted.
    pub fn pane_timestamps(&self, shooter: &str) -> Vec<String> {
        let mut panes: Vec<String> = self
            .results
            .iter()
            .filter(|r| r.shooter_name == shooter)
            .filter_map(|r| r.pane_timestamp().map(str::to_owned))
            .collect();
        panes.sort();
        panes
    }

    /// Look up the pane for a selection. When several panes match, the last
    /// one in load order wins.
    pub fn find(&self, key: &PaneKey) -> Option<&TargetResult> {
        self.results.iter().rev().find(|r| {
            r.shooter_name == key.shooter_name && r.pane_timestamp() == Some(key.timestamp.as_str())
        })
    }

    /// Selection made right after loading: first shooter, first pane.
    pub fn default_selection(&self) -> Option<PaneKey> {
        let shooter = self.shooter_names().into_iter().next()?;
        let timestamp = self.pane_timestamps(&shooter).into_iter().next()?;
        Some(PaneKey::new(shooter, timestamp))
    }
}

/// `2024-03-01T10:15:00Z` → `2024-03-01 10:15:00`.
pub fn normalize_timestamp(raw: &str) -> String {
    raw.replace('T', " ").replace('Z', "")
}

fn validate_result(result: &TargetResult) -> Result<(), ResultSetError> {
    for (i, shot) in result.shots.iter().enumerate() {
        if shot.resolution == 0 {
            return Err(ResultSetError::InvalidResolution {
                shooter: result.shooter_name.clone(),
                shot_index: i + 1,
                resolution: shot.resolution,
            });
        }
    }
    Ok(())
}
