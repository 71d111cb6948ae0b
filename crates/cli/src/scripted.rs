//! Replay of decisions from a JSON file.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use shopsim_engine::{DayView, Decision, DecisionSource};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read decisions from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decisions must be a JSON array of day decisions")]
    Parse(#[from] serde_json::Error),
}

/// Hands out one decision per day in file order; once the list is exhausted
/// every later day is idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    remaining: VecDeque<Decision>,
}

impl ScriptedDecisions {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            remaining: decisions.into_iter().collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let decisions: Vec<Decision> = serde_json::from_str(json)?;
        Ok(Self::new(decisions))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    type Error = Infallible;

    fn decide(&mut self, view: &DayView<'_>) -> Result<Decision, Self::Error> {
        Ok(self
            .remaining
            .pop_front()
            .unwrap_or_else(|| Decision::idle(view.state)))
    }
}
