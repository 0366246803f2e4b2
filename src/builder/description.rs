//! Declarative description of a state graph.
//!
//! A description names the initial state and lists every state with its
//! optional lifecycle notifications and its transitions, in order. It is
//! plain serde data and loads from JSON or TOML:
//!
//! ```toml
//! initial = "StopWatch/states/ready"
//!
//! [[states]]
//! name = "StopWatch/states/ready"
//! entering = "resetDisplay"
//!
//! [[states.transitions]]
//! action = "StopWatch/actions/start"
//! target = "StopWatch/states/running"
//! ```

use crate::builder::error::{BuildError, GraphViolation};
use crate::core::State;
use crate::machine::MachineConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Root of a graph description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FsmDescription {
    /// Name of the state entered on activation
    pub initial: String,

    #[serde(default)]
    pub states: Vec<StateDescription>,

    #[serde(default)]
    pub config: MachineConfig,
}

/// One state of a graph description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDescription {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entering: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exiting: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,

    #[serde(default)]
    pub transitions: Vec<TransitionDescription>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDescription {
    pub action: String,
    pub target: String,
}

/// Serialization format of a description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, BuildError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(BuildError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

impl FsmDescription {
    pub fn from_json(input: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_toml(input: &str) -> Result<Self, BuildError> {
        Ok(toml::from_str(input)?)
    }

    pub fn parse(input: &str, format: Format) -> Result<Self, BuildError> {
        match format {
            Format::Json => Self::from_json(input),
            Format::Toml => Self::from_toml(input),
        }
    }

    /// Load a description, choosing the format by file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String, BuildError> {
        Ok(toml::to_string(self)?)
    }

    /// Check the graph, collecting every problem rather than the first.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<GraphViolation>> {
        let declared: HashSet<&str> = self.states.iter().map(|s| s.name.as_str()).collect();
        let mut checks: Vec<Validation<(), NonEmptyVec<GraphViolation>>> = Vec::new();

        let initial = if self.initial.is_empty() {
            Validation::fail(GraphViolation::EmptyInitial)
        } else if !declared.contains(self.initial.as_str()) {
            Validation::fail(GraphViolation::UnknownInitial(self.initial.clone()))
        } else {
            Validation::success(())
        };
        checks.push(initial);

        let mut seen = HashSet::new();
        for (index, state) in self.states.iter().enumerate() {
            if state.name.is_empty() {
                checks.push(Validation::fail(GraphViolation::EmptyStateName { index }));
            } else if !seen.insert(state.name.as_str()) {
                checks.push(Validation::fail(GraphViolation::DuplicateState(
                    state.name.clone(),
                )));
            }

            for transition in &state.transitions {
                if transition.action.is_empty() {
                    checks.push(Validation::fail(GraphViolation::EmptyAction {
                        state: state.name.clone(),
                    }));
                }
                if !declared.contains(transition.target.as_str()) {
                    checks.push(Validation::fail(GraphViolation::UnresolvedTarget {
                        state: state.name.clone(),
                        action: transition.action.clone(),
                        target: transition.target.clone(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// `validate` as a `Result`, for failing fast at startup.
    pub fn check(&self) -> Result<(), BuildError> {
        match self.validate() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => {
                Err(BuildError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }
}

impl From<&State> for StateDescription {
    fn from(state: &State) -> Self {
        Self {
            name: state.name().to_string(),
            entering: state.entering_event().map(str::to_string),
            exiting: state.exiting_event().map(str::to_string),
            changed: state.changed_event().map(str::to_string),
            transitions: state
                .transitions()
                .map(|(action, target)| TransitionDescription {
                    action: action.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }
}
