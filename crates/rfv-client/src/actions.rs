//! Resolution of the score-to-marketing-action table.
//!
//! Precedence: an explicit path, then the `RFV_ACTIONS` environment variable,
//! then the built-in reference table.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::rfv::score::ActionMap;
use crate::{ClientError, ClientResult};

pub const ACTIONS_ENV_VAR: &str = "RFV_ACTIONS";

const REFERENCE_ACTIONS: [(&str, &str); 4] = [
    (
        "AAA",
        "VIP customer: send exclusive coupons, gifts, and product pre-sales.",
    ),
    ("DDD", "Inactive customer: send reactivation offers."),
    (
        "DAA",
        "High-value former customer: offer a special comeback discount.",
    ),
    ("CAA", "At-risk customer: offer a personalized promotion."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    Argument,
    Environment,
    Reference,
}

impl ActionSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argument => "argument",
            Self::Environment => "environment",
            Self::Reference => "reference",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedActions {
    pub source: ActionSource,
    pub source_ref: Option<String>,
    pub map: ActionMap,
}

pub fn reference_action_map() -> ActionMap {
    ActionMap::from_pairs(REFERENCE_ACTIONS).unwrap_or_default()
}

pub fn resolve(explicit_path: Option<&str>) -> ClientResult<ResolvedActions> {
    let env_path = std::env::var(ACTIONS_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty());
    resolve_with_env(explicit_path, env_path.as_deref())
}

#[doc(hidden)]
pub fn resolve_with_env(
    explicit_path: Option<&str>,
    env_path: Option<&str>,
) -> ClientResult<ResolvedActions> {
    let (source, path) = match (explicit_path, env_path) {
        (Some(path), _) => (ActionSource::Argument, path),
        (None, Some(path)) => (ActionSource::Environment, path),
        (None, None) => {
            return Ok(ResolvedActions {
                source: ActionSource::Reference,
                source_ref: None,
                map: reference_action_map(),
            });
        }
    };

    let map = load_action_file(Path::new(path))?;
    if map.is_empty() {
        tracing::warn!(path, "actions.empty_table: every score will be unmapped");
    }
    tracing::debug!(
        source = source.as_str(),
        path,
        entries = map.len(),
        "actions.resolved"
    );

    Ok(ResolvedActions {
        source,
        source_ref: Some(path.to_string()),
        map,
    })
}

pub fn load_action_file(path: &Path) -> ClientResult<ActionMap> {
    let label = format!("`{}`", path.display());
    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::invalid_action_map(&label, &error.to_string()))?;
    parse_action_table(&body, &label)
}

pub fn parse_action_table(body: &str, label: &str) -> ClientResult<ActionMap> {
    let parsed = serde_json::from_str::<Value>(body)
        .map_err(|error| ClientError::invalid_action_map(label, &error.to_string()))?;
    let Some(object) = parsed.as_object() else {
        return Err(ClientError::invalid_action_map(
            label,
            "expected a JSON object of score -> action text",
        ));
    };

    let mut map = ActionMap::new();
    for (score, action) in object {
        let Some(text) = action.as_str() else {
            return Err(ClientError::invalid_action_map(
                label,
                &format!("action for `{score}` must be a string"),
            ));
        };
        map.insert(score, text)
            .map_err(|error| ClientError::invalid_action_map(label, &error.to_string()))?;
    }
    Ok(map)
}
