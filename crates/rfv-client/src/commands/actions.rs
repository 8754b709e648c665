use crate::ClientResult;
use crate::actions;
use crate::commands::common::action_entries;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ActionsData;

pub fn run(actions_path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let resolved = actions::resolve(actions_path)?;
    let data = ActionsData {
        source: resolved.source.as_str().to_string(),
        source_ref: resolved.source_ref,
        entries: action_entries(&resolved.map),
    };
    success("actions", data)
}
