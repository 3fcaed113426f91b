use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use viewstate_model::ViewState;
use viewstate_query::{ViewDefinition, decode, decode_and_apply, encode};

use crate::cli::{ApplyArgs, DecodeArgs, DecodeFormatArg, EncodeArgs};
use crate::report::decoded_table;

pub fn load_view(path: &Path) -> Result<ViewDefinition> {
    let view = ViewDefinition::from_path(path)
        .with_context(|| format!("load view definition {}", path.display()))?;
    debug!(
        path = %path.display(),
        filters = view.filters.len(),
        fields = view.fields.len(),
        "loaded view definition"
    );
    Ok(view)
}

/// Read a state file, or build the view's initial state when there is none.
pub fn load_state(path: Option<&Path>, view: &ViewDefinition) -> Result<ViewState> {
    let Some(path) = path else {
        return view.initial_state().context("build initial view state");
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read state {}", path.display()))?;
    let state: ViewState = serde_json::from_str(&text)
        .with_context(|| format!("parse state {}", path.display()))?;
    state
        .validate()
        .with_context(|| format!("validate state {}", path.display()))?;
    Ok(state)
}

pub fn run_encode(args: &EncodeArgs) -> Result<String> {
    let view = load_view(&args.view)?;
    let state = load_state(args.state.as_deref(), &view)?;
    let token = encode(&state, &view.registry()).context("encode view state")?;
    info!(length = token.len(), "encoded view state");
    Ok(token)
}

pub fn run_decode(args: &DecodeArgs) -> Result<String> {
    let view = load_view(&args.view)?;
    let decoded = decode(&args.token, &view.registry()).context("decode query token")?;
    match args.format {
        DecodeFormatArg::Table => Ok(decoded_table(&decoded).to_string()),
        DecodeFormatArg::Json => {
            serde_json::to_string_pretty(&decoded).context("serialize decoded query")
        }
    }
}

pub fn run_apply(args: &ApplyArgs) -> Result<String> {
    let view = load_view(&args.view)?;
    let current = load_state(args.state.as_deref(), &view)?;
    let next = decode_and_apply(&args.token, &current, &view.registry(), args.soft)
        .context("apply query token")?;
    info!(
        filters = next.enabled_filter_ids().len(),
        fields = next.fields.len(),
        "applied query token"
    );
    serde_json::to_string_pretty(&next).context("serialize view state")
}
