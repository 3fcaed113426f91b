//! Guard against encode/decode feedback loops.

use tracing::{debug, warn};
use viewstate_model::ViewState;

use crate::encoder::encode;
use crate::error::{QueryError, Result};
use crate::reconcile::decode_and_apply;
use crate::registry::FilterRegistry;

/// Result of [`QuerySync::receive`].
#[derive(Debug)]
pub enum SyncOutcome {
    /// The token is the one this view wrote last; nothing to do.
    Unchanged,
    /// The token described a new state.
    Applied(ViewState),
    /// The token could not be decoded. Keep the last known good state.
    Rejected(QueryError),
}

/// Tracks the token a view wrote last so it is not decoded back.
///
/// The first token received after construction is merged softly: filter
/// defaults survive when it carries no filter section.
#[derive(Debug, Clone, Default)]
pub struct QuerySync {
    last_encoded: Option<String>,
    mounted: bool,
}

impl QuerySync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token most recently produced by [`QuerySync::encode`].
    pub fn last_encoded(&self) -> Option<&str> {
        self.last_encoded.as_deref()
    }

    /// Encode `state` and remember the token.
    pub fn encode(&mut self, state: &ViewState, registry: &FilterRegistry) -> Result<String> {
        let token = encode(state, registry)?;
        self.last_encoded = Some(token.clone());
        Ok(token)
    }

    /// Handle a token coming from outside, typically the address bar.
    pub fn receive(
        &mut self,
        incoming: &str,
        current: &ViewState,
        registry: &FilterRegistry,
    ) -> SyncOutcome {
        if self.last_encoded.as_deref() == Some(incoming) {
            debug!(token = incoming, "incoming token matches last encoded one");
            return SyncOutcome::Unchanged;
        }

        let soft_initial = !self.mounted;
        self.mounted = true;
        match decode_and_apply(incoming, current, registry, soft_initial) {
            Ok(state) => {
                self.last_encoded = Some(incoming.to_string());
                SyncOutcome::Applied(state)
            }
            Err(error) => {
                warn!(token = incoming, %error, "rejected incoming token");
                SyncOutcome::Rejected(error)
            }
        }
    }
}
