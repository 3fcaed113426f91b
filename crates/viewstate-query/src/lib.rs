//! Reversible URL query codec for list view state.
//!
//! A [`ViewState`](viewstate_model::ViewState) is written as a single
//! URL-safe token made of self-terminating sections:
//!
//! ```text
//! search(name,red%20fox)filter(status:open)fields(name:asc)pos(50,25)
//! ```
//!
//! Payloads that could collide with the delimiters are wrapped in a
//! variable-depth parenthesis bracket (see [`paren`]). Decoding yields a
//! partial [`DecodedQuery`] which [`apply`] merges onto the current state.
//!
//! # Example
//!
//! ```
//! use viewstate_model::{FieldState, Filter, Filters, Sorting, ViewState};
//! use viewstate_query::{FilterRegistry, FilterSpec, apply, decode, encode};
//!
//! let registry = FilterRegistry::new().with("status", FilterSpec::new(Filter::disabled("open")));
//! let state = ViewState::new()
//!     .with_filters(registry.default_filters().with("status", Filter::enabled("closed")))
//!     .with_fields(vec![FieldState::new("name").with_sorting(Sorting::Asc)]);
//!
//! let token = encode(&state, &registry).unwrap();
//! assert_eq!(token, "filter(status:closed)fields(name:asc)");
//!
//! let decoded = decode(&token, &registry).unwrap();
//! let restored = apply(&decoded, &ViewState::new().with_filters(Filters::new()), false);
//! assert_eq!(restored.enabled_filter_ids(), vec!["status"]);
//! ```

pub mod codec;
pub mod conditional;
mod cursor;
mod decoder;
mod encoder;
mod error;
pub mod paren;
pub mod primitive;
mod reconcile;
mod registry;
mod section;
mod sync;
pub mod uri;
mod view;

pub use codec::{FilterCodec, JsonCodec, ListCodec, PrimitiveCodec};
pub use decoder::{DecodedField, DecodedQuery, decode};
pub use encoder::encode;
pub use error::{QueryError, Result};
pub use reconcile::{apply, decode_and_apply};
pub use registry::{FilterRegistry, FilterSpec};
pub use section::Section;
pub use sync::{QuerySync, SyncOutcome};
pub use view::{CodecKind, FilterDefinition, ViewDefinition};
