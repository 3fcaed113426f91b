//! Data model for list view state.
//!
//! A [`ViewState`] captures everything a list screen needs to reproduce
//! itself from a URL: free-text search, named toggleable filters, the
//! chosen and ordered output fields with their sort directions, and a
//! pagination cursor.

pub mod error;
pub mod field;
pub mod filter;
pub mod state;

pub use error::{ModelError, Result};
pub use field::{FieldCatalogue, FieldSpec, FieldState, Sorting};
pub use filter::{Filter, Filters};
pub use state::{DEFAULT_LIMIT, JsonFilterState, SearchState, ViewState};
