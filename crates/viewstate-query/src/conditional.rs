//! Plain percent-encoding with a parenthesis fallback.
//!
//! Most ids and values contain none of the characters that end their slot
//! in the grammar, so they are written as plain URI components. Only values
//! that start with `(` or contain one of the slot's unsafe characters pay for
//! the bracket of [`crate::paren`].
//!
//! Both sides must agree on the unsafe set, and the set must not contain `(`.

use crate::error::Result;
use crate::paren;
use crate::uri::{decode_uri_component, encode_uri_component};

/// Characters that end the field slot of `search(...)`.
pub const SEARCH_FIELD_UNSAFE: &[char] = &[',', ')'];

/// Characters that end the query slot of `search(...)`.
pub const SEARCH_QUERY_UNSAFE: &[char] = &[')'];

/// Characters that end an id or value slot in `filter(...)` and `fields(...)`.
pub const ENTRY_UNSAFE: &[char] = &[':', ')', ','];

/// Encode `value` for a slot delimited by `unsafe_chars`.
#[must_use]
pub fn maybe_encode(value: &str, unsafe_chars: &[char]) -> String {
    debug_assert!(!unsafe_chars.contains(&'('));
    if value.starts_with('(') || value.contains(unsafe_chars) {
        paren::encode(value)
    } else {
        encode_uri_component(value)
    }
}

/// Decode one slot from the start of `input`.
///
/// Returns the value and the number of bytes consumed. A plain slot runs up
/// to the first unsafe character, which is not consumed.
pub fn maybe_decode(input: &str, unsafe_chars: &[char]) -> Result<(String, usize)> {
    debug_assert!(!unsafe_chars.contains(&'('));
    if input.starts_with('(') {
        return paren::decode(input);
    }
    let end = input.find(unsafe_chars).unwrap_or(input.len());
    Ok((decode_uri_component(&input[..end])?, end))
}
