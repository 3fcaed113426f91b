//! URI component percent-encoding.
//!
//! Matches the browser `encodeURIComponent` alphabet: alphanumerics and
//! `- _ . ! ~ * ' ( )` stay literal, everything else is written as
//! uppercase `%XX` escapes of its UTF-8 bytes. Leaving `(` and `)` literal
//! is what makes [`crate::paren`] necessary.

use crate::error::{QueryError, Result};

/// Marks left literal on top of what `urlencoding` already keeps.
const URI_MARKS: [char; 5] = ['!', '\'', '(', ')', '*'];

/// Percent-encode one URI component.
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for segment in value.split_inclusive(URI_MARKS) {
        match segment.strip_suffix(URI_MARKS) {
            Some(head) => {
                out.push_str(&urlencoding::encode(head));
                out.push_str(&segment[head.len()..]);
            }
            None => out.push_str(&urlencoding::encode(segment)),
        }
    }
    out
}

/// Reverse [`encode_uri_component`].
///
/// Sequences that are not valid `%XX` escapes are kept verbatim; escapes
/// that decode to invalid UTF-8 are an error.
pub fn decode_uri_component(value: &str) -> Result<String> {
    urlencoding::decode(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| QueryError::InvalidEncoding {
            message: err.to_string(),
        })
}
