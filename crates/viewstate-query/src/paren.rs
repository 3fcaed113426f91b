//! Variable-depth parenthesis encoding.
//!
//! Wraps an arbitrary string so it can sit inside the larger token stream
//! without being mistaken for a delimiter:
//!
//! | Input      | Encoded          |
//! |------------|------------------|
//! | `cats`     | `(cats)`         |
//! | `cats()`   | `((cats()))`     |
//! | `cats(())` | `(((cats(()))))` |
//! | `(cats)`   | `((*(cats)))`    |
//! | `*cats`    | `(**cats)`       |
//! | `cats#%`   | `(cats%23%25)`   |
//!
//! The bracket is one deeper than the longest run of literal `)` in the
//! payload. A payload starting with `*` or `(` gets a `*` marker so the
//! header count stays unambiguous; the decoder always drops one marker.
//! Parentheses without a partner inside the payload are written as
//! `%28`/`%29`, so every literal `)` in the payload is absorbed by the
//! decoder's nesting counter and only the terminator can end the scan.

use std::borrow::Cow;
use std::iter;

use crate::error::{QueryError, Result};
use crate::uri::{decode_uri_component, encode_uri_component};

/// Header marker protecting payloads that start with `*` or `(`.
const MARKER: char = '*';

/// Wrap `value` in a self-terminating parenthesis bracket.
#[must_use]
pub fn encode(value: &str) -> String {
    let encoded = if value.starts_with([MARKER, '(']) {
        encode_uri_component(&format!("{MARKER}{value}"))
    } else {
        encode_uri_component(value)
    };
    let payload = escape_unpaired(&encoded);
    let depth = longest_close_run(&payload) + 1;

    let mut out = String::with_capacity(payload.len() + depth * 2);
    out.extend(iter::repeat_n('(', depth));
    out.push_str(&payload);
    out.extend(iter::repeat_n(')', depth));
    out
}

/// Read one parenthesis-wrapped value from the start of `input`.
///
/// Returns the decoded value and the number of bytes consumed, header and
/// terminator included. Anything after the terminator is left untouched.
pub fn decode(input: &str) -> Result<(String, usize)> {
    let bytes = input.as_bytes();
    let parens = bytes.iter().take_while(|&&byte| byte == b'(').count();
    if parens == 0 {
        return Err(QueryError::UnbalancedParens { position: 0 });
    }

    let mut start = parens;
    if bytes.get(start) == Some(&(MARKER as u8)) {
        start += 1;
    }

    let mut depth = 0usize;
    let mut streak = 0usize;
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'(' => {
                depth += 1;
                streak = 0;
            }
            b')' if depth > 0 => {
                depth -= 1;
                streak = 0;
            }
            b')' => {
                streak += 1;
                if streak == parens {
                    let end = start + offset + 1;
                    let value = decode_uri_component(&input[start..end - parens])?;
                    return Ok((value, end));
                }
            }
            _ => streak = 0,
        }
    }

    Err(QueryError::UnbalancedParens {
        position: input.len(),
    })
}

fn longest_close_run(payload: &str) -> usize {
    payload
        .split(|c| c != ')')
        .map(str::len)
        .max()
        .unwrap_or(0)
}

/// Percent-escape parentheses that have no partner in `encoded`.
fn escape_unpaired(encoded: &str) -> Cow<'_, str> {
    let mut open = Vec::new();
    let mut unpaired = Vec::new();
    for (index, byte) in encoded.bytes().enumerate() {
        match byte {
            b'(' => open.push(index),
            b')' => {
                if open.pop().is_none() {
                    unpaired.push(index);
                }
            }
            _ => {}
        }
    }
    unpaired.extend(open);
    if unpaired.is_empty() {
        return Cow::Borrowed(encoded);
    }
    unpaired.sort_unstable();

    let mut out = String::with_capacity(encoded.len() + unpaired.len() * 2);
    let mut last = 0;
    for index in unpaired {
        out.push_str(&encoded[last..index]);
        out.push_str(if encoded.as_bytes()[index] == b'(' {
            "%28"
        } else {
            "%29"
        });
        last = index + 1;
    }
    out.push_str(&encoded[last..]);
    Cow::Owned(out)
}
