//! Single-pass read position over an immutable token.

use crate::conditional;
use crate::error::{QueryError, Result};
use crate::paren;

pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume `expected` if it is next.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(QueryError::unexpected(expected, self.peek(), self.position))
        }
    }

    /// Consume the longest prefix whose characters satisfy `accept`.
    pub(crate) fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !accept(c)).unwrap_or(rest.len());
        self.position += len;
        &rest[..len]
    }

    /// Read one slot delimited by `unsafe_chars`.
    pub(crate) fn maybe_decode(&mut self, unsafe_chars: &[char]) -> Result<String> {
        let (value, used) = conditional::maybe_decode(self.rest(), unsafe_chars)
            .map_err(|err| err.shifted(self.position))?;
        self.position += used;
        Ok(value)
    }

    /// Read one parenthesis-wrapped value.
    pub(crate) fn paren_decode(&mut self) -> Result<String> {
        let (value, used) =
            paren::decode(self.rest()).map_err(|err| err.shifted(self.position))?;
        self.position += used;
        Ok(value)
    }
}
