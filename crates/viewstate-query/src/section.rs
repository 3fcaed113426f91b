//! Section names of the query grammar.

use std::fmt;

/// One named, self-terminating part of a query token, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Search,
    /// Reserved: parsed and discarded, never emitted.
    JsonFilter,
    Filter,
    Fields,
    Pos,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::Search,
        Self::JsonFilter,
        Self::Filter,
        Self::Fields,
        Self::Pos,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::JsonFilter => "jsonFilter",
            Self::Filter => "filter",
            Self::Fields => "fields",
            Self::Pos => "pos",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
