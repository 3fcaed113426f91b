//! Filter specifications supplied by each screen.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use viewstate_model::{Filter, Filters};

use crate::codec::{FilterCodec, PrimitiveCodec};
use crate::error::Result;

static PRIMITIVE: PrimitiveCodec = PrimitiveCodec;

/// Default value and wire codec of one filter id.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    default: Filter,
    codec: Arc<dyn FilterCodec>,
}

impl FilterSpec {
    /// A filter using the primitive codec.
    pub fn new(default: Filter) -> Self {
        Self {
            default,
            codec: Arc::new(PrimitiveCodec),
        }
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl FilterCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    #[must_use]
    pub fn with_shared_codec(mut self, codec: Arc<dyn FilterCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Fresh copy of the default filter.
    #[must_use]
    pub fn default_filter(&self) -> Filter {
        self.default.clone()
    }

    pub fn codec(&self) -> &dyn FilterCodec {
        self.codec.as_ref()
    }
}

/// Filter specifications keyed by filter id.
///
/// Ids without a specification still round-trip through the primitive
/// codec, so a URL written by a newer screen does not break an older one.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    specs: BTreeMap<String, FilterSpec>,
}

impl FilterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, spec: FilterSpec) -> Self {
        self.register(id, spec);
        self
    }

    pub fn register(&mut self, id: impl Into<String>, spec: FilterSpec) -> Option<FilterSpec> {
        self.specs.insert(id.into(), spec)
    }

    pub fn get(&self, id: &str) -> Option<&FilterSpec> {
        self.specs.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.specs.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Codec for `id`, falling back to the primitive codec.
    pub fn codec_for(&self, id: &str) -> &dyn FilterCodec {
        match self.specs.get(id) {
            Some(spec) => spec.codec(),
            None => &PRIMITIVE,
        }
    }

    /// Filter set built from every default, switched on.
    #[must_use]
    pub fn default_filters(&self) -> Filters {
        Filters {
            disabled: false,
            entries: self
                .specs
                .iter()
                .map(|(id, spec)| (id.clone(), spec.default_filter()))
                .collect(),
        }
    }

    /// Serialize an enabled filter with the codec registered for `id`.
    pub fn serialize(&self, id: &str, filter: &Filter) -> Result<String> {
        debug_assert!(filter.enabled, "only enabled filters are serialized");
        self.codec_for(id)
            .serialize(filter)
            .map_err(|err| err.in_filter(id))
    }

    /// Deserialize the wire text of filter `id`; the result is enabled.
    pub fn deserialize(&self, id: &str, raw: &str) -> Result<Filter> {
        if !self.contains(id) {
            debug!(filter = id, "no specification for filter, using primitive codec");
        }
        let mut filter = self
            .codec_for(id)
            .deserialize(raw)
            .map_err(|err| err.in_filter(id))?;
        filter.enabled = true;
        Ok(filter)
    }
}
