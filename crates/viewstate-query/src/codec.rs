//! Per-filter value codecs.
//!
//! Every filter id can bring its own [`FilterCodec`]. Both methods default
//! to the primitive codec on [`Filter::value`], so an implementation only
//! overrides the direction it needs.

use std::fmt;

use serde_json::Value;
use viewstate_model::Filter;

use crate::error::{QueryError, Result};
use crate::{paren, primitive};

/// Text representation of one filter on the wire.
pub trait FilterCodec: fmt::Debug + Send + Sync {
    /// Render an enabled filter as text.
    fn serialize(&self, filter: &Filter) -> Result<String> {
        primitive::serialize(&filter.value)
    }

    /// Rebuild a filter from text. The result is always treated as enabled.
    fn deserialize(&self, raw: &str) -> Result<Filter> {
        Ok(Filter::enabled(primitive::deserialize(raw)))
    }
}

/// Scalar values through [`primitive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveCodec;

impl FilterCodec for PrimitiveCodec {}

/// A list of scalars, each item parenthesis-wrapped: `(a)(b%20c)(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

impl FilterCodec for ListCodec {
    fn serialize(&self, filter: &Filter) -> Result<String> {
        match &filter.value {
            Value::Null => Ok(String::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| primitive::serialize(item).map(|text| paren::encode(&text)))
                .collect(),
            other => Err(QueryError::invalid_filter_value(format!(
                "expected a list, found {}",
                primitive::value_kind(other)
            ))),
        }
    }

    fn deserialize(&self, raw: &str) -> Result<Filter> {
        let mut items = Vec::new();
        let mut position = 0;
        while position < raw.len() {
            let (item, used) =
                paren::decode(&raw[position..]).map_err(|err| err.shifted(position))?;
            items.push(primitive::deserialize(&item));
            position += used;
        }
        Ok(Filter::enabled(Value::Array(items)))
    }
}

/// Any JSON value as compact JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl FilterCodec for JsonCodec {
    fn serialize(&self, filter: &Filter) -> Result<String> {
        serde_json::to_string(&filter.value)
            .map_err(|err| QueryError::invalid_filter_value(err.to_string()))
    }

    fn deserialize(&self, raw: &str) -> Result<Filter> {
        serde_json::from_str::<Value>(raw)
            .map(Filter::enabled)
            .map_err(|err| QueryError::invalid_filter_value(err.to_string()))
    }
}
