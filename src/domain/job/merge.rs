//! Field-level overlay of a template output group onto a catalogue default.
//!
//! Precedence, applied recursively over the JSON form of a group:
//! - a field the template leaves unset (absent, `null`, or an empty list) keeps the default;
//! - two objects are overlaid key by key, so default-only keys survive;
//! - any other template value (scalar or non-empty list) replaces the default outright.
//!
//! Lists are never concatenated: a template's renditions replace the default's.

use super::spec::{GroupKind, OutputGroupSpec};
use crate::error::{PipelineError, Result};
use serde_json::Value;

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub fn overlay(base: Value, over: &Value) -> Value {
    if is_unset(over) {
        return base;
    }
    match (base, over) {
        (Value::Object(mut base), Value::Object(over)) => {
            for (key, value) in over {
                let merged = match base.remove(key) {
                    Some(existing) => overlay(existing, value),
                    None if is_unset(value) => continue,
                    None => value.clone(),
                };
                base.insert(key.clone(), merged);
            }
            Value::Object(base)
        }
        (_, over) => over.clone(),
    }
}

pub fn merge_group(
    default: &OutputGroupSpec,
    template: &OutputGroupSpec,
    kind: GroupKind,
) -> Result<OutputGroupSpec> {
    let to_merge_error = |source| PipelineError::Merge {
        group: kind.default_name(),
        source,
    };
    let base = serde_json::to_value(default).map_err(to_merge_error)?;
    let over = serde_json::to_value(template).map_err(to_merge_error)?;
    serde_json::from_value(overlay(base, &over)).map_err(to_merge_error)
}
