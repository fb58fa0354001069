//! Canonical string form of simple values.

use std::fmt::Write as _;

use super::{TransformContext, Transformer};
use crate::tag::ParamTags;
use crate::{Parameter, ParameterRole, Result, Value};

/// Formats simple route and query values to their canonical string form.
///
/// | value | form |
/// |-------|------|
/// | string | unchanged |
/// | integer, float | decimal, no exponent, no grouping |
/// | boolean | `true` / `false` |
/// | date-time | RFC 3339, or the `Format` tag pattern |
/// | date | `YYYY-MM-DD`, or the `Format` tag pattern |
/// | list | elements joined by the collection separator (`,` by default) |
///
/// Parameters already formatted by an earlier transformer, content
/// parameters, and values with no canonical form are left untouched; the
/// latter fall back to their raw text in the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl Transformer for DefaultResolver {
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        _context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        Ok(parameters
            .into_iter()
            .map(|mut parameter| {
                if parameter.formatted.is_none() && parameter.role != ParameterRole::Content {
                    parameter.formatted = format_parameter(&parameter);
                }
                parameter
            })
            .collect())
    }
}

fn format_parameter(parameter: &Parameter) -> Option<String> {
    let pattern = parameter.tags.format_pattern();
    match &parameter.value {
        Value::List(items) => {
            let separator = parameter
                .tags
                .collection_format()
                .separator()
                .unwrap_or(",");
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::Custom(custom) => custom.format(pattern),
                    other => format_scalar(other, pattern).unwrap_or_else(|| other.to_string()),
                })
                .collect();
            Some(parts.join(separator))
        }
        value => format_scalar(value, pattern),
    }
}

pub(crate) fn format_scalar(value: &Value, pattern: Option<&str>) -> Option<String> {
    match value {
        Value::Bool(value) => Some(value.to_string()),
        Value::Int(value) => Some(value.to_string()),
        Value::UInt(value) => Some(value.to_string()),
        Value::Float(value) => Some(value.to_string()),
        Value::Str(value) => Some(value.clone()),
        Value::DateTime(value) => match pattern {
            Some(pattern) => checked_format(value.format(pattern)),
            None => Some(value.to_rfc3339()),
        },
        Value::Date(value) => checked_format(value.format(pattern.unwrap_or("%Y-%m-%d"))),
        Value::Json(serde_json::Value::String(value)) => Some(value.clone()),
        Value::Json(serde_json::Value::Number(value)) => Some(value.to_string()),
        Value::Json(serde_json::Value::Bool(value)) => Some(value.to_string()),
        _ => None,
    }
}

/// Renders a chrono format, `None` when the pattern is invalid.
fn checked_format(formatted: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok().map(|()| out)
}
