//! Expansion of list-valued parameters.

use std::sync::Arc;

use super::{TransformContext, Transformer};
use crate::tag::ParamTags;
use crate::{ParamTag, Parameter, ParameterRole, Result, Value};

/// Expands sequences and named pairs into individual parameters.
///
/// - A [`Value::List`] query parameter, or a [`Value::Json`] array, becomes one parameter per non-null
///   element, with the same name, role and tags. With a
///   [`CollectionFormat`](crate::CollectionFormat) other than `Multi` the list
///   is kept whole and joined by the [`DefaultResolver`](super::DefaultResolver);
///   an empty joined list is dropped.
/// - Route lists are always kept whole, a placeholder takes one value.
/// - A [`Value::Pairs`] parameter becomes one parameter per pair, name and
///   role taken from the pair. Pair values are expanded in turn.
/// - Content parameters are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListExpansion;

impl Transformer for ListExpansion {
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        _context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        let mut expanded = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            expand(parameter, &mut expanded);
        }
        Ok(expanded)
    }
}

fn expand(mut parameter: Parameter, out: &mut Vec<Parameter>) {
    if parameter.role == ParameterRole::Content {
        out.push(parameter);
        return;
    }

    // a serde sequence is a list of JSON elements
    if let Value::Json(serde_json::Value::Array(items)) = &mut parameter.value {
        let items = std::mem::take(items);
        parameter.value = Value::List(items.into_iter().map(Value::Json).collect());
    }

    if !matches!(parameter.value, Value::Pairs(_) | Value::List(_)) {
        out.push(parameter);
        return;
    }

    match &parameter.value {
        Value::Pairs(pairs) => {
            // the pair names replace the parameter name
            let tags: Arc<[ParamTag]> = parameter
                .tags
                .iter()
                .filter(|tag| !matches!(tag, ParamTag::Rename(_)))
                .cloned()
                .collect();
            for pair in pairs.iter().filter(|pair| !pair.value.is_null()) {
                let derived = Parameter {
                    name: pair.name.clone(),
                    declared_type: None,
                    value: pair.value.clone(),
                    formatted: None,
                    role: pair.role,
                    tags: Arc::clone(&tags),
                };
                expand(derived, out);
            }
        }
        Value::List(items) => {
            let items: Vec<_> = items.iter().filter(|item| !item.is_null()).collect();
            let joined = parameter.role == ParameterRole::Route
                || parameter.tags.collection_format().separator().is_some();

            if joined {
                if items.is_empty() && parameter.role == ParameterRole::Query {
                    return;
                }
                let value = Value::List(items.into_iter().cloned().collect());
                out.push(parameter.with_value(value));
            } else {
                for item in items {
                    expand(parameter.with_value(item.clone()), out);
                }
            }
        }
        _ => {}
    }
}
