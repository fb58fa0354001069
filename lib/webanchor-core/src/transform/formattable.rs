//! Self-formatting values.

use super::{TransformContext, Transformer};
use crate::tag::ParamTags;
use crate::{Parameter, ParameterRole, Result, Value};

/// Lets [`Formattable`](crate::Formattable) values format themselves.
///
/// Runs after the [`DefaultResolver`](super::DefaultResolver) and overrides
/// whatever it produced for a [`Value::Custom`], passing the `Format` tag
/// pattern along.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormattableResolver;

impl Transformer for FormattableResolver {
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        _context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        Ok(parameters
            .into_iter()
            .map(|mut parameter| {
                if parameter.role != ParameterRole::Content
                    && let Value::Custom(custom) = &parameter.value
                {
                    parameter.formatted = Some(custom.format(parameter.tags.format_pattern()));
                }
                parameter
            })
            .collect())
    }
}
