//! Transformers driven by declarative tags.

use std::sync::Arc;

use super::{TransformContext, Transformer};
use crate::{ListTag, ParamTag, Parameter, ParameterRole, Result};

/// Applies the [`ListTag`]s of the group, then those of the endpoint, to
/// the whole parameter list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTagTransformer;

impl Transformer for ListTagTransformer {
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        context
            .invocation()
            .list_tags()
            .try_fold(parameters, |current, tag| match tag {
                ListTag::TypeNameAsRoute(route) => {
                    TypeNameAsRoute::new(route.clone()).transform(current, context)
                }
                ListTag::Transform(name) => context.registry().list(name)?.transform(current, context),
            })
    }
}

/// Applies the [`ParamTag::Rename`] and [`ParamTag::Transform`] tags of each
/// parameter, in tag order. Untagged parameters pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamTagTransformer;

impl Transformer for ParamTagTransformer {
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        parameters
            .into_iter()
            .map(|parameter| {
                let tags = Arc::clone(&parameter.tags);
                tags.iter().try_fold(parameter, |mut current, tag| match tag {
                    ParamTag::Rename(key) => {
                        current.name.clone_from(key);
                        Ok(current)
                    }
                    ParamTag::Transform(name) => {
                        Ok(context.registry().parameter(name)?.transform(current))
                    }
                    ParamTag::Content | ParamTag::Format(_) | ParamTag::Collection(_) => {
                        Ok(current)
                    }
                })
            })
            .collect()
    }
}

/// Emits a route parameter holding the short type name of the content
/// parameter's declared type.
///
/// With `route = "type"`, posting a `shop::Order` to `/{type}` resolves to
/// `/Order`. Nothing is emitted when there is no typed content parameter or
/// when a route parameter with that name already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameAsRoute {
    route: String,
}

impl TypeNameAsRoute {
    /// Creates the transformer for the given route placeholder.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

impl Transformer for TypeNameAsRoute {
    fn transform(
        &self,
        mut parameters: Vec<Parameter>,
        _context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>> {
        let already_routed = parameters
            .iter()
            .any(|p| p.role == ParameterRole::Route && p.name == self.route);
        let type_name = parameters
            .iter()
            .find(|p| p.role == ParameterRole::Content)
            .and_then(Parameter::short_type_name);

        if let (Some(type_name), false) = (type_name, already_routed) {
            let mut route = Parameter::new(self.route.clone(), type_name, ParameterRole::Route);
            route.formatted = Some(type_name.to_string());
            parameters.push(route);
        }

        Ok(parameters)
    }
}
