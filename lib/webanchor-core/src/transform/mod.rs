//! The transformer pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`Transformer`]s applied
//! left-to-right to the classified parameters of an invocation, each one
//! seeing only the output of the previous one. The canonical pipeline runs:
//!
//! 1. [`ListExpansion`] - sequences and named pairs become parameters
//! 2. [`DefaultResolver`] - canonical string form of simple values
//! 3. [`FormattableResolver`] - self-formatting values
//! 4. [`ListTagTransformer`] - group and endpoint [`ListTag`](crate::ListTag)s
//! 5. [`ParamTagTransformer`] - per-parameter [`ParamTag`](crate::ParamTag)s
//!
//! A pipeline is configured once and shared; transformers hold no mutable
//! state, so one pipeline serves concurrent invocations.

mod attribute;
mod default;
mod formattable;
mod list;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Error, InvocationDescriptor, Parameter, Result};

pub use attribute::{ListTagTransformer, ParamTagTransformer, TypeNameAsRoute};
pub use default::DefaultResolver;
pub use formattable::FormattableResolver;
pub use list::ListExpansion;

/// A step of the pipeline, mapping a parameter list to a new one.
///
/// A transformer may add, remove, rename, reclassify or reformat
/// parameters.
pub trait Transformer: Send + Sync {
    /// Transform the current parameter list.
    ///
    /// # Errors
    ///
    /// Returns an error when the invocation is inconsistent with the
    /// transformer's configuration.
    fn transform(
        &self,
        parameters: Vec<Parameter>,
        context: &TransformContext<'_>,
    ) -> Result<Vec<Parameter>>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A transformation of one parameter, referenced by a
/// [`ParamTag::Transform`](crate::ParamTag::Transform) tag.
///
/// Implemented for any `Fn(Parameter) -> Parameter`.
pub trait ParameterTransformer: Send + Sync {
    /// Transform a single parameter.
    fn transform(&self, parameter: Parameter) -> Parameter;
}

impl<F> ParameterTransformer for F
where
    F: Fn(Parameter) -> Parameter + Send + Sync,
{
    fn transform(&self, parameter: Parameter) -> Parameter {
        self(parameter)
    }
}

/// What a transformer knows about the call being resolved.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    invocation: &'a InvocationDescriptor,
    registry: &'a TransformerRegistry,
}

impl<'a> TransformContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(invocation: &'a InvocationDescriptor, registry: &'a TransformerRegistry) -> Self {
        Self {
            invocation,
            registry,
        }
    }

    /// The invocation being resolved.
    #[must_use]
    pub const fn invocation(&self) -> &'a InvocationDescriptor {
        self.invocation
    }

    /// Named transformers available to tags.
    #[must_use]
    pub const fn registry(&self) -> &'a TransformerRegistry {
        self.registry
    }
}

/// Lookup table of named transformers referenced by tags.
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    list: HashMap<String, Arc<dyn Transformer>>,
    parameter: HashMap<String, Arc<dyn ParameterTransformer>>,
}

impl TransformerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a list transformer for [`ListTag::Transform`](crate::ListTag::Transform).
    pub fn register_list(&mut self, name: impl Into<String>, transformer: impl Transformer + 'static) {
        self.list.insert(name.into(), Arc::new(transformer));
    }

    /// Registers a parameter transformer for [`ParamTag::Transform`](crate::ParamTag::Transform).
    pub fn register_parameter(
        &mut self,
        name: impl Into<String>,
        transformer: impl ParameterTransformer + 'static,
    ) {
        self.parameter.insert(name.into(), Arc::new(transformer));
    }

    /// Moves every entry of `other` into this registry, replacing entries
    /// with the same name.
    pub fn merge(&mut self, other: Self) {
        self.list.extend(other.list);
        self.parameter.extend(other.parameter);
    }

    /// Looks up a list transformer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTransformer`] if nothing is registered under `name`.
    pub fn list(&self, name: &str) -> Result<&dyn Transformer> {
        self.list
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::UnknownTransformer(name.to_string()))
    }

    /// Looks up a parameter transformer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTransformer`] if nothing is registered under `name`.
    pub fn parameter(&self, name: &str) -> Result<&dyn ParameterTransformer> {
        self.parameter
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::UnknownTransformer(name.to_string()))
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list: Vec<_> = self.list.keys().collect();
        list.sort();
        let mut parameter: Vec<_> = self.parameter.keys().collect();
        parameter.sort();
        f.debug_struct("TransformerRegistry")
            .field("list", &list)
            .field("parameter", &parameter)
            .finish()
    }
}

/// Ordered chain of transformers plus the registry their tags resolve against.
#[derive(Clone)]
pub struct Pipeline {
    transformers: Vec<Arc<dyn Transformer>>,
    registry: TransformerRegistry,
}

impl Pipeline {
    /// A pipeline with no transformers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            transformers: Vec::new(),
            registry: TransformerRegistry::new(),
        }
    }

    /// The canonical five-step pipeline.
    #[must_use]
    pub fn canonical() -> Self {
        Self::empty()
            .with(ListExpansion)
            .with(DefaultResolver)
            .with(FormattableResolver)
            .with(ListTagTransformer)
            .with(ParamTagTransformer)
    }

    /// Appends a transformer.
    #[must_use]
    pub fn with(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Arc::new(transformer));
        self
    }

    /// Replaces the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: TransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut TransformerRegistry {
        &mut self.registry
    }

    /// The registry.
    #[must_use]
    pub const fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    /// Number of transformers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Returns `true` if the pipeline has no transformer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Runs every transformer in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a transformer.
    pub fn apply(
        &self,
        parameters: Vec<Parameter>,
        invocation: &InvocationDescriptor,
    ) -> Result<Vec<Parameter>> {
        let context = TransformContext::new(invocation, &self.registry);
        self.transformers
            .iter()
            .try_fold(parameters, |current, transformer| {
                let next = transformer.transform(current, &context)?;
                tracing::trace!(
                    transformer = transformer.name(),
                    parameters = next.len(),
                    "transformer applied"
                );
                Ok(next)
            })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.transformers.iter().map(|t| t.name()).collect();
        f.debug_struct("Pipeline")
            .field("transformers", &names)
            .field("registry", &self.registry)
            .finish()
    }
}
