//! Initial classification of call arguments.

use std::sync::Arc;

use crate::tag::ParamTags;
use crate::{InvocationDescriptor, Parameter, ParameterRole};

/// Assigns each non-null argument its initial role.
///
/// Precedence, highest first:
/// 1. a [`ParamTag::Content`](crate::ParamTag::Content) tag makes it content,
/// 2. a name matching a `{name}` placeholder of the URL template makes it a
///    route parameter,
/// 3. anything else is a query parameter.
///
/// Null arguments are dropped: they produce no route token, no query pair
/// and no body.
#[must_use]
pub fn classify(invocation: &InvocationDescriptor) -> Vec<Parameter> {
    let template = invocation.url_template();

    invocation
        .arguments()
        .filter(|(_, value)| !value.is_null())
        .map(|(decl, value)| {
            let role = if decl.tags().is_content() {
                ParameterRole::Content
            } else if template.contains(&placeholder(decl.name())) {
                ParameterRole::Route
            } else {
                ParameterRole::Query
            };

            Parameter {
                name: decl.name().to_string(),
                declared_type: decl.declared_type(),
                value: value.clone(),
                formatted: None,
                role,
                tags: Arc::clone(decl.tags()),
            }
        })
        .collect()
}

fn placeholder(name: &str) -> String {
    ["{", name, "}"].concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiGroup, Endpoint, ParamDecl, Value, args};

    fn roles(endpoint: Endpoint, args: Vec<Value>) -> Vec<(String, ParameterRole)> {
        let invocation =
            InvocationDescriptor::new(&Arc::new(ApiGroup::new()), &Arc::new(endpoint), args)
                .expect("invocation");
        classify(&invocation)
            .into_iter()
            .map(|p| (p.name, p.role))
            .collect()
    }

    #[test]
    fn placeholder_names_are_routes() {
        let endpoint = Endpoint::get("/users/{id}/posts")
            .param(ParamDecl::new("id"))
            .param(ParamDecl::new("page"));
        assert_eq!(
            roles(endpoint, args![1, 2]),
            [
                ("id".to_string(), ParameterRole::Route),
                ("page".to_string(), ParameterRole::Query),
            ]
        );
    }

    #[test]
    fn content_tag_wins_over_placeholder() {
        let endpoint = Endpoint::put("/items/{item}")
            .param(ParamDecl::new("item").content())
            .param(ParamDecl::new("dry_run"));
        assert_eq!(
            roles(endpoint, args!["x", true]),
            [
                ("item".to_string(), ParameterRole::Content),
                ("dry_run".to_string(), ParameterRole::Query),
            ]
        );
    }

    #[test]
    fn null_arguments_are_dropped() {
        let endpoint = Endpoint::get("/search/{scope}")
            .param(ParamDecl::new("scope"))
            .param(ParamDecl::new("q"))
            .param(ParamDecl::new("page"));
        assert_eq!(
            roles(endpoint, args![None::<&str>, "rust", None::<u32>]),
            [("q".to_string(), ParameterRole::Query)]
        );
    }

    #[test]
    fn placeholder_match_is_exact() {
        let endpoint = Endpoint::get("/users/{user_id}").param(ParamDecl::new("id"));
        assert_eq!(
            roles(endpoint, args![1]),
            [("id".to_string(), ParameterRole::Query)]
        );
    }

    #[test]
    fn declaration_is_carried_over() {
        let endpoint = Endpoint::get("/").param(
            ParamDecl::typed::<u8>("level").tag(crate::ParamTag::rename("lvl")),
        );
        let invocation =
            InvocationDescriptor::new(&Arc::new(ApiGroup::new()), &Arc::new(endpoint), args![3_u8])
                .expect("invocation");
        let parameters = classify(&invocation);
        let parameter = parameters.first().expect("one parameter");
        assert_eq!(parameter.declared_type, Some("u8"));
        assert_eq!(parameter.tags.len(), 1);
        assert_eq!(parameter.value, Value::UInt(3));
    }
}
