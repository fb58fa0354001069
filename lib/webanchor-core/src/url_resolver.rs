//! Route substitution and query string synthesis.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

use crate::{Error, ResolvedParameters, Result};

/// Regular expression for matching route placeholders in the format `{name}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^{}]+)}").expect("a valid regex"));

/// Everything except the RFC 3986 unreserved characters `A-Z a-z 0-9 - . _ ~`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a route token or query value.
///
/// ```
/// use webanchor_core::encode_component;
///
/// assert_eq!(encode_component("a b&c/d"), "a%20b%26c%2Fd");
/// assert_eq!(encode_component("v1.2_rc-3~"), "v1.2_rc-3~");
/// ```
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Names of the `{name}` placeholders of a template, in order.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.name("name"))
        .map(|name| name.as_str())
}

/// Resolve the final path and query string of a request.
///
/// Every `{name}` token of `template` is replaced by the encoded text of the
/// route parameter with that name, in a single pass. The base path is
/// prepended as is. Query parameters are appended in their current order,
/// after `?`, or after `&` when the URL already has a query.
///
/// # Errors
///
/// Returns [`Error::MissingRouteParameter`] for the first placeholder with no
/// matching route parameter.
pub fn resolve_url(
    template: &str,
    base_path: Option<&str>,
    parameters: &ResolvedParameters,
) -> Result<String> {
    if let Some(missing) =
        placeholders(template).find(|name| parameters.route_parameter(name).is_none())
    {
        return Err(Error::missing_route_parameter(missing, template));
    }

    let path = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        caps.name("name")
            .and_then(|name| parameters.route_parameter(name.as_str()))
            .map(|parameter| encode_component(&parameter.text()))
            .unwrap_or_default()
    });

    let mut url = String::from(base_path.unwrap_or_default());
    url.push_str(&path);
    append_query(&mut url, parameters);

    Ok(url)
}

fn append_query(url: &mut String, parameters: &ResolvedParameters) {
    if parameters.query.is_empty() {
        return;
    }

    url.push(if url.contains('?') { '&' } else { '?' });
    let pairs: Vec<String> = parameters
        .query
        .iter()
        .map(|parameter| format!("{}={}", parameter.name, encode_component(&parameter.text())))
        .collect();
    url.push_str(&pairs.join("&"));
}
