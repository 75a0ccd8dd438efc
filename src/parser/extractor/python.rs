//! Python-specific symbol extraction.

use tree_sitter::Node;
use tracing::trace;

use super::helpers::{classify_call, first_named_child, node_str, node_text, CallArgs, CallShape};
use super::FileSymbols;
use crate::config::NamingConfig;
use crate::model::{ClassSymbol, EndpointSymbol, RequestCallSymbol};
use crate::parser::template::{resolve, StringTemplate};

/// Route path used when a registrar is called without one.
const DEFAULT_ROUTE_PATH: &str = "/";

pub fn extract_python_node(
    node: &Node,
    source: &[u8],
    names: &NamingConfig,
    symbols: &mut FileSymbols,
) {
    match node.kind() {
        "class_definition" => {
            if let Some(class) = extract_class(node, source) {
                symbols.classes.insert(class.name.clone(), class);
            }
        }
        "decorated_definition" => {
            let is_function = node
                .child_by_field_name("definition")
                .is_some_and(|def| def.kind() == "function_definition");
            if is_function {
                extract_routes(node, source, names, &mut symbols.endpoints);
            }
        }
        "call" => {
            if classify_call(node, source, names) == CallShape::RequestPrimitive {
                if let Some(request) = extract_request_call(node, source, names) {
                    symbols.requests.push(request);
                }
            }
        }
        _ => {}
    }
}

/// Name, bases, and top-level annotated fields of a class.
fn extract_class(node: &Node, source: &[u8]) -> Option<ClassSymbol> {
    let name = node.child_by_field_name("name")?;
    let mut class = ClassSymbol::new(node_text(&name, source));

    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        for base in superclasses.named_children(&mut cursor) {
            match base.kind() {
                "identifier" => {
                    class.bases.insert(node_text(&base, source));
                }
                // module.Base → Base
                "attribute" => {
                    if let Some(attr) = base.child_by_field_name("attribute") {
                        class.bases.insert(node_text(&attr, source));
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for statement in body.named_children(&mut cursor) {
            if let Some(field) = annotated_field_name(&statement, source) {
                class.fields.insert(field);
            }
        }
    }

    Some(class)
}

/// `name: T` or `name: T = value` directly in a class body.
fn annotated_field_name(statement: &Node, source: &[u8]) -> Option<String> {
    if statement.kind() != "expression_statement" {
        return None;
    }
    let assignment = first_named_child(*statement)?;
    if assignment.kind() != "assignment" {
        return None;
    }
    assignment.child_by_field_name("type")?;
    let target = assignment.child_by_field_name("left")?;
    if target.kind() != "identifier" {
        return None;
    }
    Some(node_text(&target, source))
}

/// Route registrations among a function's decorators.
fn extract_routes(
    decorated: &Node,
    source: &[u8],
    names: &NamingConfig,
    endpoints: &mut Vec<EndpointSymbol>,
) {
    let mut cursor = decorated.walk();
    for decorator in decorated.named_children(&mut cursor) {
        if decorator.kind() != "decorator" {
            continue;
        }
        let Some(call) = first_named_child(decorator) else {
            continue;
        };
        if call.kind() != "call" {
            continue;
        }
        if let CallShape::RouteRegistration { method } = classify_call(&call, source, names) {
            let args = CallArgs::from_call(call, source);
            let path = args
                .positional
                .first()
                .copied()
                .or_else(|| args.keyword("path"))
                .map(|arg| resolve(arg, source).render())
                .unwrap_or_else(|| DEFAULT_ROUTE_PATH.to_string());
            endpoints.push(EndpointSymbol::new(method, path));
        }
    }
}

/// Method and URL of a `_request(...)` call.
///
/// Calls missing either argument, or whose URL cannot be reconstructed,
/// are not recorded.
fn extract_request_call(
    call: &Node,
    source: &[u8],
    names: &NamingConfig,
) -> Option<RequestCallSymbol> {
    let args = CallArgs::from_call(*call, source);
    let method_arg = args.keyword_or_positional("method", 0)?;
    let url_arg = args.keyword_or_positional("url", 1)?;

    // A dynamic method renders empty and matches only catch-all routes.
    let method = resolve(method_arg, source).render().to_uppercase();
    let url = resolve_url(&url_arg, source, names);
    if url.is_unresolved() {
        trace!(
            line = call.start_position().row + 1,
            url = node_str(&url_arg, source),
            "request URL could not be resolved"
        );
        return None;
    }

    Some(RequestCallSymbol::new(method, url.render()))
}

/// Resolve a URL argument, looking through one URL-helper call.
fn resolve_url(url_arg: &Node, source: &[u8], names: &NamingConfig) -> StringTemplate {
    if url_arg.kind() == "call" && classify_call(url_arg, source, names) == CallShape::UrlHelper {
        let helper_args = CallArgs::from_call(*url_arg, source);
        if let Some(first) = helper_args.positional.first() {
            return resolve(*first, source);
        }
    }
    resolve(*url_arg, source)
}
