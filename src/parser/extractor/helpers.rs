//
//  helpers.rs
//  Drift
//
//  Created by hak (tharun)
//

use tree_sitter::Node;

use crate::config::NamingConfig;
use crate::model::RouteMethod;

/// Get the text of a node.
pub fn node_str<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Get the full text of a node as an owned string.
pub fn node_text(node: &Node, source: &[u8]) -> String {
    node_str(node, source).to_string()
}

/// First named child that is not a comment.
pub fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    found
}

/// Call arguments split the way Python's own AST splits them.
pub struct CallArgs<'tree> {
    /// Positional arguments, including `*splat` entries.
    pub positional: Vec<Node<'tree>>,
    /// `name=value` arguments; `**splat` entries are dropped.
    pub keywords: Vec<(String, Node<'tree>)>,
}

impl<'tree> CallArgs<'tree> {
    pub fn from_call(call: Node<'tree>, source: &[u8]) -> Self {
        let mut args = Self {
            positional: Vec::new(),
            keywords: Vec::new(),
        };

        let Some(list) = call.child_by_field_name("arguments") else {
            return args;
        };
        if list.kind() != "argument_list" {
            // f(x for x in y)
            args.positional.push(list);
            return args;
        }

        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            match child.kind() {
                "comment" | "dictionary_splat" => {}
                "keyword_argument" => {
                    let name = child.child_by_field_name("name");
                    let value = child.child_by_field_name("value");
                    if let (Some(name), Some(value)) = (name, value) {
                        args.keywords.push((node_text(&name, source), value));
                    }
                }
                _ => args.positional.push(child),
            }
        }
        args
    }

    pub fn keyword(&self, name: &str) -> Option<Node<'tree>> {
        self.keywords
            .iter()
            .find(|(kw, _)| kw == name)
            .map(|(_, value)| *value)
    }

    /// Keyword argument if given, else the positional one at `index`.
    pub fn keyword_or_positional(&self, name: &str, index: usize) -> Option<Node<'tree>> {
        self.keyword(name)
            .or_else(|| self.positional.get(index).copied())
    }
}

/// Callee patterns the extractor understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// `<router_receiver>.<verb>(...)`
    RouteRegistration { method: RouteMethod },
    /// `<anything>.<request_method>(...)`
    RequestPrimitive,
    /// `<anything>.<url_helper>(...)`
    UrlHelper,
    Unrecognized,
}

/// Classify a `call` node by its callee.
pub fn classify_call(call: &Node, source: &[u8], names: &NamingConfig) -> CallShape {
    let Some(function) = call.child_by_field_name("function") else {
        return CallShape::Unrecognized;
    };
    if function.kind() != "attribute" {
        return CallShape::Unrecognized;
    }
    let (Some(object), Some(attribute)) = (
        function.child_by_field_name("object"),
        function.child_by_field_name("attribute"),
    ) else {
        return CallShape::Unrecognized;
    };

    let attr = node_str(&attribute, source);
    if attr == names.request_method {
        return CallShape::RequestPrimitive;
    }
    if attr == names.url_helper {
        return CallShape::UrlHelper;
    }
    if object.kind() == "identifier" && node_str(&object, source) == names.router_receiver {
        let method = if names.is_catch_all(attr) {
            RouteMethod::CatchAll
        } else {
            RouteMethod::Verb(attr.to_uppercase())
        };
        return CallShape::RouteRegistration { method };
    }

    CallShape::Unrecognized
}
