//! Best-effort reconstruction of string-valued expressions.
//!
//! Plain literals come back verbatim, f-strings come back with every
//! interpolation replaced by a wildcard, and anything else is unresolved.

use std::fmt;

use tree_sitter::Node;

use super::extractor::helpers::{first_named_child, node_str};

/// Rendering of a wildcard segment.
pub const WILDCARD: &str = "{}";

/// One piece of a reconstructed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

/// A string as a sequence of literal text and wildcards.
///
/// The empty template means "unresolved".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTemplate {
    segments: Vec<Segment>,
}

impl StringTemplate {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn literal(text: &str) -> Self {
        let mut template = Self::default();
        template.push_literal(text);
        template
    }

    pub fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(prev)) => prev.push_str(text),
            _ => self.segments.push(Segment::Literal(text.to_string())),
        }
    }

    pub fn push_wildcard(&mut self) {
        self.segments.push(Segment::Wildcard);
    }

    pub fn append(&mut self, other: StringTemplate) {
        for segment in other.segments {
            match segment {
                Segment::Literal(text) => self.push_literal(&text),
                Segment::Wildcard => self.push_wildcard(),
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_unresolved(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_wildcards(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Wildcard => f.write_str(WILDCARD)?,
            }
        }
        Ok(())
    }
}

/// Resolve an expression node to a string template. Never fails.
pub fn resolve(node: Node, source: &[u8]) -> StringTemplate {
    match node.kind() {
        "string" => resolve_string(node, source),
        "concatenated_string" => {
            let mut template = StringTemplate::default();
            let mut cursor = node.walk();
            for part in node.named_children(&mut cursor) {
                if part.kind() == "string" {
                    template.append(resolve_string(part, source));
                }
            }
            template
        }
        "integer" | "float" | "true" | "false" | "none" => {
            StringTemplate::literal(node_str(&node, source))
        }
        "parenthesized_expression" => match first_named_child(node) {
            Some(inner) => resolve(inner, source),
            None => StringTemplate::unresolved(),
        },
        _ => StringTemplate::unresolved(),
    }
}

/// String prefix flags (`f`, `r`, `b`, ...).
#[derive(Debug, Clone, Copy, Default)]
struct Prefix {
    formatted: bool,
    raw: bool,
}

impl Prefix {
    fn parse(string_start: &str) -> Self {
        let letters = string_start.trim_end_matches(['"', '\'']);
        Self {
            formatted: letters.contains(['f', 'F']),
            raw: letters.contains(['r', 'R']),
        }
    }
}

fn resolve_string(node: Node, source: &[u8]) -> StringTemplate {
    let mut template = StringTemplate::default();
    let mut prefix = Prefix::default();

    let mut cursor = node.walk();
    for part in node.children(&mut cursor) {
        match part.kind() {
            "string_start" => prefix = Prefix::parse(node_str(&part, source)),
            "string_end" => {}
            "interpolation" if prefix.formatted => template.push_wildcard(),
            _ => {
                let raw = node_str(&part, source);
                template.push_literal(&decode_literal(raw, prefix));
            }
        }
    }

    template
}

/// Decode escape sequences (unless raw) and doubled braces (f-strings only).
fn decode_literal(raw: &str, prefix: Prefix) -> String {
    let text = if prefix.raw {
        raw.to_string()
    } else {
        unescape(raw)
    };
    if prefix.formatted {
        text.replace("{{", "{").replace("}}", "}")
    } else {
        text
    }
}

/// Decode Python escape sequences.
///
/// `\N{NAME}` needs the Unicode name table and is kept verbatim, as are
/// malformed escapes.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0c}'),
            Some('v') => out.push('\u{0b}'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // line continuation
            Some('\n') => {}
            Some(digit @ '0'..='7') => {
                let mut code = digit.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                push_code_point(&mut out, code, &format!("\\{digit}"));
            }
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&digits, 16) {
                    Ok(code) if digits.len() == width => {
                        push_code_point(&mut out, code, &format!("\\{kind}{digits}"))
                    }
                    _ => {
                        out.push('\\');
                        out.push(kind);
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(out: &mut String, code: u32, original: &str) {
    match char::from_u32(code) {
        Some(ch) => out.push(ch),
        None => out.push_str(original),
    }
}
