//
//  normalize.rs
//  Drift
//
//  Created by hak (tharun)
//

use crate::parser::template::WILDCARD;

/// Replace every `{...}` placeholder with `{}`.
///
/// `/users/{id}` and `/users/{user_id}` normalize identically. An unclosed
/// `{` is kept as literal text.
pub fn normalize_path(path: &str) -> String {
    replace_placeholders(path, WILDCARD)
}

/// Remove every `{...}` placeholder entirely.
pub fn strip_placeholders(path: &str) -> String {
    replace_placeholders(path, "")
}

pub fn trim_trailing_slashes(path: &str) -> &str {
    path.trim_end_matches('/')
}

fn replace_placeholders(path: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                result.push_str(replacement);
                rest = &after[close + 1..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
