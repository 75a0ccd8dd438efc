//! Presence of reference endpoints among a client file's request calls.

use super::normalize::{normalize_path, strip_placeholders, trim_trailing_slashes};
use crate::model::{EndpointSymbol, RequestCallSymbol, RouteMethod};
use crate::report::Issue;

/// Which rule found the client call for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Same verb, normalized URL ends with the normalized path.
    Suffix,
    /// Literal path fragment found in the client source text.
    Heuristic,
    /// Catch-all route served by a dynamic-method call.
    CatchAll,
}

/// Matches reference endpoints against one client file.
pub struct EndpointMatcher<'a> {
    /// Normalized URL per request call, computed once.
    calls: Vec<(&'a str, String)>,
    client_source: &'a str,
    /// Stem of the resource file, used for root routes.
    resource: &'a str,
    min_heuristic_len: usize,
}

impl<'a> EndpointMatcher<'a> {
    pub fn new(
        requests: &'a [RequestCallSymbol],
        client_source: &'a str,
        resource: &'a str,
        min_heuristic_len: usize,
    ) -> Self {
        let calls = requests
            .iter()
            .map(|r| (r.method.as_str(), normalize_path(&r.url_template)))
            .collect();
        Self {
            calls,
            client_source,
            resource,
            min_heuristic_len,
        }
    }

    /// First strategy that finds `endpoint`, if any.
    pub fn find(&self, endpoint: &EndpointSymbol) -> Option<MatchStrategy> {
        let path = normalize_path(&endpoint.path_template);

        if let RouteMethod::Verb(verb) = &endpoint.method {
            if self.any_call_matches(verb, &path) {
                return Some(MatchStrategy::Suffix);
            }
        }
        if self.heuristic_match(&endpoint.path_template) {
            return Some(MatchStrategy::Heuristic);
        }
        if endpoint.method == RouteMethod::CatchAll && self.any_call_matches("", &path) {
            return Some(MatchStrategy::CatchAll);
        }
        None
    }

    fn any_call_matches(&self, method: &str, normalized_path: &str) -> bool {
        self.calls
            .iter()
            .any(|(m, url)| *m == method && self.url_matches(url, normalized_path))
    }

    /// Suffix rule; root paths must end in `/<resource>` or `/<resource>/`.
    fn url_matches(&self, normalized_url: &str, normalized_path: &str) -> bool {
        if normalized_path.is_empty() || normalized_path == "/" {
            let bare = format!("/{}", self.resource);
            return normalized_url.ends_with(&bare) || normalized_url.ends_with(&format!("{bare}/"));
        }
        normalized_url.ends_with(normalized_path)
    }

    /// Substring fallback for URLs built beyond the resolver's reach.
    fn heuristic_match(&self, raw_path: &str) -> bool {
        heuristic_fragment(raw_path, self.min_heuristic_len)
            .is_some_and(|fragment| self.client_source.contains(&fragment))
    }
}

/// Literal part of a path worth searching for, or `None` if too short.
pub fn heuristic_fragment(raw_path: &str, min_len: usize) -> Option<String> {
    let relative = raw_path.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }
    let stripped = strip_placeholders(relative);
    let fragment = trim_trailing_slashes(&stripped);
    if fragment.chars().count() < min_len {
        return None;
    }
    Some(fragment.to_string())
}

/// One `MISSING_ENDPOINT` issue per endpoint no strategy finds.
pub fn missing_endpoints(
    endpoints: &[EndpointSymbol],
    matcher: &EndpointMatcher<'_>,
    file: &str,
) -> Vec<Issue> {
    endpoints
        .iter()
        .filter(|endpoint| matcher.find(endpoint).is_none())
        .map(|endpoint| Issue::missing_endpoint(endpoint, file))
        .collect()
}
