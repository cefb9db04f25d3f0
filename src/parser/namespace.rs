//! Namespace chain resolution.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NAMESPACE_RE: Regex =
        Regex::new(r"\bnamespace\s+([A-Za-z_]\w*(?:::[A-Za-z_]\w*)*)\s*\{").unwrap();
}

/// Join every named `namespace X {` opening in the file, in order.
///
/// Returns `None` for the global namespace. Anonymous namespaces and
/// `using namespace` directives are not openings and are ignored.
pub fn extract_namespace(text: &str) -> Option<String> {
    let names: Vec<&str> = NAMESPACE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join("::"))
    }
}
