//! Scriptable enum extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::class::{class_declarations, owning_class};
use super::location::offset_to_location;
use super::text::{before_assignment, skip_trivia, split_top_level, strip_comments};
use crate::diagnostics::Diagnostic;
use crate::registry::{ScriptableEnum, SourceUnit};

lazy_static! {
    static ref ENUM_MARKER_RE: Regex = Regex::new(r"//=[ \t]*SCRIPTABLE[ \t]*ENUM\b").unwrap();
    /// `enum [class|struct] Name [: underlying] { values };`, anchored.
    static ref ENUM_DECL_RE: Regex = Regex::new(
        r"^enum\b(?:\s+(class|struct)\b)?\s*(?:\[\[[^\]]*\]\]\s*)*([A-Za-z_]\w*)\s*(?::\s*[^{;]+)?\{([^}]*)\}\s*;"
    )
    .unwrap();
}

/// Extract every enum preceded by a `SCRIPTABLE ENUM` marker.
///
/// Comments between the marker and the declaration are allowed. An enum
/// whose marker comes after a class declaration is qualified with the
/// nearest such class (`Class::Enum`).
pub fn extract_enums(
    unit: &SourceUnit,
    namespace: Option<&str>,
) -> (Vec<ScriptableEnum>, Vec<Diagnostic>) {
    let text = unit.text.as_str();
    let mut enums = Vec::new();
    let mut diagnostics = Vec::new();
    let decls = class_declarations(text);

    for marker in ENUM_MARKER_RE.find_iter(text) {
        let start = skip_trivia(text, marker.end());
        let Some(caps) = ENUM_DECL_RE.captures(&text[start..]) else {
            diagnostics.push(
                Diagnostic::warning(
                    "scriptgen::orphan-enum-marker",
                    "SCRIPTABLE ENUM is not followed by an enum declaration",
                )
                .at(offset_to_location(text, marker.start()))
                .with_help("The marker must directly precede `enum Name { ... };`"),
            );
            continue;
        };

        let bare = &caps[2];
        let name = match owning_class(&decls, marker.start()) {
            Some(owner) => format!("{}::{}", owner.name, bare),
            None => bare.to_string(),
        };

        enums.push(ScriptableEnum {
            name,
            namespace: namespace.map(str::to_string),
            include: unit.include.clone(),
            path: unit.path.clone(),
            scoped: caps.get(1).is_some(),
            values: parse_values(&caps[3]),
        });
    }

    (enums, diagnostics)
}

/// Enumerator names in order; initializers and comments are dropped.
fn parse_values(body: &str) -> Vec<String> {
    let code = strip_comments(body);
    split_top_level(&code, ',')
        .into_iter()
        .map(|value| before_assignment(value).trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
