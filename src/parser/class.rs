//! Class region and base-class extraction.
//!
//! A class is exposed by wrapping part of its body in marker comments:
//!
//! ```text
//! //= SCRIPTABLE BASES Component
//! class Sprite : public Component {
//!   public:
//!     //= BEGIN SCRIPTABLE
//!     Sprite();
//!     void show();
//!     //= END SCRIPTABLE
//! };
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::location::offset_to_location;
use crate::diagnostics::Diagnostic;

lazy_static! {
    /// `class Name ...` at the start of a line, not a forward declaration.
    static ref CLASS_RE: Regex = Regex::new(
        r"(?m)^[ \t]*class[ \t]+(?:\[\[[^\]\n]*\]\][ \t]*)*([A-Za-z_]\w*)[^;\n]*$"
    )
    .unwrap();
    static ref BEGIN_RE: Regex = Regex::new(r"//=[ \t]*BEGIN[ \t]*SCRIPTABLE\b").unwrap();
    static ref END_RE: Regex = Regex::new(r"//=[ \t]*END[ \t]*SCRIPTABLE\b").unwrap();
    static ref BASES_RE: Regex = Regex::new(r"//=[ \t]*SCRIPTABLE[ \t]*BASES\b(.*)").unwrap();
}

/// A class declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    /// Byte offset of the start of the declaration line.
    pub offset: usize,
}

/// The marked region of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRegion {
    pub name: String,
    /// Text strictly between the BEGIN and END markers.
    pub body: String,
    /// Byte offset of `body` within the file.
    pub body_offset: usize,
}

/// Every class declaration line in the file, in order.
pub fn class_declarations(text: &str) -> Vec<ClassDecl> {
    CLASS_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(ClassDecl {
                name: name.as_str().to_string(),
                offset: whole.start(),
            })
        })
        .collect()
}

/// The nearest class declaration starting before `offset`.
pub fn owning_class(decls: &[ClassDecl], offset: usize) -> Option<&ClassDecl> {
    decls.iter().rev().find(|decl| decl.offset < offset)
}

/// Find the first marked region and the class it belongs to.
///
/// Only one region per file is recognized; anything malformed is reported
/// and skipped.
pub fn extract_class_region(text: &str) -> (Option<ClassRegion>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let begins: Vec<_> = BEGIN_RE.find_iter(text).collect();
    let ends: Vec<_> = END_RE.find_iter(text).collect();

    let Some(begin) = begins.first() else {
        for end in &ends {
            diagnostics.push(
                Diagnostic::warning(
                    "scriptgen::orphan-region",
                    "END SCRIPTABLE without a preceding BEGIN SCRIPTABLE",
                )
                .at(offset_to_location(text, end.start())),
            );
        }
        return (None, diagnostics);
    };

    for end in ends.iter().filter(|end| end.start() < begin.start()) {
        diagnostics.push(
            Diagnostic::warning(
                "scriptgen::orphan-region",
                "END SCRIPTABLE without a preceding BEGIN SCRIPTABLE",
            )
            .at(offset_to_location(text, end.start())),
        );
    }

    let Some(end) = ends.iter().find(|end| end.start() >= begin.end()) else {
        diagnostics.push(
            Diagnostic::warning(
                "scriptgen::unterminated-region",
                "BEGIN SCRIPTABLE is never closed; the class is skipped",
            )
            .at(offset_to_location(text, begin.start()))
            .with_help("Add //= END SCRIPTABLE after the last exposed member"),
        );
        return (None, diagnostics);
    };

    if let Some(extra) = begins.get(1) {
        diagnostics.push(
            Diagnostic::warning(
                "scriptgen::extra-region",
                "only the first BEGIN SCRIPTABLE region in a file is used",
            )
            .at(offset_to_location(text, extra.start()))
            .with_help("Move additional scriptable classes into their own headers"),
        );
    }

    let decls = class_declarations(text);
    let Some(owner) = owning_class(&decls, begin.start()) else {
        diagnostics.push(
            Diagnostic::warning(
                "scriptgen::orphan-region",
                "BEGIN SCRIPTABLE does not follow a class declaration",
            )
            .at(offset_to_location(text, begin.start())),
        );
        return (None, diagnostics);
    };

    let region = ClassRegion {
        name: owner.name.clone(),
        body: text[begin.end()..end.start()].to_string(),
        body_offset: begin.end(),
    };
    (Some(region), diagnostics)
}

/// Direct bases from the first `SCRIPTABLE BASES` line; empty when absent.
pub fn extract_bases(text: &str) -> Vec<String> {
    BASES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split_whitespace()
                .map(|base| base.trim_matches(',').trim())
                .filter(|base| !base.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRITE: &str = r#"
//= SCRIPTABLE
//= SCRIPTABLE BASES Component Drawable
namespace Game {
  class Helper;

  class Sprite : public Component {
    public:
      //= BEGIN SCRIPTABLE
      Sprite();
      void show();
      //= END SCRIPTABLE
  };
}
"#;

    #[test]
    fn test_class_declarations_skip_forward_declarations() {
        let decls = class_declarations(SPRITE);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Sprite");
    }

    #[test]
    fn test_class_declarations_skip_enum_class() {
        let decls = class_declarations("enum class Color { RED };\nclass Palette {\n};");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Palette");
    }

    #[test]
    fn test_class_declaration_with_attribute() {
        let decls = class_declarations("  class [[scriptable]] KeyEvent : public Event {");
        assert_eq!(decls[0].name, "KeyEvent");
    }

    #[test]
    fn test_extract_region() {
        let (region, diagnostics) = extract_class_region(SPRITE);
        let region = region.unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(region.name, "Sprite");
        assert!(region.body.contains("Sprite();"));
        assert!(region.body.contains("void show();"));
        assert!(!region.body.contains("END SCRIPTABLE"));
        assert_eq!(&SPRITE[region.body_offset..region.body_offset + region.body.len()], region.body);
    }

    #[test]
    fn test_no_region_is_not_an_error() {
        let (region, diagnostics) = extract_class_region("class Foo {\n  void bar();\n};");
        assert!(region.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_region_is_reported() {
        let text = "class Foo {\n  //= BEGIN SCRIPTABLE\n  void bar();\n};";
        let (region, diagnostics) = extract_class_region(text);

        assert!(region.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "scriptgen::unterminated-region");
        assert_eq!(diagnostics[0].location.unwrap().line, 2);
    }

    #[test]
    fn test_region_without_class_is_reported() {
        let text = "//= BEGIN SCRIPTABLE\nvoid bar();\n//= END SCRIPTABLE\n";
        let (region, diagnostics) = extract_class_region(text);

        assert!(region.is_none());
        assert_eq!(diagnostics[0].code, "scriptgen::orphan-region");
    }

    #[test]
    fn test_stray_end_is_reported() {
        let text = "class Foo {\n  //= END SCRIPTABLE\n};";
        let (region, diagnostics) = extract_class_region(text);

        assert!(region.is_none());
        assert_eq!(diagnostics[0].code, "scriptgen::orphan-region");
    }

    #[test]
    fn test_second_region_is_reported() {
        let text = "class A {\n//= BEGIN SCRIPTABLE\nA();\n//= END SCRIPTABLE\n};\n\
                    class B {\n//= BEGIN SCRIPTABLE\nB();\n//= END SCRIPTABLE\n};\n";
        let (region, diagnostics) = extract_class_region(text);

        assert_eq!(region.unwrap().name, "A");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "scriptgen::extra-region");
    }

    #[test]
    fn test_region_belongs_to_nearest_class() {
        let text = "class Helper {\n};\n\nclass Real {\n//= BEGIN SCRIPTABLE\nReal();\n//= END SCRIPTABLE\n};";
        let (region, _) = extract_class_region(text);
        assert_eq!(region.unwrap().name, "Real");
    }

    #[test]
    fn test_extract_bases() {
        assert_eq!(extract_bases(SPRITE), vec!["Component", "Drawable"]);
    }

    #[test]
    fn test_extract_bases_with_commas() {
        let text = "//= SCRIPTABLE BASES Subject, Observer\r\n";
        assert_eq!(extract_bases(text), vec!["Subject", "Observer"]);
    }

    #[test]
    fn test_no_bases() {
        assert!(extract_bases("//= SCRIPTABLE\nclass Foo {};").is_empty());
    }
}
