//! Recognition of scriptable declarations in header text.
//!
//! This is not a C++ parser. Headers opt in through `//=` marker comments and
//! the recognizers only look for the handful of shapes that convention
//! produces:
//!
//! - `namespace X {` openings, joined into a namespace chain
//! - a class whose body contains `//= BEGIN SCRIPTABLE` ... `//= END SCRIPTABLE`
//! - a `//= SCRIPTABLE BASES A B` line naming direct bases
//! - enums directly preceded by `//= SCRIPTABLE ENUM`
//! - one-line method and constructor signatures inside a marked region
//!
//! Everything downstream works on [`Recognized`] values, so the pattern
//! matching here can be replaced without touching code generation.
//!
//! # Usage
//!
//! ```ignore
//! use scriptgen::parser::{PatternRecognizer, Recognizer};
//!
//! let recognized = PatternRecognizer.recognize(&unit);
//! if let Some(class) = &recognized.class {
//!     println!("Found: {}", class.qualified_name());
//! }
//! ```

mod class;
mod enums;
mod location;
mod method;
mod namespace;
mod text;

pub use class::{class_declarations, extract_bases, extract_class_region, ClassDecl, ClassRegion};
pub use enums::extract_enums;
pub use location::{offset_to_location, Location};
pub use method::{extract_methods, parse_params, MethodTable};
pub use namespace::extract_namespace;

use crate::diagnostics::Diagnostic;
use crate::registry::{ScriptableClass, ScriptableEnum, SourceUnit};

/// Everything recognized in one source unit.
#[derive(Debug, Clone, Default)]
pub struct Recognized {
    /// Namespace chain of the file, `None` for the global namespace.
    pub namespace: Option<String>,
    /// The class owning the file's marked region, if there is one.
    pub class: Option<ScriptableClass>,
    /// Marked enums in declaration order.
    pub enums: Vec<ScriptableEnum>,
    /// Skipped or partially read declarations, already tagged with the path.
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns a source unit into declarations.
pub trait Recognizer {
    fn recognize(&self, unit: &SourceUnit) -> Recognized;
}

/// The regex-based recognizer for the `//=` marker convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternRecognizer;

impl Recognizer for PatternRecognizer {
    fn recognize(&self, unit: &SourceUnit) -> Recognized {
        let text = unit.text.as_str();
        let namespace = extract_namespace(text);

        let (region, mut diagnostics) = extract_class_region(text);
        let class = match region {
            Some(region) => {
                let (methods, method_diagnostics) =
                    extract_methods(&region.name, &region.body, region.body_offset, text);
                diagnostics.extend(method_diagnostics);

                Some(ScriptableClass {
                    name: region.name,
                    namespace: namespace.clone(),
                    include: unit.include.clone(),
                    path: unit.path.clone(),
                    body: region.body,
                    bases: extract_bases(text),
                    ancestors: Vec::new(),
                    methods,
                })
            }
            None => None,
        };

        let (enums, enum_diagnostics) = extract_enums(unit, namespace.as_deref());
        diagnostics.extend(enum_diagnostics);

        Recognized {
            namespace,
            class,
            enums,
            diagnostics: diagnostics
                .into_iter()
                .map(|d| d.in_file(&unit.path))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_EVENT: &str = r#"#ifndef KEY_REPEAT_EVENT_H
#define KEY_REPEAT_EVENT_H
#include "../events/event.h"

//= SCRIPTABLE
//= SCRIPTABLE BASES Event
namespace Input {
  /**
   * @brief      Class for key repeat event.
   */
  class [[scriptable]] KeyRepeatEvent : public Events::Event {
    private:
      int key;
    public:
      //= BEGIN SCRIPTABLE

      /**
       * @brief      Constructor for KeyRepeatEvent
       */
      [[scriptable]] KeyRepeatEvent(const int key) : Event(Events::EventType::KEY_REPEAT), key(key) {}
      [[scriptable]] static std::shared_ptr<KeyRepeatEvent> create(const int key) { return std::make_shared<KeyRepeatEvent>(key); }
      [[scriptable]] int getKey() const noexcept { return key; }
      //= END SCRIPTABLE

      //= SCRIPTABLE ENUM
      enum Modifier { SHIFT, CTRL, ALT };
  };
}

#endif
"#;

    fn unit(text: &str) -> SourceUnit {
        SourceUnit::new("src/input/key_repeat_event.h", "input/key_repeat_event.h", text)
    }

    #[test]
    fn test_recognize_full_header() {
        let recognized = PatternRecognizer.recognize(&unit(KEY_EVENT));

        assert_eq!(recognized.namespace.as_deref(), Some("Input"));
        assert!(recognized.diagnostics.is_empty());

        let class = recognized.class.unwrap();
        assert_eq!(class.name, "KeyRepeatEvent");
        assert_eq!(class.qualified_name(), "Input::KeyRepeatEvent");
        assert_eq!(class.bases, vec!["Event"]);
        assert_eq!(class.include, "input/key_repeat_event.h");
        assert_eq!(class.constructors().count(), 1);
        assert_eq!(class.bound_methods().count(), 2);

        let create = &class.methods["create"][0];
        assert!(create.is_static);
        assert!(!create.is_overloaded);

        let get_key = &class.methods["getKey"][0];
        assert!(get_key.is_const);
        assert_eq!(get_key.return_type, "int");

        assert_eq!(recognized.enums.len(), 1);
        assert_eq!(recognized.enums[0].name, "KeyRepeatEvent::Modifier");
        assert_eq!(recognized.enums[0].namespace.as_deref(), Some("Input"));
    }

    #[test]
    fn test_recognize_enum_only_header() {
        let text = "//= SCRIPTABLE\n//= SCRIPTABLE ENUM\nenum Color { RED, GREEN, BLUE };\n";
        let recognized = PatternRecognizer.recognize(&unit(text));

        assert!(recognized.class.is_none());
        assert!(recognized.namespace.is_none());
        assert_eq!(recognized.enums[0].name, "Color");
    }

    #[test]
    fn test_diagnostics_carry_path() {
        let text = "//= SCRIPTABLE\nclass Foo {\n//= BEGIN SCRIPTABLE\nFoo();\n};\n";
        let recognized = PatternRecognizer.recognize(&unit(text));

        assert!(recognized.class.is_none());
        assert_eq!(recognized.diagnostics.len(), 1);
        assert_eq!(
            recognized.diagnostics[0].position().as_deref(),
            Some("src/input/key_repeat_event.h:3:1")
        );
    }
}
