//! Method and constructor extraction from a class's marked region.
//!
//! Each line of the region is matched on its own, so a signature must fit on
//! one line. Lines that are clearly not declarations (fields, access labels,
//! statements inside inline bodies) are ignored without comment; lines that
//! look like a declaration but cannot be read are reported.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::location::offset_to_location;
use super::text::{before_assignment, split_top_level, strip_comments};
use crate::diagnostics::Diagnostic;
use crate::registry::{MethodOverload, Param};

lazy_static! {
    /// `[<decl-specifiers> <return-type>] <name>(<params>) <rest>`
    static ref SIGNATURE_RE: Regex = Regex::new(
        r"^(?P<ret>.*?)\b(?P<name>[A-Za-z_]\w*)\s*\((?P<params>(?:[^()]|\([^()]*\))*)\)(?P<rest>.*)$"
    )
    .unwrap();
    static ref DELETED_RE: Regex = Regex::new(r"=\s*delete\b").unwrap();
    static ref ATTRIBUTE_RE: Regex = Regex::new(r"\[\[[^\]]*\]\]").unwrap();
    static ref STATIC_RE: Regex = Regex::new(r"\bstatic\b").unwrap();
    static ref OPERATOR_RE: Regex = Regex::new(r"\boperator\b").unwrap();
    static ref CONST_QUALIFIER_RE: Regex = Regex::new(r"^\s*const\b").unwrap();
    /// What may precede a name in a declaration once specifiers are gone.
    static ref RETURN_TYPE_RE: Regex = Regex::new(r"^(?:[A-Za-z_][\w:<>,*&\s]*)?$").unwrap();
}

/// Specifiers that never belong to the return type.
const SPECIFIERS: &[&str] = &["virtual", "static", "inline", "explicit", "constexpr", "friend", "extern"];

/// Names that open statements, not declarations.
const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "return", "sizeof", "catch", "static_assert", "decltype",
    "alignas", "alignof", "throw", "delete", "new",
];

/// Methods found in a class region, keyed by name in source order.
pub type MethodTable = IndexMap<String, Vec<MethodOverload>>;

/// Extract constructors and methods from a class region.
///
/// `body_offset` is where `body` starts inside `full_text`; it is only used
/// to place diagnostics. Overload status is decided against the whole file.
pub fn extract_methods(
    class_name: &str,
    body: &str,
    body_offset: usize,
    full_text: &str,
) -> (MethodTable, Vec<Diagnostic>) {
    let mut methods = MethodTable::new();
    let mut diagnostics = Vec::new();
    let counter = OverloadCounter::new(full_text);

    // Stripping keeps every newline, so stripped and raw lines pair up.
    let code = strip_comments(body);
    let mut line_offset = body_offset;
    let mut depth: usize = 0;
    for (raw, stripped) in body.split_inclusive('\n').zip(code.split_inclusive('\n')) {
        let offset = line_offset;
        line_offset += raw.len();

        let mut line = stripped.trim();
        // preprocessor
        if line.starts_with('#') {
            line = "";
        }

        // Lines inside a multi-line inline body are statements.
        let inside_body = depth > 0;
        depth = (depth + line.matches('{').count()).saturating_sub(line.matches('}').count());
        if inside_body || line.is_empty() {
            continue;
        }
        if DELETED_RE.is_match(line) {
            continue;
        }

        let location = offset_to_location(full_text, offset + leading_ws(raw));

        if OPERATOR_RE.is_match(line) {
            diagnostics.push(
                Diagnostic::note("scriptgen::unsupported-operator", "operators are not bound")
                    .at(location),
            );
            continue;
        }

        let Some(caps) = SIGNATURE_RE.captures(line) else {
            if line.contains('(') {
                diagnostics.push(
                    Diagnostic::warning(
                        "scriptgen::unrecognized-signature",
                        format!("cannot read signature `{}`", line),
                    )
                    .at(location)
                    .with_help("Signatures must fit on a single line"),
                );
            }
            continue;
        };

        let raw_ret = &caps["ret"];
        let name = &caps["name"];

        if raw_ret.trim_end().ends_with('~') || STATEMENT_KEYWORDS.contains(&name) {
            continue;
        }

        let return_type = strip_specifiers(raw_ret);
        let opens_statement = return_type
            .split_whitespace()
            .next()
            .is_some_and(|token| STATEMENT_KEYWORDS.contains(&token));
        if opens_statement || !RETURN_TYPE_RE.is_match(&return_type) || !balanced_angles(&return_type) {
            continue;
        }

        if return_type.is_empty() && name != class_name {
            diagnostics.push(
                Diagnostic::warning(
                    "scriptgen::stray-signature",
                    format!("`{}` has no return type and is not a constructor of {}", name, class_name),
                )
                .at(location),
            );
            continue;
        }

        let overload = MethodOverload {
            return_type,
            params: parse_params(&caps["params"]),
            is_overloaded: counter.count(name) > 1,
            is_static: STATIC_RE.is_match(raw_ret),
            is_const: CONST_QUALIFIER_RE.is_match(&caps["rest"]),
        };
        methods.entry(name.to_string()).or_default().push(overload);
    }

    (methods, diagnostics)
}

/// Split a parameter list into parameters with default values removed.
pub fn parse_params(params: &str) -> Vec<Param> {
    let params: Vec<Param> = split_top_level(params, ',')
        .into_iter()
        .map(|param| before_assignment(param).trim())
        .filter(|param| !param.is_empty())
        .map(Param::parse)
        .collect();

    if params.len() == 1 && params[0].decl == "void" {
        return Vec::new();
    }
    params
}

/// Counts `name(` occurrences in a file's code, ignoring comments and
/// deleted declarations.
struct OverloadCounter {
    code: String,
}

impl OverloadCounter {
    fn new(full_text: &str) -> Self {
        let code = strip_comments(full_text)
            .lines()
            .filter(|line| !DELETED_RE.is_match(line))
            .collect::<Vec<_>>()
            .join("\n");
        Self { code }
    }

    fn count(&self, name: &str) -> usize {
        match Regex::new(&format!(r"\b{}\(", regex::escape(name))) {
            Ok(re) => re.find_iter(&self.code).count(),
            Err(_) => 0,
        }
    }
}

fn strip_specifiers(raw_ret: &str) -> String {
    let without_attributes = ATTRIBUTE_RE.replace_all(raw_ret, " ");
    without_attributes
        .split_whitespace()
        .filter(|token| !SPECIFIERS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn balanced_angles(text: &str) -> bool {
    text.matches('<').count() == text.matches('>').count()
}

fn leading_ws(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(class_name: &str, body: &str) -> MethodTable {
        extract_methods(class_name, body, 0, body).0
    }

    #[test]
    fn test_constructor_and_method() {
        let body = "\n  Foo();\n  void bar();\n";
        let methods = extract("Foo", body);

        assert_eq!(methods.len(), 2);
        let ctor = &methods["Foo"][0];
        assert!(ctor.is_constructor());
        assert!(ctor.params.is_empty());

        let bar = &methods["bar"][0];
        assert_eq!(bar.return_type, "void");
        assert!(!bar.is_overloaded);
        assert!(!bar.is_static);
    }

    #[test]
    fn test_specifiers_are_stripped() {
        let body = "virtual const std::string className() const noexcept override;\n\
                    [[scriptable]] static std::shared_ptr<Key> create(const int key) { return std::make_shared<Key>(key); }\n";
        let methods = extract("Key", body);

        let class_name = &methods["className"][0];
        assert_eq!(class_name.return_type, "const std::string");
        assert!(class_name.is_const);
        assert!(!class_name.is_static);

        let create = &methods["create"][0];
        assert_eq!(create.return_type, "std::shared_ptr<Key>");
        assert!(create.is_static);
        assert_eq!(create.params[0].decl, "const int key");
    }

    #[test]
    fn test_constructor_with_initializer_list() {
        let body = "[[scriptable]] Key(const int key) : Event(Events::EventType::KEY), key(key) {}\n";
        let methods = extract("Key", body);

        assert_eq!(methods.len(), 1);
        assert!(methods["Key"][0].is_constructor());
        assert_eq!(methods["Key"][0].params.len(), 1);
    }

    #[test]
    fn test_overloads_accumulate_in_order() {
        let body = "void set(int x);\nvoid set(float x, float y);\n";
        let methods = extract("Foo", body);

        let set = &methods["set"];
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|o| o.is_overloaded));
        assert_eq!(set[0].params.len(), 1);
        assert_eq!(set[1].params.len(), 2);
    }

    #[test]
    fn test_overload_counts_whole_file() {
        let full = "class Foo {\n//= BEGIN SCRIPTABLE\nvoid run();\n//= END SCRIPTABLE\nvoid run(int speed);\n};";
        let start = full.find("\nvoid run();").unwrap();
        let body = "\nvoid run();\n";
        let (methods, _) = extract_methods("Foo", body, start, full);

        assert_eq!(methods["run"].len(), 1);
        assert!(methods["run"][0].is_overloaded);
    }

    #[test]
    fn test_overload_ignores_similar_names_and_comments() {
        let full = "// run() is documented here\nvoid run();\nvoid rerun();\n";
        let methods = extract_methods("Foo", "void run();\n", 0, full).0;
        assert!(!methods["run"][0].is_overloaded);
    }

    #[test]
    fn test_deleted_declarations_are_skipped() {
        let body = "Foo(const Foo&) = delete;\nFoo();\nvoid copy(int x) = delete;\nvoid copy();\n";
        let methods = extract("Foo", body);

        assert_eq!(methods["Foo"].len(), 1);
        assert_eq!(methods["copy"].len(), 1);
        assert!(!methods["copy"][0].is_overloaded);
    }

    #[test]
    fn test_default_values_are_stripped() {
        let body = "void move(const glm::vec2& to = glm::vec2(0.0f, 0.0f), bool snap = false);\n";
        let methods = extract("Foo", body);
        let params: Vec<_> = methods["move"][0].params.iter().map(|p| p.decl.as_str()).collect();

        assert_eq!(params, vec!["const glm::vec2& to", "bool snap"]);
    }

    #[test]
    fn test_template_parameters_keep_commas() {
        let body = "void load(std::map<std::string, int> table);\n";
        let methods = extract("Foo", body);
        assert_eq!(methods["load"][0].params.len(), 1);
        assert_eq!(methods["load"][0].params[0].ty, "std::map<std::string, int>");
    }

    #[test]
    fn test_void_parameter_list() {
        let methods = extract("Foo", "int size(void) const;\n");
        assert!(methods["size"][0].params.is_empty());
    }

    #[test]
    fn test_comments_fields_and_labels_are_ignored() {
        let body = r#"
      /**
       * @brief      Sets the speed (in tiles).
       */
      public:
      float speed;
      // void hidden();
      void setSpeed(const float speed); // inline note()
"#;
        let (methods, diagnostics) = extract_methods("Foo", body, 0, body);

        assert_eq!(methods.keys().collect::<Vec<_>>(), vec!["setSpeed"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_block_comments_span_lines() {
        let body = "Foo();\n/*\nvoid legacy(int x);\n*/\nvoid bar(); /* trailing\n   void gone(); */\nvoid baz();\n";
        let (methods, diagnostics) = extract_methods("Foo", body, 0, body);

        assert_eq!(methods.keys().collect::<Vec<_>>(), vec!["Foo", "bar", "baz"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_positions_after_block_comment() {
        let body = "/* a\n b */\nvoid place(int x,\n";
        let (_, diagnostics) = extract_methods("Foo", body, 0, body);

        assert_eq!(diagnostics[0].code, "scriptgen::unrecognized-signature");
        assert_eq!(diagnostics[0].location.unwrap().line, 3);
    }

    #[test]
    fn test_string_default_values() {
        let body = r#"void open(const std::string& url = "http://localhost", const std::string& sep = ",");"#;
        let (methods, diagnostics) = extract_methods("Foo", body, 0, body);
        let params: Vec<_> = methods["open"][0].params.iter().map(|p| p.decl.as_str()).collect();

        assert!(diagnostics.is_empty());
        assert_eq!(params, vec!["const std::string& url", "const std::string& sep"]);
    }

    #[test]
    fn test_destructors_and_statements_are_ignored() {
        let body = "virtual ~Foo();\nint get() const {\n  return compute(1);\n}\n";
        let (methods, diagnostics) = extract_methods("Foo", body, 0, body);

        assert_eq!(methods.keys().collect::<Vec<_>>(), vec!["get"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_multiline_signature_is_reported() {
        let body = "\nvoid place(int x,\n           int y);\n";
        let (methods, diagnostics) = extract_methods("Foo", body, 0, body);

        assert!(methods.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "scriptgen::unrecognized-signature");
        assert_eq!(diagnostics[0].location.unwrap().line, 2);
    }

    #[test]
    fn test_stray_signature_is_reported() {
        let (methods, diagnostics) = extract_methods("Foo", "DECLARE_THING(Foo);\n", 0, "DECLARE_THING(Foo);\n");

        assert!(methods.is_empty());
        assert_eq!(diagnostics[0].code, "scriptgen::stray-signature");
    }

    #[test]
    fn test_operators_are_noted() {
        let (methods, diagnostics) = extract_methods("Foo", "bool operator==(const Foo& o) const;\n", 0, "");
        assert!(methods.is_empty());
        assert_eq!(diagnostics[0].code, "scriptgen::unsupported-operator");
    }
}
