//! Assembly of the complete generated header.

use crate::registry::Registry;

use super::{class_module, enum_module, GeneratedModule};

const SYSTEM_INCLUDES: &[&str] = &[
    "memory",
    "string",
    "type_traits",
    "utility",
    "vector",
    "chaiscript/chaiscript.hpp",
    "chaiscript/utility/utility.hpp",
];

/// Render the whole header for a registry.
///
/// Layout: include guard, banner, includes, `namespace generated` holding
/// the `using namespace` lines, every enum routine, every class routine and
/// `registerModules`. An empty registry still yields a complete header with
/// an empty entry point.
pub fn render_header(registry: &Registry, guard: &str) -> String {
    let modules: Vec<GeneratedModule> = registry
        .enums()
        .map(enum_module)
        .chain(registry.classes().map(|class| class_module(class, registry)))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("#ifndef {}\n#define {}\n", guard, guard));
    out.push_str("// Generated by scriptgen from the marked headers under the source root.\n");
    out.push_str("// Do not edit: changes are overwritten on the next build.\n\n");

    for include in SYSTEM_INCLUDES {
        out.push_str(&format!("#include <{}>\n", include));
    }
    for include in registry.includes() {
        out.push_str(&format!("#include \"{}\"\n", include));
    }

    out.push_str("\nnamespace generated {\n");
    for namespace in registry.namespaces() {
        out.push_str(&format!("  using namespace {};\n", namespace));
    }

    for module in &modules {
        out.push('\n');
        out.push_str(&module.source);
    }

    out.push_str("\n  void registerModules(std::shared_ptr<chaiscript::ChaiScript> chai) {\n");
    if modules.is_empty() {
        out.push_str("    (void)chai;\n");
    }
    for module in &modules {
        out.push_str(&format!("    chai->add({});\n", module.call));
    }
    out.push_str("  }\n");
    out.push_str("}\n\n");
    out.push_str(&format!("#endif // {}\n", guard));

    out
}
