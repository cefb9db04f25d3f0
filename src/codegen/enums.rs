//! Registration routine for one scriptable enum.

use crate::registry::ScriptableEnum;

use super::GeneratedModule;

/// Build `get<Name>Module()` for an enum, `::` removed from the name.
///
/// Each value is registered as `<Flat>_<VALUE>`, where `<Flat>` is the enum
/// name with `::` replaced by `_`.
pub fn enum_module(scriptable_enum: &ScriptableEnum) -> GeneratedModule {
    let ty = scriptable_enum.qualified_name();
    let flat = scriptable_enum.flat_name();
    let routine = format!("get{}Module", scriptable_enum.name.replace("::", ""));

    let mut source = String::new();
    source.push_str(&format!("  chaiscript::ModulePtr {}() {{\n", routine));
    source.push_str(&format!("    using Underlying = std::underlying_type<{}>::type;\n", ty));
    source.push_str("    chaiscript::ModulePtr module = std::make_shared<chaiscript::Module>();\n");

    if scriptable_enum.values.is_empty() {
        source.push_str("    std::vector<std::pair<Underlying, std::string>> values;\n");
    } else {
        source.push_str("    std::vector<std::pair<Underlying, std::string>> values = {\n");
        for value in &scriptable_enum.values {
            source.push_str(&format!(
                "      {{static_cast<Underlying>({}), \"{}_{}\"}},\n",
                scriptable_enum.value_expr(value),
                flat,
                value
            ));
        }
        source.push_str("    };\n");
    }

    source.push_str(&format!(
        "    chaiscript::utility::add_class<{}>(*module, std::string(\"{}\"), values);\n",
        ty, flat
    ));
    source.push_str("    return module;\n");
    source.push_str("  }\n");

    GeneratedModule {
        call: format!("{}()", routine),
        source,
    }
}
