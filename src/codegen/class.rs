//! Registration routine for one scriptable class.

use crate::registry::{MethodOverload, Param, Registry, ScriptableClass};

use super::GeneratedModule;

/// Build `get<Name>Module()` for a class.
///
/// Constructors come first, then one binding per method overload in source
/// order, then one base-class relationship per ancestor. Ancestors that are
/// registered classes are written with their qualified names.
pub fn class_module(class: &ScriptableClass, registry: &Registry) -> GeneratedModule {
    let ty = class.qualified_name();
    let routine = format!("get{}Module", class.name);

    let constructors: Vec<String> = class
        .constructors()
        .map(|overload| format!("chaiscript::constructor<{}({})>()", ty, param_types(&overload.params)))
        .collect();

    let methods: Vec<String> = class
        .bound_methods()
        .map(|(name, overload)| method_binding(class, &ty, name, overload))
        .collect();

    let mut source = String::new();
    source.push_str(&format!("  chaiscript::ModulePtr {}() {{\n", routine));
    source.push_str("    chaiscript::ModulePtr module = std::make_shared<chaiscript::Module>();\n");
    source.push_str(&format!(
        "    chaiscript::utility::add_class<{}>(*module, std::string(\"{}\"),\n",
        ty, class.name
    ));
    source.push_str(&braced_list(&constructors, ","));
    source.push_str(&braced_list(&methods, ");"));

    for ancestor in &class.ancestors {
        source.push_str(&format!(
            "    module->add(chaiscript::base_class<{}, {}>());\n",
            registry.resolve_class_name(ancestor),
            ty
        ));
    }

    source.push_str("    return module;\n");
    source.push_str("  }\n");

    GeneratedModule {
        call: format!("{}()", routine),
        source,
    }
}

/// `{fun, "exported_name"}` for one method overload.
///
/// Static methods go through a lambda taking an ignored instance reference
/// first. Overloaded methods are selected with a member-pointer cast and
/// exported as `Class_name`.
fn method_binding(class: &ScriptableClass, ty: &str, name: &str, overload: &MethodOverload) -> String {
    let exported = if overload.is_overloaded {
        format!("{}_{}", class.name, name)
    } else {
        name.to_string()
    };

    let fun = if overload.is_static {
        let names = forwarding_names(&overload.params);
        let mut params = vec![format!("{}& /*self*/", ty)];
        params.extend(
            overload
                .params
                .iter()
                .zip(&names)
                .map(|(param, name)| format!("{} {}", param.ty, name)),
        );
        format!(
            "[]({}) {{ return {}::{}({}); }}",
            params.join(", "),
            ty,
            name,
            names.join(", ")
        )
    } else if overload.is_overloaded {
        format!(
            "static_cast<{} ({}::*)({}){}>(&{}::{})",
            overload.return_type,
            ty,
            param_types(&overload.params),
            if overload.is_const { " const" } else { "" },
            ty,
            name
        )
    } else {
        format!("&{}::{}", ty, name)
    };

    format!("{{chaiscript::fun({}), \"{}\"}}", fun, exported)
}

fn param_types(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| p.ty.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declared parameter names, with `argN` standing in for unnamed ones.
fn forwarding_names(params: &[Param]) -> Vec<String> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| p.name.clone().unwrap_or_else(|| format!("arg{}", i)))
        .collect()
}

fn braced_list(entries: &[String], terminator: &str) -> String {
    if entries.is_empty() {
        return format!("      {{}}{}\n", terminator);
    }

    let mut out = String::from("      {\n");
    for entry in entries {
        out.push_str(&format!("        {},\n", entry));
    }
    out.push_str(&format!("      }}{}\n", terminator));
    out
}
