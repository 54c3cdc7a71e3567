//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use serde_json::{Value, json};

use crate::bootstrap::bootstrap;
use crate::config::CompilerOptions;
use crate::registry::{Owner, TypeRegistry};
use crate::types::{MethodSig, Type, TypeId, TypeKind, TypeRef};
use quartz_core::lang::stdlib::MAIN_MODULE;

use super::{CliError, CliResult, ExitCode};

/// Bootstrap a registry, rendering failures as diagnostics.
fn build_registry(options: &CompilerOptions) -> CliResult<TypeRegistry> {
    bootstrap(options).map_err(CliError::diagnostic)
}

/// `quartz types`
pub fn types(options: &CompilerOptions, as_json: bool) -> CliResult<ExitCode> {
    let registry = build_registry(options)?;
    if as_json {
        let entries: Vec<Value> = registry.iter().map(|(id, ty)| type_json(&registry, id, ty)).collect();
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::failure(format!("Error serializing registry: {e}")))?;
        println!("{text}");
    } else {
        print!("{}", registry.dump());
    }
    Ok(ExitCode::SUCCESS)
}

/// `quartz libs`
pub fn libs(options: &CompilerOptions) -> CliResult<ExitCode> {
    let registry = build_registry(options)?;
    for name in registry.library_names() {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

/// `quartz check`
pub fn check(options: &CompilerOptions) -> CliResult<ExitCode> {
    // `bootstrap` already verifies the lattice.
    let registry = build_registry(options)?;
    println!(
        "ok: {} types, {} symbols, {} libraries",
        registry.len(),
        registry.symbol_table().len(),
        registry.library_names().len()
    );
    Ok(ExitCode::SUCCESS)
}

/// `quartz method <TYPE> <NAME>`
pub fn method(options: &CompilerOptions, ty: &str, name: &str) -> CliResult<ExitCode> {
    let registry = build_registry(options)?;

    let receiver = if ty == MAIN_MODULE {
        Owner::Main
    } else {
        registry
            .lookup(ty)
            .map(Owner::Type)
            .ok_or_else(|| CliError::failure(format!("Error: unknown type `{ty}`")))?
    };
    let found = match receiver {
        Owner::Main => registry.lookup_global(name),
        Owner::Type(id) => registry.lookup_method(id, name),
    };

    let Some(found) = found else {
        return Err(CliError::failure(format!("Error: `{ty}` has no method `{name}`")));
    };
    let owner = registry.owner(found.owner);
    let keyword = if matches!(owner.kind, TypeKind::Lib(_)) { "fun" } else { "def" };
    println!("{}", registry.describe_method(keyword, found.sig));
    if found.owner != receiver {
        println!("  (from {})", owner.name);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// JSON
// ============================================================================

fn type_json(registry: &TypeRegistry, id: TypeId, ty: &Type) -> Value {
    let name_of = |id: TypeId| registry.get(id).name.clone();
    let includes: Vec<String> = ty.includes.iter().map(|&m| name_of(m)).collect();
    let methods: Vec<Value> = ty.methods.values().map(|sig| method_json(registry, sig)).collect();
    let mut entry = json!({
        "id": id.index(),
        "name": ty.name,
        "kind": ty.kind.label(),
        "superclass": ty.superclass().map(name_of),
        "includes": includes,
        "methods": methods,
    });
    match &ty.kind {
        TypeKind::Primitive(primitive) => {
            entry["repr"] = json!(primitive.repr.as_str());
            entry["byte_size"] = json!(primitive.byte_size);
        }
        TypeKind::Array(array) => {
            entry["element"] = json!(name_of(array.element));
            entry["template"] = json!(array.template.map(name_of));
        }
        TypeKind::Lib(lib) => {
            entry["libname"] = json!(lib.libname);
        }
        TypeKind::Object(_) | TypeKind::Module => {}
    }
    entry
}

fn method_json(registry: &TypeRegistry, sig: &MethodSig) -> Value {
    let params: Vec<Value> = sig
        .params
        .iter()
        .map(|p| json!({ "name": p.name, "type": registry.get(p.ty).name }))
        .collect();
    let returns = match sig.return_type {
        TypeRef::Void => Value::Null,
        TypeRef::Type(ret) => json!(registry.get(ret).name),
    };
    json!({
        "name": sig.name,
        "params": params,
        "returns": returns,
    })
}
