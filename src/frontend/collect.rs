//! Type collection: record the declarations of one file in the type registry.
//!
//! Two passes over the tree:
//! 1. declare every class, module, lib and primitive (so members may refer to types declared later in the file),
//! 2. attach includes and method signatures.
//!
//! ## Re-opening
//! A `class` or `module` whose name already exists re-opens it to add members, provided the kind agrees
//! (`class` re-opens objects, primitives and arrays) and any stated superclass is the existing one.
//! `lib` and `primitive` declarations never re-open.

use crate::bootstrap::TypeVisitor;
use crate::error::{CollectError, DeclarationError};
use crate::frontend::ast::*;
use crate::registry::{Owner, TypeRegistry};
use crate::types::{self, MethodSig, TypeId, TypeRef};
use quartz_core::lang::repr;

/// [`TypeVisitor`] over `quartz_syntax` programs.
#[derive(Debug, Default)]
pub struct TypeCollector {
    declared: usize,
}

impl TypeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Types declared (not re-opened) by this collector so far.
    pub fn declared(&self) -> usize {
        self.declared
    }
}

impl TypeVisitor for TypeCollector {
    type Tree = Program;

    #[tracing::instrument(skip_all, fields(declarations = root.declarations.len()))]
    fn visit(&mut self, registry: &mut TypeRegistry, root: &Program) -> Result<(), CollectError> {
        self.declare_types(registry, root)?;
        self.collect_members(registry, root)?;
        tracing::debug!(declared = self.declared, "collected declarations");
        Ok(())
    }
}

// ============================================================================
// Pass 1: declarations
// ============================================================================

impl TypeCollector {
    fn declare_types(&mut self, registry: &mut TypeRegistry, program: &Program) -> Result<(), CollectError> {
        // Classes whose superclass appears later in the file.
        let mut deferred: Vec<&ClassDecl> = Vec::new();

        for decl in &program.declarations {
            match &decl.node {
                Declaration::Class(class) => {
                    let pending = class
                        .superclass
                        .as_ref()
                        .is_some_and(|sup| registry.lookup(&sup.node).is_none());
                    if pending {
                        deferred.push(class);
                    } else {
                        self.declare_class(registry, class)?;
                    }
                }
                Declaration::Module(module) => self.declare_module(registry, module)?,
                Declaration::Lib(lib) => self.declare_lib(registry, lib)?,
                Declaration::Primitive(primitive) => self.declare_primitive(registry, primitive)?,
                Declaration::Method(_) | Declaration::Include(_) => {}
            }
        }

        // Retry until nothing moves; what is left names an unknown type (or a cycle).
        while !deferred.is_empty() {
            let before = deferred.len();
            let mut still_pending = Vec::new();
            for class in deferred {
                let ready = class
                    .superclass
                    .as_ref()
                    .is_none_or(|sup| registry.lookup(&sup.node).is_some());
                if ready {
                    self.declare_class(registry, class)?;
                } else {
                    still_pending.push(class);
                }
            }
            if still_pending.len() == before {
                let class = still_pending[0];
                let sup = class.superclass.as_ref().map_or(&class.name, |s| s);
                return Err(CollectError::new(
                    DeclarationError::UnknownType { name: sup.node.clone() },
                    sup.span,
                ));
            }
            deferred = still_pending;
        }
        Ok(())
    }

    fn declare_class(&mut self, registry: &mut TypeRegistry, class: &ClassDecl) -> Result<TypeId, CollectError> {
        let stated = class
            .superclass
            .as_ref()
            .map(|sup| resolve_name(registry, sup))
            .transpose()?;

        if let Some(existing) = registry.lookup(&class.name.node) {
            let ty = registry.get(existing);
            if !ty.is_class_like() {
                return Err(CollectError::new(
                    DeclarationError::AlreadyDefined {
                        name: class.name.node.clone(),
                        existing: ty.kind.label(),
                    },
                    class.name.span,
                ));
            }
            if let (Some(stated), Some(sup)) = (stated, &class.superclass) {
                if ty.superclass() != Some(stated) {
                    let existing_sup = ty
                        .superclass()
                        .map_or_else(|| "(none)".to_string(), |id| registry.get(id).name.clone());
                    return Err(CollectError::new(
                        DeclarationError::SuperclassMismatch {
                            name: class.name.node.clone(),
                            existing: existing_sup,
                            stated: sup.node.clone(),
                        },
                        sup.span,
                    ));
                }
            }
            tracing::trace!(name = %class.name.node, "re-opened class");
            return Ok(existing);
        }

        let superclass = stated.unwrap_or_else(|| registry.object());
        let span = class.superclass.as_ref().map_or(class.name.span, |sup| sup.span);
        let id = registry
            .declare_object(&class.name.node, superclass)
            .map_err(|e| CollectError::new(e, span))?;
        self.declared += 1;
        Ok(id)
    }

    fn declare_module(&mut self, registry: &mut TypeRegistry, module: &ModuleDecl) -> Result<(), CollectError> {
        if let Some(existing) = registry.lookup(&module.name.node) {
            let ty = registry.get(existing);
            if ty.is_module() {
                return Ok(());
            }
            return Err(CollectError::new(
                DeclarationError::AlreadyDefined {
                    name: module.name.node.clone(),
                    existing: ty.kind.label(),
                },
                module.name.span,
            ));
        }
        registry
            .declare_module(&module.name.node)
            .map_err(|e| CollectError::new(e, module.name.span))?;
        self.declared += 1;
        Ok(())
    }

    fn declare_lib(&mut self, registry: &mut TypeRegistry, lib: &LibDecl) -> Result<(), CollectError> {
        let libname = lib.libname.as_ref().map(|l| l.node.clone());
        registry
            .declare_lib(&lib.name.node, libname)
            .map_err(|e| CollectError::new(e, lib.name.span))?;
        self.declared += 1;
        Ok(())
    }

    fn declare_primitive(&mut self, registry: &mut TypeRegistry, primitive: &PrimitiveDecl) -> Result<(), CollectError> {
        if let Some(existing) = registry.lookup(&primitive.name.node) {
            return Err(CollectError::new(
                DeclarationError::AlreadyDefined {
                    name: primitive.name.node.clone(),
                    existing: registry.get(existing).kind.label(),
                },
                primitive.name.span,
            ));
        }
        let superclass = resolve_name(registry, &primitive.superclass)?;
        let repr = repr::from_str(&primitive.repr.node).ok_or_else(|| {
            CollectError::new(
                DeclarationError::UnknownRepr {
                    repr: primitive.repr.node.clone(),
                },
                primitive.repr.span,
            )
        })?;
        registry
            .declare_primitive(&primitive.name.node, superclass, repr, primitive.size.node)
            .map_err(|e| {
                let span = match e {
                    DeclarationError::Layout(_) => primitive.size.span,
                    DeclarationError::NotAClass { .. } => primitive.superclass.span,
                    _ => primitive.name.span,
                };
                CollectError::new(e, span)
            })?;
        self.declared += 1;
        Ok(())
    }
}

// ============================================================================
// Pass 2: members
// ============================================================================

impl TypeCollector {
    fn collect_members(&mut self, registry: &mut TypeRegistry, program: &Program) -> Result<(), CollectError> {
        for decl in &program.declarations {
            match &decl.node {
                Declaration::Class(class) => {
                    let owner = resolve_name(registry, &class.name)?;
                    collect_body(registry, owner.into(), &class.members)?;
                }
                Declaration::Module(module) => {
                    let owner = resolve_name(registry, &module.name)?;
                    collect_body(registry, owner.into(), &module.members)?;
                }
                Declaration::Lib(lib) => {
                    let owner = resolve_name(registry, &lib.name)?;
                    for fun in &lib.functions {
                        define(registry, owner.into(), &fun.node)?;
                    }
                }
                Declaration::Method(method) => define(registry, Owner::Main, method)?,
                Declaration::Include(module) => include(registry, Owner::Main, module)?,
                Declaration::Primitive(_) => {}
            }
        }
        Ok(())
    }
}

fn collect_body(registry: &mut TypeRegistry, owner: Owner, members: &[Spanned<Member>]) -> Result<(), CollectError> {
    for member in members {
        match &member.node {
            Member::Method(method) => define(registry, owner, method)?,
            Member::Include(module) => include(registry, owner, module)?,
        }
    }
    Ok(())
}

fn include(registry: &mut TypeRegistry, owner: Owner, module: &Spanned<Ident>) -> Result<(), CollectError> {
    let id = resolve_name(registry, module)?;
    registry
        .include(owner, id)
        .map_err(|e| CollectError::new(e, module.span))
}

fn define(registry: &mut TypeRegistry, owner: Owner, method: &MethodDecl) -> Result<(), CollectError> {
    let params = method
        .params
        .iter()
        .map(|p| Ok(types::Param::new(&p.node.name, resolve_type(registry, &p.node.ty)?)))
        .collect::<Result<Vec<_>, CollectError>>()?;
    let return_type = match &method.return_type {
        Some(ty) => TypeRef::Type(resolve_type(registry, ty)?),
        None => TypeRef::Void,
    };
    registry
        .define_method(owner, MethodSig::new(&method.name.node, params, return_type))
        .map_err(|e| CollectError::new(e, method.name.span))
}

fn resolve_name(registry: &TypeRegistry, name: &Spanned<Ident>) -> Result<TypeId, CollectError> {
    registry.lookup(&name.node).ok_or_else(|| {
        CollectError::new(DeclarationError::UnknownType { name: name.node.clone() }, name.span)
    })
}

/// Resolve a type as written in a signature. `Base[Arg]` goes through the instance cache.
fn resolve_type(registry: &mut TypeRegistry, ty: &Spanned<TypeExpr>) -> Result<TypeId, CollectError> {
    match &ty.node {
        TypeExpr::Named(name) => registry.lookup(name).ok_or_else(|| {
            CollectError::new(DeclarationError::UnknownType { name: name.clone() }, ty.span)
        }),
        TypeExpr::Generic { base, arg } => {
            let template = registry.lookup(base).ok_or_else(|| {
                CollectError::new(DeclarationError::UnknownType { name: base.clone() }, ty.span)
            })?;
            let element = resolve_type(registry, arg)?;
            registry
                .instantiate(template, element)
                .map_err(|e| CollectError::new(e, ty.span))
        }
    }
}
