//! The type registry: one per compilation.
//!
//! [`TypeRegistry`] owns every [`Type`] of a compilation in an arena indexed by [`TypeId`], a name table over
//! that arena (insertion order kept), the symbol-literal set and the array instance cache. It is itself the
//! `main` module: top-level methods and includes land on it (see [`Owner::Main`]).
//!
//! ## Lifecycle
//!
//! 1. [`TypeRegistry::new`] / [`TypeRegistry::with_target`] bootstrap the closed builtin set.
//! 2. The bootstrap pipeline may add standard-library declarations.
//! 3. Later stages only read. A failed bootstrap poisons the registry and [`TypeRegistry::ensure_usable`]
//!    refuses further use.
//!
//! ## Examples
//! ```rust
//! use quartz::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! assert_eq!(registry.len(), 14);
//! assert_eq!(registry.get(registry.int()).name, "Int");
//! assert!(registry.is_subtype(registry.int(), registry.object()));
//! ```

mod builtins;
mod display;
mod libs;
mod lookup;
mod specialize;

use std::collections::{BTreeSet, HashMap};

use quartz_core::Target;
use quartz_core::lang::repr::ReprId;
use quartz_core::lang::stdlib::MAIN_MODULE;
use quartz_core::lang::types::BuiltinTypeId;

use crate::error::{BootstrapError, DeclarationError, InvariantError};
use crate::types::*;

pub use lookup::MethodMatch;

/// Receiver of a member declaration: a registered type, or the implicit `main` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Main,
    Type(TypeId),
}

impl From<TypeId> for Owner {
    fn from(id: TypeId) -> Self {
        Owner::Type(id)
    }
}

/// Name-keyed table of every type known to a compilation.
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<Type>,
    names: HashMap<String, TypeId>,
    builtins: HashMap<BuiltinTypeId, TypeId>,
    main: Type,
    symbols: BTreeSet<String>,
    /// (template, element) -> specialization
    instances: HashMap<(TypeId, TypeId), TypeId>,
    target: Target,
    poisoned: bool,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Registry for the default (64-bit) target.
    ///
    /// ## Panics
    /// - If the builtin hierarchy is inconsistent. That is a compiler bug, not a user error.
    pub fn new() -> Self {
        Self::with_target(Target::default()).expect("INVARIANT: builtin hierarchy is consistent on the default target")
    }

    /// Registry for `target`, with the builtin hierarchy bootstrapped.
    ///
    /// ## Errors
    /// Returns an [`InvariantError`] if the target is unsupported or a builtin layout disagrees with it.
    #[tracing::instrument(skip_all, fields(pointer_size = target.pointer_size))]
    pub fn with_target(target: Target) -> Result<Self, InvariantError> {
        if !matches!(target.pointer_size, 4 | 8) {
            return Err(InvariantError::UnsupportedPointerSize {
                size: target.pointer_size,
            });
        }

        let mut registry = Self {
            types: Vec::new(),
            names: HashMap::new(),
            builtins: HashMap::new(),
            main: Type::new(MAIN_MODULE, TypeKind::Module),
            symbols: BTreeSet::new(),
            instances: HashMap::new(),
            target,
            poisoned: false,
        };
        registry.bootstrap_builtins()?;
        tracing::debug!(types = registry.len(), "builtin hierarchy ready");
        Ok(registry)
    }

    pub fn target(&self) -> Target {
        self.target
    }

    // ========================================================================
    // Named accessors
    // ========================================================================

    /// Id of a builtin type.
    pub fn builtin(&self, id: BuiltinTypeId) -> TypeId {
        *self
            .builtins
            .get(&id)
            .expect("INVARIANT: every builtin type is registered at construction")
    }

    pub fn object(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Object)
    }

    pub fn value(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Value)
    }

    pub fn numeric(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Numeric)
    }

    pub fn enumerable(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Enumerable)
    }

    /// The generic `Array` template.
    pub fn array(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Array)
    }

    pub fn bool(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Bool)
    }

    pub fn char(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Char)
    }

    pub fn int(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Int)
    }

    pub fn long(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Long)
    }

    pub fn float(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Float)
    }

    pub fn string(&self) -> TypeId {
        self.builtin(BuiltinTypeId::String)
    }

    pub fn symbol(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Symbol)
    }

    pub fn pointer(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Pointer)
    }

    /// `Array` specialized over `String`.
    pub fn argv(&self) -> TypeId {
        self.builtin(BuiltinTypeId::Argv)
    }

    /// The `void` sentinel. Never a registry entry.
    pub fn void(&self) -> TypeRef {
        TypeRef::Void
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// ## Panics
    /// - If `id` was not issued by this registry.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Every entry in registration order. `void` and `main` are not entries.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> + '_ {
        self.types.iter().enumerate().map(|(index, ty)| (TypeId(index as u32), ty))
    }

    /// The implicit `main` module.
    pub fn main(&self) -> &Type {
        &self.main
    }

    pub fn owner(&self, owner: Owner) -> &Type {
        match owner {
            Owner::Main => &self.main,
            Owner::Type(id) => self.get(id),
        }
    }

    fn owner_mut(&mut self, owner: Owner) -> &mut Type {
        match owner {
            Owner::Main => &mut self.main,
            Owner::Type(id) => &mut self.types[id.index()],
        }
    }

    pub fn superclass(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).superclass()
    }

    /// Superclass chain of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.superclass(id);
        while let Some(next) = current {
            if chain.len() > self.types.len() {
                break;
            }
            chain.push(next);
            current = self.superclass(next);
        }
        chain
    }

    /// `sub` is `sup` or inherits from it. Module inclusion is not subtyping.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        sub == sup || self.ancestors(sub).contains(&sup)
    }

    // ========================================================================
    // Symbols
    // ========================================================================

    /// Record a symbol literal. Returns `true` if it was not seen before.
    pub fn intern_symbol(&mut self, name: impl Into<String>) -> bool {
        self.symbols.insert(name.into())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    /// Symbol table for code generation: sorted, a symbol's value is its index.
    pub fn symbol_table(&self) -> Vec<&str> {
        self.symbols().collect()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn insert(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.names.insert(ty.name.clone(), id);
        self.types.push(ty);
        id
    }

    fn register(&mut self, ty: Type) -> Result<TypeId, DeclarationError> {
        if let Some(existing) = self.lookup(&ty.name) {
            return Err(DeclarationError::AlreadyDefined {
                name: ty.name,
                existing: self.get(existing).kind.label(),
            });
        }
        let id = self.insert(ty);
        tracing::trace!(name = %self.get(id).name, kind = self.get(id).kind.label(), "registered type");
        Ok(id)
    }

    fn require_class(&self, id: TypeId) -> Result<(), DeclarationError> {
        if self.get(id).is_class_like() {
            Ok(())
        } else {
            Err(DeclarationError::NotAClass {
                name: self.get(id).name.clone(),
            })
        }
    }

    /// Declare a class.
    pub fn declare_object(&mut self, name: &str, superclass: TypeId) -> Result<TypeId, DeclarationError> {
        self.require_class(superclass)?;
        self.register(Type::new(
            name,
            TypeKind::Object(ObjectType {
                superclass: Some(superclass),
            }),
        ))
    }

    /// Declare a capability module.
    pub fn declare_module(&mut self, name: &str) -> Result<TypeId, DeclarationError> {
        self.register(Type::new(name, TypeKind::Module))
    }

    /// Declare a primitive machine type.
    ///
    /// ## Errors
    /// Besides name conflicts, fails with [`InvariantError::LayoutMismatch`] when `byte_size` is not the
    /// storage size of `repr` on this registry's target.
    pub fn declare_primitive(
        &mut self,
        name: &str,
        superclass: TypeId,
        repr: ReprId,
        byte_size: u32,
    ) -> Result<TypeId, DeclarationError> {
        self.require_class(superclass)?;
        check_layout(name, repr, byte_size, self.target)?;
        self.register(Type::new(
            name,
            TypeKind::Primitive(PrimitiveType {
                superclass,
                repr,
                byte_size,
            }),
        ))
    }

    /// Declare a foreign-library binding.
    pub fn declare_lib(&mut self, name: &str, libname: Option<String>) -> Result<TypeId, DeclarationError> {
        self.register(Type::new(name, TypeKind::Lib(LibType { libname })))
    }

    /// Mix `module` into `owner`.
    pub fn include(&mut self, owner: impl Into<Owner>, module: TypeId) -> Result<(), DeclarationError> {
        let owner = owner.into();
        let module_ty = self.get(module);
        if !module_ty.is_module() {
            return Err(DeclarationError::NotAModule {
                name: module_ty.name.clone(),
            });
        }
        if owner == Owner::Type(module) {
            return Err(DeclarationError::SelfInclude {
                name: module_ty.name.clone(),
            });
        }
        if self.owner(owner).includes.contains(&module) {
            return Err(DeclarationError::DuplicateInclude {
                owner: self.owner(owner).name.clone(),
                module: module_ty.name.clone(),
            });
        }
        self.owner_mut(owner).includes.push(module);
        Ok(())
    }

    /// Add a method signature to `owner`.
    pub fn define_method(&mut self, owner: impl Into<Owner>, sig: MethodSig) -> Result<(), DeclarationError> {
        let target = self.owner_mut(owner.into());
        if target.methods.contains_key(&sig.name) {
            return Err(DeclarationError::DuplicateMethod {
                owner: target.name.clone(),
                method: sig.name,
            });
        }
        target.methods.insert(sig.name.clone(), sig);
        Ok(())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check the whole lattice: a single root (`Object`), every class-like entry reaching it without cycles,
    /// every referenced type registered and every primitive layout matching the target.
    pub fn verify(&self) -> Result<(), InvariantError> {
        let object = self.object();
        let len = self.types.len();

        for (id, ty) in self.iter() {
            if let Some(primitive) = ty.as_primitive() {
                check_layout(&ty.name, primitive.repr, primitive.byte_size, self.target)?;
            }
            if let Some(array) = ty.as_array() {
                if array.element.index() >= len {
                    return Err(InvariantError::MissingDependency {
                        name: ty.name.clone(),
                        dependency: array.element.to_string(),
                    });
                }
            }
            if !ty.is_class_like() {
                continue;
            }

            let mut current = id;
            let mut steps = 0;
            loop {
                let Some(next) = self.get(current).superclass() else {
                    if current == object {
                        break;
                    }
                    return Err(if current == id {
                        InvariantError::MultipleRoots { name: ty.name.clone() }
                    } else {
                        InvariantError::Orphan { name: ty.name.clone() }
                    });
                };
                if next.index() >= len {
                    return Err(InvariantError::MissingDependency {
                        name: self.get(current).name.clone(),
                        dependency: next.to_string(),
                    });
                }
                if !self.get(next).is_class_like() {
                    return Err(InvariantError::Orphan { name: ty.name.clone() });
                }
                steps += 1;
                if steps > len {
                    return Err(InvariantError::Cycle { name: ty.name.clone() });
                }
                current = next;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Poisoning
    // ========================================================================

    /// Mark the registry unusable. Called when a bootstrap step fails.
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Refuse to continue with a registry whose bootstrap failed.
    pub fn ensure_usable(&self) -> Result<(), BootstrapError> {
        if self.poisoned {
            Err(BootstrapError::InvalidRegistry)
        } else {
            Ok(())
        }
    }
}

fn check_layout(name: &str, repr: ReprId, declared: u32, target: Target) -> Result<(), InvariantError> {
    let expected = repr.storage_size(target);
    if declared == expected {
        Ok(())
    } else {
        Err(InvariantError::LayoutMismatch {
            name: name.to_string(),
            repr,
            declared,
            expected,
        })
    }
}

#[cfg(test)]
mod tests;
