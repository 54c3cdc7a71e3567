//! Compile-time type model.
//!
//! Every [`Type`] lives in a [`TypeRegistry`](crate::registry::TypeRegistry) arena and is addressed by a
//! registry-scoped [`TypeId`]. Types never hold references to each other, only ids, so the registry is the
//! single owner of the whole lattice.

use std::collections::BTreeMap;
use std::fmt;

use quartz_core::lang::repr::ReprId;

/// Index of a type inside the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A type position in a signature: either a registered type or `void`.
///
/// `void` is a sentinel, never a registry entry; it cannot be looked up or iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Void,
    Type(TypeId),
}

impl TypeRef {
    pub fn is_void(self) -> bool {
        matches!(self, TypeRef::Void)
    }

    pub fn id(self) -> Option<TypeId> {
        match self {
            TypeRef::Void => None,
            TypeRef::Type(id) => Some(id),
        }
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::Type(id)
    }
}

/// A registered type: name, variant payload, mixed-in modules and member table.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    /// Capability modules mixed in, in inclusion order.
    pub includes: Vec<TypeId>,
    pub methods: BTreeMap<String, MethodSig>,
}

impl Type {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            includes: Vec::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Direct superclass. Modules and libs sit outside the inheritance tree and always return `None`.
    pub fn superclass(&self) -> Option<TypeId> {
        match &self.kind {
            TypeKind::Object(object) => object.superclass,
            TypeKind::Primitive(primitive) => Some(primitive.superclass),
            TypeKind::Array(array) => array.superclass,
            TypeKind::Module | TypeKind::Lib(_) => None,
        }
    }

    /// Object, primitive and array types take part in single inheritance.
    pub fn is_class_like(&self) -> bool {
        matches!(self.kind, TypeKind::Object(_) | TypeKind::Primitive(_) | TypeKind::Array(_))
    }

    pub fn is_module(&self) -> bool {
        matches!(self.kind, TypeKind::Module)
    }

    pub fn method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.get(name)
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveType> {
        match &self.kind {
            TypeKind::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match &self.kind {
            TypeKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_lib(&self) -> Option<&LibType> {
        match &self.kind {
            TypeKind::Lib(lib) => Some(lib),
            _ => None,
        }
    }
}

/// Variant payload of a [`Type`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Object(ObjectType),
    Module,
    Primitive(PrimitiveType),
    Array(ArrayType),
    Lib(LibType),
}

impl TypeKind {
    /// Keyword-like label used in dumps and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Object(_) => "class",
            TypeKind::Module => "module",
            TypeKind::Primitive(_) => "primitive",
            TypeKind::Array(_) => "array",
            TypeKind::Lib(_) => "lib",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectType {
    /// `None` only for the root `Object`.
    pub superclass: Option<TypeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveType {
    pub superclass: TypeId,
    pub repr: ReprId,
    pub byte_size: u32,
}

/// Generic container. The builtin `Array` is the template; every specialization is a clone with its own
/// element type and a back-link to the template it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayType {
    pub superclass: Option<TypeId>,
    pub element: TypeId,
    /// `None` for a template, `Some(template)` for a specialization.
    pub template: Option<TypeId>,
}

/// Foreign-library binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibType {
    /// Native library to link; `None` (or empty) means nothing is linked.
    pub libname: Option<String>,
}

impl LibType {
    /// The library to link, if any. An empty name counts as none.
    pub fn link_name(&self) -> Option<&str> {
        self.libname.as_deref().filter(|name| !name.is_empty())
    }
}

/// Method or foreign-function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeRef,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeId,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self { name: name.into(), ty }
    }
}
