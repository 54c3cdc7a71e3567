//! Bootstrap of the closed builtin set.
//!
//! Order matters: every entry may only refer to entries registered before it.

use quartz_core::lang::repr::ReprId;
use quartz_core::lang::types::builtins::{self, BuiltinTypeId};

use super::{TypeRegistry, check_layout};
use crate::error::InvariantError;
use crate::types::*;

/// Storage a primitive leaf declares.
#[derive(Debug, Clone, Copy)]
enum LeafSize {
    Bytes(u32),
    /// One machine pointer on the registry's target.
    Pointer,
}

#[derive(Debug, Clone, Copy)]
struct PrimitiveLeaf {
    id: BuiltinTypeId,
    superclass: BuiltinTypeId,
    repr: ReprId,
    size: LeafSize,
}

const fn leaf(id: BuiltinTypeId, superclass: BuiltinTypeId, repr: ReprId, size: LeafSize) -> PrimitiveLeaf {
    PrimitiveLeaf {
        id,
        superclass,
        repr,
        size,
    }
}

/// Primitive leaves in registration order.
const PRIMITIVE_LEAVES: &[PrimitiveLeaf] = &[
    leaf(BuiltinTypeId::Bool, BuiltinTypeId::Value, ReprId::I1, LeafSize::Bytes(1)),
    leaf(BuiltinTypeId::Char, BuiltinTypeId::Value, ReprId::I8, LeafSize::Bytes(1)),
    leaf(BuiltinTypeId::Int, BuiltinTypeId::Numeric, ReprId::I32, LeafSize::Bytes(4)),
    leaf(BuiltinTypeId::Long, BuiltinTypeId::Numeric, ReprId::I64, LeafSize::Bytes(8)),
    leaf(BuiltinTypeId::Float, BuiltinTypeId::Numeric, ReprId::F32, LeafSize::Bytes(4)),
    leaf(BuiltinTypeId::String, BuiltinTypeId::Value, ReprId::Ptr, LeafSize::Pointer),
    leaf(BuiltinTypeId::Symbol, BuiltinTypeId::Value, ReprId::I32, LeafSize::Bytes(4)),
    leaf(BuiltinTypeId::Pointer, BuiltinTypeId::Value, ReprId::Ptr, LeafSize::Pointer),
];

/// Return type of an intrinsic operation.
#[derive(Debug, Clone, Copy)]
enum Returns {
    /// The receiver's own type.
    Receiver,
    Builtin(BuiltinTypeId),
}

/// Binary operations a group of primitives carries from construction. Each takes `other` of the receiver's
/// type.
#[derive(Debug, Clone, Copy)]
struct Intrinsic {
    owners: &'static [BuiltinTypeId],
    names: &'static [&'static str],
    returns: Returns,
}

const NUMBERS: &[BuiltinTypeId] = &[BuiltinTypeId::Int, BuiltinTypeId::Long, BuiltinTypeId::Float];
const INTEGERS: &[BuiltinTypeId] = &[BuiltinTypeId::Int, BuiltinTypeId::Long];
const ORDERED: &[BuiltinTypeId] = &[
    BuiltinTypeId::Char,
    BuiltinTypeId::Int,
    BuiltinTypeId::Long,
    BuiltinTypeId::Float,
];
const EQUATABLE: &[BuiltinTypeId] = &[
    BuiltinTypeId::Bool,
    BuiltinTypeId::Char,
    BuiltinTypeId::Int,
    BuiltinTypeId::Long,
    BuiltinTypeId::Float,
    BuiltinTypeId::Symbol,
];

const INTRINSICS: &[Intrinsic] = &[
    Intrinsic {
        owners: NUMBERS,
        names: &["+", "-", "*", "/"],
        returns: Returns::Receiver,
    },
    Intrinsic {
        owners: INTEGERS,
        names: &["%"],
        returns: Returns::Receiver,
    },
    Intrinsic {
        owners: ORDERED,
        names: &["<", "<=", ">", ">="],
        returns: Returns::Builtin(BuiltinTypeId::Bool),
    },
    Intrinsic {
        owners: NUMBERS,
        names: &["<=>"],
        returns: Returns::Builtin(BuiltinTypeId::Int),
    },
    Intrinsic {
        owners: EQUATABLE,
        names: &["==", "!="],
        returns: Returns::Builtin(BuiltinTypeId::Bool),
    },
];

impl TypeRegistry {
    pub(super) fn bootstrap_builtins(&mut self) -> Result<(), InvariantError> {
        let object = self.insert_builtin(BuiltinTypeId::Object, TypeKind::Object(ObjectType { superclass: None }));
        let value = self.insert_builtin(
            BuiltinTypeId::Value,
            TypeKind::Object(ObjectType {
                superclass: Some(object),
            }),
        );
        self.insert_builtin(
            BuiltinTypeId::Numeric,
            TypeKind::Object(ObjectType {
                superclass: Some(value),
            }),
        );
        let enumerable = self.insert_builtin(BuiltinTypeId::Enumerable, TypeKind::Module);

        // The template's element is a placeholder until specialized.
        let array = self.insert_builtin(
            BuiltinTypeId::Array,
            TypeKind::Array(ArrayType {
                superclass: Some(object),
                element: object,
                template: None,
            }),
        );
        self.types[array.index()].includes.push(enumerable);

        for leaf in PRIMITIVE_LEAVES {
            let superclass = self.builtin_dependency(leaf.id, leaf.superclass)?;
            let byte_size = match leaf.size {
                LeafSize::Bytes(bytes) => bytes,
                LeafSize::Pointer => self.target.pointer_size,
            };
            check_layout(builtins::as_str(leaf.id), leaf.repr, byte_size, self.target)?;
            self.insert_builtin(
                leaf.id,
                TypeKind::Primitive(PrimitiveType {
                    superclass,
                    repr: leaf.repr,
                    byte_size,
                }),
            );
        }

        let string = self.builtin_dependency(BuiltinTypeId::Argv, BuiltinTypeId::String)?;
        let argv = self
            .clone_array(array, string, builtins::as_str(BuiltinTypeId::Argv).to_string())
            .ok_or_else(|| InvariantError::MissingDependency {
                name: builtins::as_str(BuiltinTypeId::Argv).to_string(),
                dependency: builtins::as_str(BuiltinTypeId::Array).to_string(),
            })?;
        let argv = self.insert(argv);
        self.builtins.insert(BuiltinTypeId::Argv, argv);
        self.instances.insert((array, string), argv);

        self.define_intrinsics()?;

        self.symbols.clear();
        self.verify()
    }

    /// Attach the intrinsic operations to the primitive leaves. Adds members only, never entries.
    fn define_intrinsics(&mut self) -> Result<(), InvariantError> {
        for intrinsic in INTRINSICS {
            for &owner in intrinsic.owners {
                let receiver = self.builtin_dependency(owner, owner)?;
                let returns = match intrinsic.returns {
                    Returns::Receiver => receiver,
                    Returns::Builtin(id) => self.builtin_dependency(owner, id)?,
                };
                let methods = &mut self.types[receiver.index()].methods;
                for &name in intrinsic.names {
                    let sig = MethodSig::new(name, vec![Param::new("other", receiver)], returns.into());
                    methods.insert(name.to_string(), sig);
                }
            }
        }
        Ok(())
    }

    fn insert_builtin(&mut self, id: BuiltinTypeId, kind: TypeKind) -> TypeId {
        let type_id = self.insert(Type::new(builtins::as_str(id), kind));
        self.builtins.insert(id, type_id);
        type_id
    }

    fn builtin_dependency(&self, dependent: BuiltinTypeId, id: BuiltinTypeId) -> Result<TypeId, InvariantError> {
        self.builtins
            .get(&id)
            .copied()
            .ok_or_else(|| InvariantError::MissingDependency {
                name: builtins::as_str(dependent).to_string(),
                dependency: builtins::as_str(id).to_string(),
            })
    }
}
