//! Method lookup over capability composition.
//!
//! Three tiers, searched in order for each class on the superclass chain:
//! 1. the type's own members (an array instance also sees its template's),
//! 2. its included modules, depth-first, each module at most once,
//! 3. then the same two tiers on the superclass, up to `Object`.

use std::collections::HashSet;

use super::{Owner, TypeRegistry};
use crate::types::{MethodSig, TypeId};

/// A successful lookup: the signature and the type (or `main`) it was declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodMatch<'a> {
    pub owner: Owner,
    pub sig: &'a MethodSig,
}

impl TypeRegistry {
    /// Resolve `name` on `ty`.
    pub fn lookup_method(&self, ty: TypeId, name: &str) -> Option<MethodMatch<'_>> {
        let mut visited = HashSet::new();
        let mut current = Some(ty);
        let mut steps = 0;

        while let Some(id) = current {
            if let Some(found) = self.own_method(id, name) {
                return Some(found);
            }
            for modules in self.mixin_lists(id) {
                if let Some(found) = self.included_method(modules, name, &mut visited) {
                    return Some(found);
                }
            }

            steps += 1;
            if steps > self.len() {
                break;
            }
            current = self.superclass(id);
        }
        None
    }

    /// Resolve a top-level `name` on `main` and the modules it includes.
    pub fn lookup_global(&self, name: &str) -> Option<MethodMatch<'_>> {
        if let Some(sig) = self.main().method(name) {
            return Some(MethodMatch {
                owner: Owner::Main,
                sig,
            });
        }
        self.included_method(&self.main().includes, name, &mut HashSet::new())
    }

    /// Does `ty` (or any ancestor) mix in `module`, directly or through another module?
    pub fn includes_module(&self, ty: TypeId, module: TypeId) -> bool {
        let mut visited = HashSet::new();
        std::iter::once(ty)
            .chain(self.ancestors(ty))
            .any(|id| {
                self.mixin_lists(id)
                    .into_iter()
                    .any(|modules| self.reaches_module(modules, module, &mut visited))
            })
    }

    fn own_method(&self, id: TypeId, name: &str) -> Option<MethodMatch<'_>> {
        let ty = self.get(id);
        if let Some(sig) = ty.method(name) {
            return Some(MethodMatch {
                owner: Owner::Type(id),
                sig,
            });
        }
        let template = ty.as_array()?.template?;
        self.get(template).method(name).map(|sig| MethodMatch {
            owner: Owner::Type(template),
            sig,
        })
    }

    /// Own includes first, then (for array instances) the template's.
    fn mixin_lists(&self, id: TypeId) -> Vec<&[TypeId]> {
        let ty = self.get(id);
        let mut lists = vec![ty.includes.as_slice()];
        if let Some(template) = ty.as_array().and_then(|array| array.template) {
            lists.push(self.get(template).includes.as_slice());
        }
        lists
    }

    fn included_method(
        &self,
        modules: &[TypeId],
        name: &str,
        visited: &mut HashSet<TypeId>,
    ) -> Option<MethodMatch<'_>> {
        for &module in modules {
            if !visited.insert(module) {
                continue;
            }
            let ty = self.get(module);
            if let Some(sig) = ty.method(name) {
                return Some(MethodMatch {
                    owner: Owner::Type(module),
                    sig,
                });
            }
            if let Some(found) = self.included_method(&ty.includes, name, visited) {
                return Some(found);
            }
        }
        None
    }

    fn reaches_module(&self, modules: &[TypeId], target: TypeId, visited: &mut HashSet<TypeId>) -> bool {
        modules.iter().any(|&module| {
            module == target || (visited.insert(module) && self.reaches_module(&self.get(module).includes, target, visited))
        })
    }
}
