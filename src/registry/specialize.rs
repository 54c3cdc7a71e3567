//! Generic container specialization.
//!
//! A specialization is a clone of the `Array` template with its own element type: a separate registry entry
//! with a fresh [`TypeId`], linked back to the template it came from. Instances are cached per
//! `(template, element)` so `Array[String]` always resolves to the same entry (the builtin `ARGV`).

use super::TypeRegistry;
use crate::error::DeclarationError;
use crate::types::*;

impl TypeRegistry {
    /// Build (but do not register) a clone of the array template behind `template`.
    ///
    /// Returns `None` if `template` is not an array. Specializing a specialization clones its template.
    pub(super) fn clone_array(&self, template: TypeId, element: TypeId, name: String) -> Option<Type> {
        let array = self.get(template).as_array()?;
        let template = array.template.unwrap_or(template);
        let source = self.get(template);
        let source_array = source.as_array()?;

        let mut ty = Type::new(
            name,
            TypeKind::Array(ArrayType {
                superclass: source_array.superclass,
                element,
                template: Some(template),
            }),
        );
        ty.includes = source.includes.clone();
        Some(ty)
    }

    fn template_of(&self, id: TypeId) -> Result<TypeId, DeclarationError> {
        match self.get(id).as_array() {
            Some(array) => Ok(array.template.unwrap_or(id)),
            None => Err(DeclarationError::NotGeneric {
                name: self.get(id).name.clone(),
            }),
        }
    }

    /// Register a new specialization of `template` over `element`.
    ///
    /// `name` defaults to `Template[Element]`. The first specialization for a given pair becomes the cached
    /// instance.
    pub fn specialize_array(
        &mut self,
        template: TypeId,
        element: TypeId,
        name: Option<&str>,
    ) -> Result<TypeId, DeclarationError> {
        let template = self.template_of(template)?;
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("{}[{}]", self.get(template).name, self.get(element).name),
        };
        let ty = self
            .clone_array(template, element, name)
            .ok_or_else(|| DeclarationError::NotGeneric {
                name: self.get(template).name.clone(),
            })?;
        let id = self.register(ty)?;
        self.instances.entry((template, element)).or_insert(id);
        tracing::debug!(name = %self.get(id).name, "specialized array");
        Ok(id)
    }

    /// Cached specialization of `template` over `element`, created on first use.
    pub fn instantiate(&mut self, template: TypeId, element: TypeId) -> Result<TypeId, DeclarationError> {
        let template = self.template_of(template)?;
        if let Some(id) = self.cached_instance(template, element) {
            return Ok(id);
        }
        self.specialize_array(template, element, None)
    }

    /// `Array[element]`.
    pub fn array_of(&mut self, element: TypeId) -> Result<TypeId, DeclarationError> {
        self.instantiate(self.array(), element)
    }

    pub fn cached_instance(&self, template: TypeId, element: TypeId) -> Option<TypeId> {
        self.instances.get(&(template, element)).copied()
    }

    /// Change the element type of `array`. Only that entry changes; its template and sibling instances keep
    /// their own element types.
    pub fn rebind_element(&mut self, array: TypeId, element: TypeId) -> Result<(), DeclarationError> {
        let ty = &mut self.types[array.index()];
        let TypeKind::Array(payload) = &mut ty.kind else {
            return Err(DeclarationError::NotGeneric { name: ty.name.clone() });
        };
        let previous = payload.element;
        payload.element = element;

        if let Some(template) = payload.template {
            if self.instances.get(&(template, previous)) == Some(&array) {
                self.instances.remove(&(template, previous));
            }
            self.instances.entry((template, element)).or_insert(array);
        }
        Ok(())
    }
}
