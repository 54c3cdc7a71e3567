//! Foreign-library collection for the linker.

use super::TypeRegistry;

impl TypeRegistry {
    /// Native libraries to link, in registration order.
    ///
    /// Every lib binding with a non-empty library name contributes it; bindings without one are skipped.
    /// Duplicates are kept.
    pub fn library_names(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|(_, ty)| ty.as_lib())
            .filter_map(|lib| lib.link_name())
            .collect()
    }
}
