//! Human-readable registry dump (`quartz types`).
//!
//! One header line per entry in registration order, members indented below it:
//!
//! ```text
//! class Value < Object
//! primitive Int < Numeric : i32 4
//!   def +(other : Int) : Int
//! array ARGV < Object of String include Enumerable
//! lib LibM("m")
//!   fun sqrt(x : Float) : Float
//! ```

use std::fmt::Write;

use super::TypeRegistry;
use crate::types::*;

impl TypeRegistry {
    /// Dump every entry, then `main` if anything was declared on it.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (id, _) in self.iter() {
            self.write_entry(&mut out, self.get(id));
        }
        let main = self.main();
        if !main.methods.is_empty() || !main.includes.is_empty() {
            self.write_entry(&mut out, main);
        }
        out
    }

    /// Header line of a type, e.g. `primitive Int < Numeric : i32 4`.
    pub fn describe_type(&self, ty: &Type) -> String {
        let mut line = format!("{} {}", ty.kind.label(), ty.name);
        if let Some(superclass) = ty.superclass() {
            let _ = write!(line, " < {}", self.get(superclass).name);
        }
        match &ty.kind {
            TypeKind::Primitive(primitive) => {
                let _ = write!(line, " : {} {}", primitive.repr, primitive.byte_size);
            }
            TypeKind::Array(array) => {
                let _ = write!(line, " of {}", self.get(array.element).name);
            }
            TypeKind::Lib(lib) => {
                if let Some(libname) = &lib.libname {
                    let _ = write!(line, "({libname:?})");
                }
            }
            TypeKind::Object(_) | TypeKind::Module => {}
        }
        if !ty.includes.is_empty() {
            let names: Vec<&str> = ty.includes.iter().map(|&m| self.get(m).name.as_str()).collect();
            let _ = write!(line, " include {}", names.join(", "));
        }
        line
    }

    /// Signature as it would be written in a declaration file, e.g. `def [](index : Int) : Object`.
    pub fn describe_method(&self, keyword: &str, sig: &MethodSig) -> String {
        let mut line = format!("{keyword} {}", sig.name);
        if !sig.params.is_empty() {
            let params: Vec<String> = sig
                .params
                .iter()
                .map(|p| format!("{} : {}", p.name, self.get(p.ty).name))
                .collect();
            let _ = write!(line, "({})", params.join(", "));
        }
        if let TypeRef::Type(ret) = sig.return_type {
            let _ = write!(line, " : {}", self.get(ret).name);
        }
        line
    }

    fn write_entry(&self, out: &mut String, ty: &Type) {
        let _ = writeln!(out, "{}", self.describe_type(ty));
        let keyword = if matches!(ty.kind, TypeKind::Lib(_)) { "fun" } else { "def" };
        for sig in ty.methods.values() {
            let _ = writeln!(out, "  {}", self.describe_method(keyword, sig));
        }
    }
}
