//! Abstract syntax tree for Quartz declaration files.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A declaration file is a sequence of declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Spanned<Declaration>>,
}

/// Top-level declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDecl),
    Module(ModuleDecl),
    Lib(LibDecl),
    Primitive(PrimitiveDecl),
    /// Top-level `def`, owned by the `main` module.
    Method(MethodDecl),
    /// Top-level `include`, mixed into the `main` module.
    Include(Spanned<Ident>),
}

/// `class Name [< Super] ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Spanned<Ident>,
    pub superclass: Option<Spanned<Ident>>,
    pub members: Vec<Spanned<Member>>,
}

/// `module Name ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub name: Spanned<Ident>,
    pub members: Vec<Spanned<Member>>,
}

/// Body item of a class or module.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Method(MethodDecl),
    Include(Spanned<Ident>),
}

/// `lib Name["(" "libname" ")"] ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct LibDecl {
    pub name: Spanned<Ident>,
    /// Native library to link against. `None` when the declaration names no library.
    pub libname: Option<Spanned<String>>,
    pub functions: Vec<Spanned<MethodDecl>>,
}

/// `primitive Name < Super : repr size`
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveDecl {
    pub name: Spanned<Ident>,
    pub superclass: Spanned<Ident>,
    pub repr: Spanned<Ident>,
    pub size: Spanned<u32>,
}

/// Method (or foreign function) signature.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<Param>>,
    /// `None` means the method returns no value.
    pub return_type: Option<Spanned<TypeExpr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Spanned<TypeExpr>,
}

/// Type reference as written in a signature.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Named(Ident),
    /// `Base[Arg]`, e.g. `Array[String]`.
    Generic { base: Ident, arg: Box<Spanned<TypeExpr>> },
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{name}"),
            TypeExpr::Generic { base, arg } => write!(f, "{base}[{}]", arg.node),
        }
    }
}
