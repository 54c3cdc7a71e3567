//! Define the reserved keyword vocabulary of the Quartz declaration syntax.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a
//! const metadata table ([`KEYWORDS`]) that records canonical spellings, categories, and descriptions.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This registry is intentionally **pure** (no AST/IO/side effects).
//!
//! ## Examples
//! ```rust
//! use quartz_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("lib"), Some(KeywordId::Lib));
//! assert_eq!(keywords::from_str("Lib"), None);
//! assert_eq!(keywords::as_str(KeywordId::Fun), "fun");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Type declarations
    Class,
    Module,
    Lib,
    Primitive,

    // Members
    Def,
    Fun,
    Include,

    // Structure
    End,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Introduces a new (or re-opened) type.
    TypeDeclaration,
    /// Introduces a member of the enclosing type.
    Member,
    /// Closes a block.
    Structure,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(
        KeywordId::Class,
        "class",
        KeywordCategory::TypeDeclaration,
        "Declare or re-open a class (object, primitive, or array type).",
    ),
    info(
        KeywordId::Module,
        "module",
        KeywordCategory::TypeDeclaration,
        "Declare or re-open a capability module.",
    ),
    info(
        KeywordId::Lib,
        "lib",
        KeywordCategory::TypeDeclaration,
        "Declare a foreign-library binding, optionally naming the native library.",
    ),
    info(
        KeywordId::Primitive,
        "primitive",
        KeywordCategory::TypeDeclaration,
        "Declare a primitive machine type with its representation and byte size.",
    ),
    info(
        KeywordId::Def,
        "def",
        KeywordCategory::Member,
        "Declare a method signature.",
    ),
    info(
        KeywordId::Fun,
        "fun",
        KeywordCategory::Member,
        "Declare a foreign function inside a `lib` block.",
    ),
    info(
        KeywordId::Include,
        "include",
        KeywordCategory::Member,
        "Mix a capability module into the enclosing type.",
    ),
    info(KeywordId::End, "end", KeywordCategory::Structure, "Close a declaration block."),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
    }
}
