// Parser core type and entrypoint.
//
// This file is `include!`'d into `crate::parser` to keep all parser methods in a
// single module while avoiding a single "god file".

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by skipping to the end of the
///   offending line, inside blocks as well as at the top level.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `quartz_syntax::lexer` (must end with `Eof`).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns every [`CompileError`] found. The parser keeps going after an error so one
    /// pass reports all problems in the file.
    pub fn parse(mut self) -> Result<Program, Vec<CompileError>> {
        let mut declarations = Vec::new();

        self.skip_newlines();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(decl) => declarations.push(decl),
                Err(e) => {
                    self.errors.push(e);
                    self.skip_line();
                }
            }
            self.skip_newlines();
        }

        if self.errors.is_empty() {
            Ok(Program { declarations })
        } else {
            Err(self.errors)
        }
    }
}
