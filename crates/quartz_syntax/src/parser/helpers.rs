// ============================================================================
// Token cursor helpers
// ============================================================================

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // `lex` always terminates the stream with `Eof`; an empty slice is tolerated too.
        static EOF: Token = Token {
            kind: TokenKind::Eof,
            span: Span { start: 0, end: 0 },
        };
        self.tokens.get(self.pos).or_else(|| self.tokens.last()).unwrap_or(&EOF)
    }

    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            return self.peek().span;
        }
        self.tokens.get(self.pos - 1).map(|t| t.span).unwrap_or_default()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind == TokenKind::Keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind == TokenKind::Punctuation(id)
    }

    fn check_operator(&self, op: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Operator(o) if o == op)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<Span, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{}`", keywords::as_str(id))))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Span, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{}`", punctuation::as_str(id))))
        }
    }

    fn expect_operator(&mut self, op: &str) -> Result<Span, CompileError> {
        if self.check_operator(op) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{op}`")))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<Spanned<Ident>, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.advance().span;
                Ok(Spanned::new(name, span))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// A type name: an identifier starting with an uppercase ASCII letter.
    fn expect_type_name(&mut self) -> Result<Spanned<Ident>, CompileError> {
        let name = self.expect_ident("a type name")?;
        if name.node.starts_with(|c: char| c.is_ascii_uppercase()) {
            Ok(name)
        } else {
            Err(
                CompileError::new(format!("expected a type name, found `{}`", name.node), name.span)
                    .with_hint("type names start with an uppercase letter"),
            )
        }
    }

    /// Require the end of the current line (or of the file).
    fn expect_line_end(&mut self) -> Result<(), CompileError> {
        match self.peek().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
    }

    /// Error recovery: drop everything up to and including the next newline.
    fn skip_line(&mut self) {
        while !self.is_at_end() {
            if matches!(self.advance().kind, TokenKind::Newline) {
                break;
            }
        }
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let token = self.peek();
        CompileError::new(
            format!("expected {expected}, found {}", token.kind.describe()),
            token.span,
        )
    }
}
