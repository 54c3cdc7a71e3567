// ============================================================================
// Declarations
// ============================================================================

impl<'a> Parser<'a> {
    fn declaration(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let start = self.peek().span;
        let kind = self.peek().kind.clone();
        let decl = match kind {
            TokenKind::Keyword(KeywordId::Class) => Declaration::Class(self.class_decl()?),
            TokenKind::Keyword(KeywordId::Module) => Declaration::Module(self.module_decl()?),
            TokenKind::Keyword(KeywordId::Lib) => Declaration::Lib(self.lib_decl()?),
            TokenKind::Keyword(KeywordId::Primitive) => Declaration::Primitive(self.primitive_decl()?),
            TokenKind::Keyword(KeywordId::Def) => {
                let method = self.method_decl(KeywordId::Def)?;
                self.expect_line_end()?;
                Declaration::Method(method)
            }
            TokenKind::Keyword(KeywordId::Include) => {
                let module = self.include()?;
                self.expect_line_end()?;
                Declaration::Include(module)
            }
            TokenKind::Keyword(KeywordId::End) => {
                return Err(CompileError::new("`end` without a matching block", start)
                    .with_hint("remove it, or check the block it was meant to close"));
            }
            _ => return Err(self.unexpected("a declaration")),
        };
        Ok(Spanned::new(decl, start.merge(self.previous_span())))
    }

    /// `class Name [< Super] NL { member } end`
    fn class_decl(&mut self) -> Result<ClassDecl, CompileError> {
        self.expect_keyword(KeywordId::Class)?;
        let name = self.expect_type_name()?;
        let superclass = if self.check_operator("<") {
            self.advance();
            Some(self.expect_type_name()?)
        } else {
            None
        };
        self.expect_line_end()?;
        let members = self.members("class", &name)?;
        Ok(ClassDecl {
            name,
            superclass,
            members,
        })
    }

    /// `module Name NL { member } end`
    fn module_decl(&mut self) -> Result<ModuleDecl, CompileError> {
        self.expect_keyword(KeywordId::Module)?;
        let name = self.expect_type_name()?;
        self.expect_line_end()?;
        let members = self.members("module", &name)?;
        Ok(ModuleDecl { name, members })
    }

    /// `lib Name [("libname")] NL { fun } end`
    fn lib_decl(&mut self) -> Result<LibDecl, CompileError> {
        self.expect_keyword(KeywordId::Lib)?;
        let name = self.expect_type_name()?;
        let libname = if self.match_punct(PunctuationId::LParen) {
            let libname = match &self.peek().kind {
                TokenKind::String(value) => {
                    let value = value.clone();
                    Spanned::new(value, self.advance().span)
                }
                _ => return Err(self.unexpected("a library name string")),
            };
            self.expect_punct(PunctuationId::RParen)?;
            Some(libname)
        } else {
            None
        };
        self.expect_line_end()?;

        let mut functions = Vec::new();
        self.block(&name, "lib", |parser| {
            let start = parser.peek().span;
            let fun = parser.method_decl(KeywordId::Fun)?;
            parser.expect_line_end()?;
            functions.push(Spanned::new(fun, start.merge(parser.previous_span())));
            Ok(())
        })?;

        Ok(LibDecl {
            name,
            libname,
            functions,
        })
    }

    /// `primitive Name < Super : repr size`
    fn primitive_decl(&mut self) -> Result<PrimitiveDecl, CompileError> {
        self.expect_keyword(KeywordId::Primitive)?;
        let name = self.expect_type_name()?;
        self.expect_operator("<").map_err(|e| e.with_hint("primitives must name their superclass"))?;
        let superclass = self.expect_type_name()?;
        self.expect_punct(PunctuationId::Colon)?;
        let repr = self.expect_ident("a representation tag (e.g. `i32`)")?;
        let size = match self.peek().kind {
            TokenKind::Int(value) => {
                let span = self.advance().span;
                let bytes = u32::try_from(value)
                    .map_err(|_| CompileError::new(format!("byte size {value} is out of range"), span))?;
                Spanned::new(bytes, span)
            }
            _ => return Err(self.unexpected("a byte size")),
        };
        self.expect_line_end()?;
        Ok(PrimitiveDecl {
            name,
            superclass,
            repr,
            size,
        })
    }

    /// Body of a class or module: methods and includes up to the closing `end`.
    fn members(&mut self, what: &str, owner: &Spanned<Ident>) -> Result<Vec<Spanned<Member>>, CompileError> {
        let mut members = Vec::new();
        self.block(owner, what, |parser| {
            let start = parser.peek().span;
            let member = match parser.peek().kind {
                TokenKind::Keyword(KeywordId::Def) => Member::Method(parser.method_decl(KeywordId::Def)?),
                TokenKind::Keyword(KeywordId::Include) => Member::Include(parser.include()?),
                _ => return Err(parser.unexpected("`def`, `include` or `end`")),
            };
            parser.expect_line_end()?;
            members.push(Spanned::new(member, start.merge(parser.previous_span())));
            Ok(())
        })?;
        Ok(members)
    }

    /// Drive `item` once per body line until `end`. Errors inside the body are recorded and
    /// the offending line skipped; only a missing `end` aborts the block.
    fn block(
        &mut self,
        owner: &Spanned<Ident>,
        what: &str,
        mut item: impl FnMut(&mut Self) -> Result<(), CompileError>,
    ) -> Result<(), CompileError> {
        loop {
            self.skip_newlines();
            if self.check_keyword(KeywordId::End) {
                self.advance();
                return self.expect_line_end();
            }
            if self.is_at_end() {
                return Err(CompileError::new(
                    format!("expected `end` to close `{what} {}`", owner.node),
                    owner.span,
                ));
            }
            if let Err(e) = item(self) {
                self.errors.push(e);
                self.skip_line();
            }
        }
    }

    fn include(&mut self) -> Result<Spanned<Ident>, CompileError> {
        self.expect_keyword(KeywordId::Include)?;
        self.expect_type_name()
    }

    /// `def name [(params)] [: Type]` (or `fun ...` inside a lib)
    fn method_decl(&mut self, keyword: KeywordId) -> Result<MethodDecl, CompileError> {
        self.expect_keyword(keyword)?;
        let name = if keyword == KeywordId::Def {
            self.method_name()?
        } else {
            self.expect_ident("a function name")?
        };

        let mut params = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            if !self.check_punct(PunctuationId::RParen) {
                loop {
                    params.push(self.param()?);
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
            }
            self.expect_punct(PunctuationId::RParen)?;
        }

        let return_type = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };

        Ok(MethodDecl {
            name,
            params,
            return_type,
        })
    }

    /// Identifier, operator run, `[]` or `[]=`.
    fn method_name(&mut self) -> Result<Spanned<Ident>, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(_) => {
                let mut name = self.expect_ident("a method name")?;
                // `def value=(v : Int)` declares a setter when `=` touches the name.
                if self.check_operator("=") && self.peek().span.start == name.span.end {
                    let eq = self.advance().span;
                    name.node.push('=');
                    name.span = name.span.merge(eq);
                }
                Ok(name)
            }
            TokenKind::Operator(op) => {
                let op = op.clone();
                let span = self.advance().span;
                Ok(Spanned::new(op, span))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                let start = self.advance().span;
                let end = self.expect_punct(PunctuationId::RBracket)?;
                if self.check_operator("=") {
                    let eq = self.advance().span;
                    Ok(Spanned::new("[]=".to_string(), start.merge(eq)))
                } else {
                    Ok(Spanned::new("[]".to_string(), start.merge(end)))
                }
            }
            _ => Err(self.unexpected("a method name")),
        }
    }

    fn param(&mut self) -> Result<Spanned<Param>, CompileError> {
        let name = self.expect_ident("a parameter name")?;
        self.expect_punct(PunctuationId::Colon)
            .map_err(|e| e.with_hint(format!("give `{}` a type, e.g. `{} : Int`", name.node, name.node)))?;
        let ty = self.type_expr()?;
        let span = name.span.merge(ty.span);
        Ok(Spanned::new(Param { name: name.node, ty }, span))
    }
}
