// ============================================================================
// Type references
// ============================================================================

impl<'a> Parser<'a> {
    /// `Name` or `Name[Arg]`
    fn type_expr(&mut self) -> Result<Spanned<TypeExpr>, CompileError> {
        let base = self.expect_type_name()?;
        if self.match_punct(PunctuationId::LBracket) {
            let arg = self.type_expr()?;
            let close = self.expect_punct(PunctuationId::RBracket)?;
            Ok(Spanned::new(
                TypeExpr::Generic {
                    base: base.node,
                    arg: Box::new(arg),
                },
                base.span.merge(close),
            ))
        } else {
            Ok(Spanned::new(TypeExpr::Named(base.node), base.span))
        }
    }
}
