//! The recursive-descent grammar.
//!
//! Expression precedence, loosest first: comma, assignment, `or`, `and`,
//! equality, comparison, term, factor, unary, call, primary. Statements:
//! expression-statement, `print`, `var`, `fun`, block, `if`/`else`,
//! `while`, `for` (desugared to block + while), `return`.
//!
//! Nodes are produced through the injected [`NodeBuilder`], so the same
//! grammar code yields boxed, shared or arena trees. Tokens come from the
//! injected [`TokenSource`].
//!
//! Two entry points: [`parse`](Parser::parse) runs to end of input,
//! [`parse_repl`](Parser::parse_repl) stops at a top-level newline so a
//! driver can interleave parsing with evaluation line by line. In REPL
//! mode a top-level expression that runs into a newline instead of `;`
//! becomes a `print` statement (`1 + 1` at the prompt answers back).
//!
//! On a parse error the current statement is abandoned and the parser
//! discards tokens up to a `;` or the start of the next statement, then
//! resumes. Errors accumulate in [`errors`](Parser::errors).

use tracing::debug;

use larch_ir::build::{ExprRef, StmtRef};
use larch_ir::{Name, NodeBuilder, Policy, Token, TokenKind, TranslationUnit};

use crate::error::ParseError;
use crate::source::TokenSource;

type PResult<T> = Result<T, ParseError>;

/// An expression plus what it would mean as an assignment target: `Some`
/// only for a bare variable reference, which is the only valid target.
struct ParsedExpr<P: Policy> {
    node: P::ExprRef,
    target: Option<Name>,
}

impl<P: Policy> ParsedExpr<P> {
    fn plain(node: P::ExprRef) -> Self {
        ParsedExpr { node, target: None }
    }

    fn var(node: P::ExprRef, name: Name) -> Self {
        ParsedExpr {
            node,
            target: Some(name),
        }
    }
}

pub struct Parser<S, B> {
    source: S,
    builder: B,
    lookahead: Option<Token>,
    /// Latched once an `Eof` token is consumed; every later read sees it
    /// again until [`reset`](Self::reset).
    eof: Option<Token>,
    /// Brace/paren nesting depth in REPL mode; `-1` in file mode, which
    /// disables every newline-sensitive rule.
    scope_level: i32,
    /// Set when a top-level REPL expression runs into a newline; freezes
    /// token matching until the expression statement converts itself into
    /// a `print`.
    suspend_matching: bool,
    errors: Vec<ParseError>,
}

impl<S: TokenSource, B: NodeBuilder> Parser<S, B> {
    pub fn new(source: S, builder: B) -> Self {
        Parser {
            source,
            builder,
            lookahead: None,
            eof: None,
            scope_level: -1,
            suspend_matching: false,
            errors: Vec::new(),
        }
    }

    /// Parse until end of input.
    pub fn parse(&mut self) -> TranslationUnit<B::P> {
        self.scope_level = -1;
        self.run(false)
    }

    /// Parse one line's worth of top-level statements, returning at the
    /// newline (or end of input) that closes it.
    pub fn parse_repl(&mut self) -> TranslationUnit<B::P> {
        self.scope_level = 0;
        self.run(true)
    }

    fn run(&mut self, stop_at_newline: bool) -> TranslationUnit<B::P> {
        let mut unit = TranslationUnit::new();
        while self.match_kind(TokenKind::Eof).is_none() {
            if let Some(stmt) = self.declaration() {
                unit.statements.push(stmt);
            }
            if stop_at_newline && self.match_newline() {
                break;
            }
        }
        debug!(
            statements = unit.statements.len(),
            errors = self.errors.len(),
            "parse pass done"
        );
        unit
    }

    /// Re-arm the parser after it has consumed `Eof`, for REPL loops that
    /// keep feeding the same parser from a live source. The lookahead still
    /// holds the `Eof` token, so it is dropped along with the latch.
    pub fn reset(&mut self) {
        self.lookahead = None;
        self.eof = None;
    }

    /// Whether `Eof` has been consumed.
    pub fn at_eof(&self) -> bool {
        self.eof.is_some()
    }

    /// Errors accumulated so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// The builder, typically to reach the arena after parsing.
    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn into_builder(self) -> B {
        self.builder
    }

    // ---- token plumbing -------------------------------------------------

    fn peek(&mut self) -> Token {
        if let Some(eof) = self.eof {
            return eof;
        }
        match self.lookahead {
            Some(token) => token,
            None => {
                let token = self.source.next_token().unwrap_or_else(|| Token::eof(0, 0));
                self.lookahead = Some(token);
                token
            }
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            self.eof = Some(token);
        } else {
            self.lookahead = None;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Consume a top-level newline boundary without skipping past it.
    fn match_newline(&mut self) -> bool {
        if self.peek().kind == TokenKind::Newline {
            self.advance();
            return true;
        }
        false
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.skip_newlines();
        self.peek().kind == kind
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.suspend_matching {
            return None;
        }
        self.skip_newlines();
        let token = self.peek();
        if kinds.contains(&token.kind) {
            return Some(self.advance());
        }
        None
    }

    fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.match_kinds(&[kind])
    }

    fn expected(&mut self, expected: &'static str) -> ParseError {
        let found = self.peek();
        ParseError::Expected {
            expected,
            found: found.kind,
            line: found.line,
            column: found.column,
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> PResult<Token> {
        match self.match_kind(kind) {
            Some(token) => Ok(token),
            None => Err(self.expected(expected)),
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> PResult<Name> {
        if self.suspend_matching {
            return Err(self.expected(expected));
        }
        self.skip_newlines();
        if let TokenKind::Ident(name) = self.peek().kind {
            self.advance();
            return Ok(name);
        }
        Err(self.expected(expected))
    }

    /// Track nesting for the REPL's newline-sensitive rules; file mode
    /// (`scope_level == -1`) stays untouched.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.scope_level >= 0 {
            self.scope_level += 1;
        }
        let out = f(self);
        if self.scope_level > 0 {
            self.scope_level -= 1;
        }
        out
    }

    // ---- statements -----------------------------------------------------

    fn declaration(&mut self) -> Option<StmtRef<B::P>> {
        loop {
            if self.check(TokenKind::Eof) {
                return None;
            }
            let result = if self.match_kind(TokenKind::Var).is_some() {
                self.var_declaration()
            } else if self.match_kind(TokenKind::Fun).is_some() {
                self.fun_declaration()
            } else {
                self.statement()
            };
            match result {
                Ok(stmt) => return Some(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }
    }

    fn var_declaration(&mut self) -> PResult<StmtRef<B::P>> {
        let name = self.expect_ident("a variable name")?;
        let init = if self.match_kind(TokenKind::Eq).is_some() {
            Some(self.expression()?.node)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.builder.var_decl(name, init))
    }

    fn fun_declaration(&mut self) -> PResult<StmtRef<B::P>> {
        let name = self.expect_ident("a function name")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect_ident("a parameter name")?);
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        self.with_scope(|p| {
            p.expect(TokenKind::LBrace, "'{'")?;
            let mut body = Vec::new();
            while !p.check(TokenKind::RBrace) && !p.check(TokenKind::Eof) {
                match p.declaration() {
                    Some(stmt) => body.push(stmt),
                    None => break,
                }
            }
            p.expect(TokenKind::RBrace, "'}'")?;
            Ok(p.builder.fun_decl(name, params, body))
        })
    }

    fn statement(&mut self) -> PResult<StmtRef<B::P>> {
        if self.match_kind(TokenKind::For).is_some() {
            return self.for_statement();
        }
        if self.match_kind(TokenKind::While).is_some() {
            return self.while_statement();
        }
        if self.match_kind(TokenKind::If).is_some() {
            return self.if_statement();
        }
        if self.match_kind(TokenKind::Print).is_some() {
            return self.print_statement();
        }
        if self.match_kind(TokenKind::Return).is_some() {
            return self.return_statement();
        }
        if self.match_kind(TokenKind::LBrace).is_some() {
            return self.block();
        }
        self.expression_statement()
    }

    /// `for` has no node of its own: it desugars to an optional prelude
    /// block around a while loop, with the increment appended to the body.
    fn for_statement(&mut self) -> PResult<StmtRef<B::P>> {
        self.with_scope(|p| {
            p.expect(TokenKind::LParen, "'('")?;

            let mut prelude: Vec<StmtRef<B::P>> = Vec::new();
            if p.match_kind(TokenKind::Var).is_some() {
                prelude.push(p.var_declaration()?);
            } else if p.match_kind(TokenKind::Semicolon).is_none() {
                prelude.push(p.expression_statement()?);
            }

            let condition = if p.check(TokenKind::Semicolon) {
                p.builder.bool_lit(true)
            } else {
                p.expression()?.node
            };
            p.expect(TokenKind::Semicolon, "';'")?;

            let increment = if p.check(TokenKind::RParen) {
                None
            } else {
                let expr = p.expression()?.node;
                Some(p.builder.expression_stmt(expr))
            };
            p.expect(TokenKind::RParen, "')'")?;

            let mut body = p.statement()?;
            if let Some(increment) = increment {
                body = p.builder.block(vec![body, increment]);
            }
            let while_loop = p.builder.while_stmt(condition, body);

            if prelude.is_empty() {
                return Ok(while_loop);
            }
            prelude.push(while_loop);
            Ok(p.builder.block(prelude))
        })
    }

    fn while_statement(&mut self) -> PResult<StmtRef<B::P>> {
        let condition = self.with_scope(|p| {
            p.expect(TokenKind::LParen, "'('")?;
            let condition = p.expression()?.node;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(condition)
        })?;
        let body = self.statement()?;
        Ok(self.builder.while_stmt(condition, body))
    }

    fn if_statement(&mut self) -> PResult<StmtRef<B::P>> {
        let condition = self.with_scope(|p| {
            p.expect(TokenKind::LParen, "'('")?;
            let condition = p.expression()?.node;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(condition)
        })?;
        let then_branch = self.statement()?;

        // At the REPL prompt an `else` must sit on the same line as the
        // `if`; a newline ends the statement so the next line starts fresh.
        let mut else_branch = None;
        if (self.scope_level != 0 || self.peek().kind != TokenKind::Newline)
            && self.match_kind(TokenKind::Else).is_some()
        {
            else_branch = Some(self.statement()?);
        }
        Ok(self.builder.if_stmt(condition, then_branch, else_branch))
    }

    fn print_statement(&mut self) -> PResult<StmtRef<B::P>> {
        let expr = self.expression()?.node;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.builder.print_stmt(expr))
    }

    fn return_statement(&mut self) -> PResult<StmtRef<B::P>> {
        let value = if self.check(TokenKind::Semicolon) {
            self.builder.nil()
        } else {
            self.expression()?.node
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.builder.return_stmt(value))
    }

    fn expression_statement(&mut self) -> PResult<StmtRef<B::P>> {
        let expr = self.expression()?.node;
        if self.suspend_matching {
            // Top-level REPL expression ended by a newline: answer back.
            self.suspend_matching = false;
            return Ok(self.builder.print_stmt(expr));
        }
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.builder.expression_stmt(expr))
    }

    fn block(&mut self) -> PResult<StmtRef<B::P>> {
        self.with_scope(|p| {
            let mut statements = Vec::new();
            while !p.check(TokenKind::RBrace) && !p.check(TokenKind::Eof) {
                match p.declaration() {
                    Some(stmt) => statements.push(stmt),
                    None => break,
                }
            }
            p.expect(TokenKind::RBrace, "'}'")?;
            Ok(p.builder.block(statements))
        })
    }

    // ---- expressions ----------------------------------------------------

    fn expression(&mut self) -> PResult<ParsedExpr<B::P>> {
        self.comma()
    }

    fn comma(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.assignment()?;
        while let Some(op) = self.match_kind(TokenKind::Comma) {
            let rhs = self.assignment()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn assignment(&mut self) -> PResult<ParsedExpr<B::P>> {
        let lhs = self.disjunction()?;
        if let Some(op) = self.match_kind(TokenKind::Eq) {
            let value = self.disjunction()?;
            return match lhs.target {
                Some(name) => Ok(ParsedExpr::plain(self.builder.assign(name, value.node))),
                None => Err(ParseError::InvalidAssignmentTarget {
                    line: op.line,
                    column: op.column,
                }),
            };
        }
        Ok(lhs)
    }

    fn disjunction(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.conjunction()?;
        while let Some(op) = self.match_kind(TokenKind::Or) {
            let rhs = self.conjunction()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn conjunction(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.equality()?;
        while let Some(op) = self.match_kind(TokenKind::And) {
            let rhs = self.equality()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.comparison()?;
        while let Some(op) = self.match_kinds(&[TokenKind::BangEq, TokenKind::EqEq]) {
            let rhs = self.comparison()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.term()?;
        while let Some(op) = self.match_kinds(&[
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Lt,
            TokenKind::LtEq,
        ]) {
            let rhs = self.term()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.match_kinds(&[TokenKind::Minus, TokenKind::Plus]) {
            let rhs = self.factor()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.match_kinds(&[TokenKind::Slash, TokenKind::Star]) {
            let rhs = self.unary()?;
            lhs = ParsedExpr::plain(self.builder.binary(lhs.node, rhs.node, op));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> PResult<ParsedExpr<B::P>> {
        if let Some(op) = self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operand = self.unary()?;
            return Ok(ParsedExpr::plain(self.builder.unary(operand.node, op)));
        }
        self.call()
    }

    fn call(&mut self) -> PResult<ParsedExpr<B::P>> {
        let mut parsed = self.primary()?;
        loop {
            // A newline right after a complete top-level REPL expression
            // ends it; matching freezes until the statement level reacts.
            if self.scope_level == 0 && self.peek().kind == TokenKind::Newline {
                self.suspend_matching = true;
                break;
            }
            if self.match_kind(TokenKind::LParen).is_some() {
                let callee = parsed.node;
                let node = self.with_scope(|p| p.finish_call(callee))?;
                parsed = ParsedExpr::plain(node);
            } else {
                break;
            }
        }
        Ok(parsed)
    }

    fn finish_call(&mut self, callee: ExprRef<B::P>) -> PResult<ExprRef<B::P>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                // Argument grammar sits below the comma operator, so the
                // comma here separates arguments.
                args.push(self.assignment()?.node);
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(self.builder.call(callee, args))
    }

    fn primary(&mut self) -> PResult<ParsedExpr<B::P>> {
        if self.suspend_matching {
            return Err(self.expected("an expression"));
        }
        self.skip_newlines();
        let token = self.peek();
        match token.kind {
            TokenKind::False => {
                self.advance();
                Ok(ParsedExpr::plain(self.builder.bool_lit(false)))
            }
            TokenKind::True => {
                self.advance();
                Ok(ParsedExpr::plain(self.builder.bool_lit(true)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(ParsedExpr::plain(self.builder.nil()))
            }
            TokenKind::Number(bits) => {
                self.advance();
                Ok(ParsedExpr::plain(self.builder.number(f64::from_bits(bits))))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(ParsedExpr::plain(self.builder.string(value)))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(ParsedExpr::var(self.builder.var(name), name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.with_scope(|p| {
                    let inner = p.expression()?.node;
                    p.expect(TokenKind::RParen, "')'")?;
                    Ok(inner)
                })?;
                Ok(ParsedExpr::plain(self.builder.grouping(inner)))
            }
            TokenKind::Eof => {
                self.advance();
                Err(ParseError::UnexpectedEnd {
                    line: token.line,
                    column: token.column,
                })
            }
            _ => Err(self.expected("an expression")),
        }
    }

    // ---- recovery -------------------------------------------------------

    /// Discard tokens until a safe restart point: just past a `;`, or just
    /// before a keyword that starts a statement.
    fn synchronize(&mut self) {
        self.suspend_matching = false;
        loop {
            self.skip_newlines();
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                kind if kind.starts_statement() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
