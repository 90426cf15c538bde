use crate::error::{Diagnostics, ParseError};
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, TokenType};
use std::rc::Rc;

type ParseResult<T> = Result<T, ParseError>;

/// Returns whether the next token is any of the given types, consuming it if so.
macro_rules! advance_if_matches {
    ( $self:ident, $( $kind:expr ),+ ) => {
        {
            if $( $self.check($kind) )||+ {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Parses a token stream into statements.
///
/// - Program     -> Declaration* EOF ;
/// - Block       -> "{" Declaration* "}" ;
/// - Declaration -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl   -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" Function* "}" ;
/// - FunDecl     -> "fun" Function ;
/// - VarDecl     -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Function    -> IDENTIFIER "(" Parameters? ")" Block ;
/// - Parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement   -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt | WhileStmt | Block ;
/// - ExprStmt    -> Expression ";" ;
/// - ForStmt     -> "for" "(" ( VarDecl | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt      -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt   -> "print" Expression ";" ;
/// - ReturnStmt  -> "return" Expression? ";" ;
/// - WhileStmt   -> "while" "(" Expression ")" Statement ;
/// - Expression  -> Assignment ;
/// - Assignment  -> ( Call "." )? IDENTIFIER "=" Assignment | LogicOr ;
/// - LogicOr     -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd    -> Equality ( "and" Equality )* ;
/// - Equality    -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison  -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term        -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor      -> Unary ( ( "*" | "/" ) Unary )* ;
/// - Unary       -> ( "!" | "-" ) Unary | Call ;
/// - Call        -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Arguments   -> Expression ( "," Expression )* ;
/// - Primary     -> NUMBER | STRING | "false" | "true" | "nil" | "this"
///                | "(" Expression ")" | IDENTIFIER | "super" "." IDENTIFIER ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: u32,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, next_id: 0 }
    }

    /// Parses every declaration in the token stream, reporting each error
    /// through `diagnostics` and resynchronizing past it rather than
    /// stopping at the first one.
    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration(diagnostics) {
                statements.push(stmt);
            }
        }

        statements
    }

    fn next_id(&mut self) -> ExprId {
        let id = ExprId(self.next_id);
        self.next_id += 1;
        id
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenType::Eof
    }

    fn check(&self, kind: TokenType) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, kind: TokenType, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(ParseError::new(self.peek().clone(), message))
    }

    /// Parses one declaration, or `None` if a parse error was found and
    /// reported (after synchronizing to the next statement boundary).
    fn declaration(&mut self, diagnostics: &mut Diagnostics) -> Option<Stmt> {
        let result = if advance_if_matches!(self, TokenType::Class) {
            self.class_declaration()
        } else if advance_if_matches!(self, TokenType::Fun) {
            self.function("function").map(Stmt::Function)
        } else if advance_if_matches!(self, TokenType::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                diagnostics.report_parse(&error);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "expect class name")?.clone();

        let superclass = if advance_if_matches!(self, TokenType::Less) {
            self.consume(TokenType::Identifier, "expect superclass name")?;
            Some(Expr::Variable(VariableExpr { id: self.next_id(), name: self.previous().clone() }))
        } else {
            None
        };

        self.consume(TokenType::LeftBrace, "expect '{' before class body")?;

        let mut methods = Vec::new();
        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(TokenType::RightBrace, "expect '}' after class body")?;

        Ok(Stmt::Class(ClassStmt { name, superclass, methods }))
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "expect variable name")?.clone();

        let initializer = if advance_if_matches!(self, TokenType::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::Semicolon, "expect ';' after variable declaration")?;
        Ok(Stmt::Var(VarStmt { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if advance_if_matches!(self, TokenType::For) {
            return self.for_statement();
        }
        if advance_if_matches!(self, TokenType::If) {
            return self.if_statement();
        }
        if advance_if_matches!(self, TokenType::Print) {
            return self.print_statement();
        }
        if advance_if_matches!(self, TokenType::Return) {
            return self.return_statement();
        }
        if advance_if_matches!(self, TokenType::While) {
            return self.while_statement();
        }
        if advance_if_matches!(self, TokenType::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        }

        self.expression_statement()
    }

    /// Desugars `for` into a `while` wrapped in the initializer's block, per
    /// the book: no dedicated AST node for loops with three clauses.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "expect '(' after 'for'")?;

        let initializer = if advance_if_matches!(self, TokenType::Semicolon) {
            None
        } else if advance_if_matches!(self, TokenType::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenType::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenType::Semicolon, "expect ';' after loop condition")?;

        let increment = if !self.check(TokenType::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenType::RightParen, "expect ')' after for clauses")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While(WhileStmt {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "expect '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "expect ')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if advance_if_matches!(self, TokenType::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt { condition, then_branch, else_branch }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "expect '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "expect ')' after condition")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenType::Semicolon, "expect ';' after value")?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenType::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::Semicolon, "expect ';' after return value")?;
        Ok(Stmt::Return(ReturnStmt { keyword, value }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "expect ';' after expression")?;
        Ok(Stmt::Expression(expr))
    }

    fn function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.consume(TokenType::Identifier, &format!("expect {kind} name"))?.clone();

        self.consume(TokenType::LeftParen, &format!("expect '(' after {kind} name"))?;

        let mut params = Vec::new();
        if !self.check(TokenType::RightParen) {
            loop {
                if params.len() >= 255 {
                    return Err(ParseError::arity_limit(
                        self.peek().clone(),
                        "can't have more than 255 parameters",
                    ));
                }

                params.push(self.consume(TokenType::Identifier, "expect parameter name")?.clone());

                if !advance_if_matches!(self, TokenType::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenType::RightParen, "expect ')' after parameters")?;
        self.consume(TokenType::LeftBrace, &format!("expect '{{' before {kind} body"))?;

        let body = self.block()?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            let declaration = if advance_if_matches!(self, TokenType::Class) {
                self.class_declaration()
            } else if advance_if_matches!(self, TokenType::Fun) {
                self.function("function").map(Stmt::Function)
            } else if advance_if_matches!(self, TokenType::Var) {
                self.var_declaration()
            } else {
                self.statement()
            };

            statements.push(declaration?);
        }

        self.consume(TokenType::RightBrace, "expect '}' after block")?;
        Ok(statements)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if advance_if_matches!(self, TokenType::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(v) => Ok(Expr::Assign(AssignExpr {
                    id: self.next_id(),
                    name: v.name,
                    value: Box::new(value),
                })),
                Expr::Get(g) => Ok(Expr::Set(SetExpr {
                    object: g.object,
                    name: g.name,
                    value: Box::new(value),
                })),
                _ => Err(ParseError::new(equals, "invalid assignment target")),
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while advance_if_matches!(self, TokenType::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while advance_if_matches!(self, TokenType::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while advance_if_matches!(self, TokenType::BangEqual, TokenType::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while advance_if_matches!(self, TokenType::Greater, TokenType::GreaterEqual, TokenType::Less, TokenType::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while advance_if_matches!(self, TokenType::Minus, TokenType::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while advance_if_matches!(self, TokenType::Slash, TokenType::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryExpr { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if advance_if_matches!(self, TokenType::Bang, TokenType::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryExpr { operator, right: Box::new(right) }));
        }

        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenType::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    return Err(ParseError::arity_limit(
                        self.peek().clone(),
                        "can't have more than 255 arguments",
                    ));
                }

                arguments.push(self.expression()?);

                if !advance_if_matches!(self, TokenType::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenType::RightParen, "expect ')' after arguments")?.clone();

        Ok(Expr::Call(CallExpr { callee: Box::new(callee), paren, arguments }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if advance_if_matches!(self, TokenType::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if advance_if_matches!(self, TokenType::Dot) {
                let name = self.consume(TokenType::Identifier, "expect property name after '.'")?.clone();
                expr = Expr::Get(GetExpr { object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if advance_if_matches!(self, TokenType::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if advance_if_matches!(self, TokenType::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if advance_if_matches!(self, TokenType::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }
        if advance_if_matches!(self, TokenType::Number, TokenType::String) {
            return Ok(Expr::Literal(
                self.previous().literal.clone().expect("number or string token to carry a literal"),
            ));
        }
        if advance_if_matches!(self, TokenType::Super) {
            let keyword = self.previous().clone();
            self.consume(TokenType::Dot, "expect '.' after 'super'")?;
            let method = self.consume(TokenType::Identifier, "expect superclass method name")?.clone();
            return Ok(Expr::Super(SuperExpr { id: self.next_id(), keyword, method }));
        }
        if advance_if_matches!(self, TokenType::This) {
            return Ok(Expr::This(ThisExpr { id: self.next_id(), keyword: self.previous().clone() }));
        }
        if advance_if_matches!(self, TokenType::Identifier) {
            return Ok(Expr::Variable(VariableExpr { id: self.next_id(), name: self.previous().clone() }));
        }
        if advance_if_matches!(self, TokenType::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "expect ')' after expression")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(ParseError::new(self.peek().clone(), "expect expression"))
    }

    /// Discards tokens until a likely statement boundary, so one parse error
    /// doesn't cascade into a wall of spurious follow-on errors.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenType::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
