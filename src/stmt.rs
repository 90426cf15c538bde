use std::rc::Rc;

use crate::expr::Expr;
use crate::token::Token;

/// A statement: a piece of code that performs a side effect rather than
/// producing a value.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var(VarStmt),
    Block(Vec<Stmt>),
    If(IfStmt),
    While(WhileStmt),
    Function(Rc<FunctionDecl>),
    Return(ReturnStmt),
    Class(ClassStmt),
}

#[derive(Debug, Clone)]
pub struct VarStmt {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// The declaration shared by named functions and methods. Held behind an
/// `Rc` so a runtime [`Function`](crate::function::Function) can cheaply
/// share it instead of cloning the body on every call and every `bind`.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ClassStmt {
    pub name: Token,
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
}
