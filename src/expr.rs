use crate::literal::Literal;
use crate::token::Token;

/// Identifies an expression node for the resolver's side-table. Assigned
/// once, at parse time, to every `Variable`, `Assign`, `This`, and `Super`
/// node — the only variants the resolver needs to key on — so lookups use a
/// plain integer instead of hashing on node pointers. Nodes are never
/// recreated between the resolver and the evaluator, so an `ExprId` stays
/// valid for the lifetime of the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

/// An expression: a piece of code that produces a [`Value`](crate::object::Value).
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Grouping(Box<Expr>),
    Variable(VariableExpr),
    Assign(AssignExpr),
    Call(CallExpr),
    Get(GetExpr),
    Set(SetExpr),
    This(ThisExpr),
    Super(SuperExpr),
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub id: ExprId,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub id: ExprId,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetExpr {
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct SetExpr {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct ThisExpr {
    pub id: ExprId,
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct SuperExpr {
    pub id: ExprId,
    pub keyword: Token,
    pub method: Token,
}
