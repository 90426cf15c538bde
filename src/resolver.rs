use std::collections::HashMap;
use std::mem;

use crate::error::{Diagnostics, ResolveError};
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// A static pass between parsing and evaluation. Walks the AST once to bind
/// every variable reference to a scope distance, so the evaluator can look
/// variables up by walking a fixed number of environment links instead of
/// searching (and so a closure keeps referring to the variable it closed
/// over even if a same-named variable is later declared in an intervening
/// scope). Also catches the handful of errors that are easier to reject
/// statically than dynamically: duplicate locals, `return`/`this`/`super`
/// misuse, self-inheriting classes.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<ExprId, usize>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Resolves every statement and returns the scope-distance side-table
    /// the evaluator uses for `Variable`/`Assign`/`This`/`Super` lookups.
    pub fn resolve(mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) -> HashMap<ExprId, usize> {
        for statement in statements {
            self.resolve_stmt(statement, diagnostics);
        }
        self.locals
    }

    fn resolve_stmts(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            self.resolve_stmt(statement, diagnostics);
        }
    }

    fn resolve_function(&mut self, declaration: &FunctionDecl, kind: FunctionType, diagnostics: &mut Diagnostics) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param, diagnostics);
            self.define(param);
        }
        self.resolve_stmts(&declaration.body, diagnostics);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token, diagnostics: &mut Diagnostics) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            diagnostics.report_resolve(&ResolveError {
                token: name.clone(),
                message: "already a variable with this name in this scope".to_string(),
            });
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.locals.insert(id, distance);
                return;
            }
        }
        // Not found in any scope: treated as global, resolved dynamically at runtime.
    }

    fn resolve_expr(&mut self, expr: &Expr, diagnostics: &mut Diagnostics) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Unary(unary) => self.resolve_expr(&unary.right, diagnostics),
            Expr::Binary(binary) => {
                self.resolve_expr(&binary.left, diagnostics);
                self.resolve_expr(&binary.right, diagnostics);
            }
            Expr::Logical(logical) => {
                self.resolve_expr(&logical.left, diagnostics);
                self.resolve_expr(&logical.right, diagnostics);
            }
            Expr::Grouping(inner) => self.resolve_expr(inner, diagnostics),
            Expr::Variable(variable) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&variable.name.lexeme) == Some(&false) {
                        diagnostics.report_resolve(&ResolveError {
                            token: variable.name.clone(),
                            message: "can't read local variable in its own initializer".to_string(),
                        });
                    }
                }
                self.resolve_local(variable.id, &variable.name);
            }
            Expr::Assign(assign) => {
                self.resolve_expr(&assign.value, diagnostics);
                self.resolve_local(assign.id, &assign.name);
            }
            Expr::Call(call) => {
                self.resolve_expr(&call.callee, diagnostics);
                for argument in &call.arguments {
                    self.resolve_expr(argument, diagnostics);
                }
            }
            Expr::Get(get) => self.resolve_expr(&get.object, diagnostics),
            Expr::Set(set) => {
                self.resolve_expr(&set.value, diagnostics);
                self.resolve_expr(&set.object, diagnostics);
            }
            Expr::This(this) => {
                if self.current_class == ClassType::None {
                    diagnostics.report_resolve(&ResolveError {
                        token: this.keyword.clone(),
                        message: "can't use 'this' outside of a class".to_string(),
                    });
                    return;
                }
                self.resolve_local(this.id, &this.keyword);
            }
            Expr::Super(super_expr) => {
                match self.current_class {
                    ClassType::Subclass => {}
                    ClassType::None => diagnostics.report_resolve(&ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "can't use 'super' outside of a class".to_string(),
                    }),
                    ClassType::Class => diagnostics.report_resolve(&ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "can't use 'super' in a class with no superclass".to_string(),
                    }),
                }
                self.resolve_local(super_expr.id, &super_expr.keyword);
            }
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt, diagnostics: &mut Diagnostics) {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr, diagnostics),
            Stmt::Var(var) => {
                self.declare(&var.name, diagnostics);
                if let Some(initializer) = &var.initializer {
                    self.resolve_expr(initializer, diagnostics);
                }
                self.define(&var.name);
            }
            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_stmts(statements, diagnostics);
                self.end_scope();
            }
            Stmt::If(if_stmt) => {
                self.resolve_expr(&if_stmt.condition, diagnostics);
                self.resolve_stmt(&if_stmt.then_branch, diagnostics);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.resolve_stmt(else_branch, diagnostics);
                }
            }
            Stmt::While(while_stmt) => {
                self.resolve_expr(&while_stmt.condition, diagnostics);
                self.resolve_stmt(&while_stmt.body, diagnostics);
            }
            Stmt::Function(declaration) => {
                self.declare(&declaration.name, diagnostics);
                self.define(&declaration.name);
                self.resolve_function(declaration, FunctionType::Function, diagnostics);
            }
            Stmt::Return(return_stmt) => {
                if self.current_function == FunctionType::None {
                    diagnostics.report_resolve(&ResolveError {
                        token: return_stmt.keyword.clone(),
                        message: "can't return from top-level code".to_string(),
                    });
                }
                if let Some(value) = &return_stmt.value {
                    if self.current_function == FunctionType::Initializer {
                        diagnostics.report_resolve(&ResolveError {
                            token: return_stmt.keyword.clone(),
                            message: "can't return a value from an initializer".to_string(),
                        });
                        return;
                    }
                    self.resolve_expr(value, diagnostics);
                }
            }
            Stmt::Class(class_stmt) => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(&class_stmt.name, diagnostics);
                self.define(&class_stmt.name);

                if let Some(superclass) = &class_stmt.superclass {
                    if let Expr::Variable(variable) = superclass {
                        if variable.name.lexeme == class_stmt.name.lexeme {
                            diagnostics.report_resolve(&ResolveError {
                                token: variable.name.clone(),
                                message: "a class can't inherit from itself".to_string(),
                            });
                        }
                    }

                    self.current_class = ClassType::Subclass;
                    self.resolve_expr(superclass, diagnostics);

                    self.begin_scope();
                    self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
                }

                self.begin_scope();
                self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

                for method in &class_stmt.methods {
                    let kind = if method.name.lexeme == "init" {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };
                    self.resolve_function(method, kind, diagnostics);
                }

                self.end_scope();
                if class_stmt.superclass.is_some() {
                    self.end_scope();
                }

                self.current_class = enclosing_class;
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
