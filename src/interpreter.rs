use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Diagnostics, Return, RuntimeError, Unwind};
use crate::expr::{Expr, ExprId};
use crate::function::{Function, NativeFunction};
use crate::object::{Callable, Value};
use crate::stmt::{ClassStmt, Stmt};
use crate::token::{Token, TokenType};

/// Walks the AST produced by the parser, consulting the resolver's
/// side-table for local variable lookups. Owns the environment chain
/// (`globals` is the root; `environment` is whichever scope is currently
/// active) and the object model that `function`/`class` build values out of.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    /// `output` receives every `print` statement's text; diagnostics are
    /// reported separately through the `Diagnostics` passed to `interpret`.
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        globals.borrow_mut().define("clock", Value::NativeFunction(Rc::new(NativeFunction::clock())));

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes a freshly-resolved program. A runtime error aborts the
    /// statement list currently running, so this stops after the first one;
    /// a `Return` reaching here would mean the resolver failed to reject a
    /// top-level `return`, which it never does for a program that got this
    /// far.
    pub fn interpret(&mut self, statements: &[Stmt], locals: HashMap<ExprId, usize>, diagnostics: &mut Diagnostics) {
        self.locals = locals;

        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => {
                    diagnostics.report_runtime(&error);
                    break;
                }
                Err(Unwind::Return(_)) => break,
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.output, "{value}");
                Ok(())
            }
            Stmt::Var(var) => {
                let value = match &var.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(&var.name.lexeme, value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(statements, scope)
            }
            Stmt::If(if_stmt) => {
                if self.evaluate(&if_stmt.condition)?.is_truthy() {
                    self.execute(&if_stmt.then_branch)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While(while_stmt) => {
                while self.evaluate(&while_stmt.condition)?.is_truthy() {
                    self.execute(&while_stmt.body)?;
                }
                Ok(())
            }
            Stmt::Function(declaration) => {
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::Return(return_stmt) => {
                let value = match &return_stmt.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(Return { value }))
            }
            Stmt::Class(class_stmt) => self.execute_class(class_stmt),
        }
    }

    /// Runs `statements` inside `environment`, restoring whichever
    /// environment was active before the call on every exit path: normal
    /// completion, a `return` unwinding through, or a runtime error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = (|| {
            for statement in statements {
                self.execute(statement)?;
            }
            Ok(())
        })();

        self.environment = previous;
        result
    }

    fn execute_class(&mut self, class_stmt: &ClassStmt) -> Result<(), Unwind> {
        let superclass = match &class_stmt.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable(variable) => variable.name.clone(),
                        _ => class_stmt.name.clone(),
                    };
                    return Err(RuntimeError { token, message: "superclass must be a class".to_string() }.into());
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&class_stmt.name.lexeme, Value::Nil);

        let enclosing = Rc::clone(&self.environment);
        if let Some(superclass) = &superclass {
            let super_scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
            super_scope.borrow_mut().define("super", Value::Class(Rc::clone(superclass)));
            self.environment = super_scope;
        }

        let mut methods = HashMap::new();
        for method in &class_stmt.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Rc::new(RefCell::new(Class::new(class_stmt.name.lexeme.clone(), superclass.clone(), methods)));

        if superclass.is_some() {
            self.environment = enclosing;
        }

        self.environment
            .borrow_mut()
            .assign(&class_stmt.name, Value::Class(class))
            .map_err(Unwind::Error)?;

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal.clone())),
            Expr::Unary(unary) => {
                let right = self.evaluate(&unary.right)?;
                match unary.operator.kind {
                    TokenType::Bang => Ok(!right),
                    TokenType::Minus => (-right).ok_or_else(|| RuntimeError {
                        token: unary.operator.clone(),
                        message: "operand must be a number".to_string(),
                    }),
                    _ => unreachable!("parser only produces ! and - as unary operators"),
                }
            }
            Expr::Binary(binary) => {
                let left = self.evaluate(&binary.left)?;
                let right = self.evaluate(&binary.right)?;
                self.evaluate_binary(&binary.operator, left, right)
            }
            Expr::Logical(logical) => {
                let left = self.evaluate(&logical.left)?;
                match logical.operator.kind {
                    TokenType::Or if left.is_truthy() => Ok(left),
                    TokenType::Or => self.evaluate(&logical.right),
                    TokenType::And if !left.is_truthy() => Ok(left),
                    TokenType::And => self.evaluate(&logical.right),
                    _ => unreachable!("parser only produces 'and'/'or' as logical operators"),
                }
            }
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable(variable) => self.lookup(variable.id, &variable.name),
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                match self.locals.get(&assign.id) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(distance, &assign.name, value.clone()),
                    None => self.globals.borrow_mut().assign(&assign.name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call(call) => {
                let callee = self.evaluate(&call.callee)?;

                let mut arguments = Vec::with_capacity(call.arguments.len());
                for argument in &call.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                self.call(&call.paren, callee, arguments)
            }
            Expr::Get(get) => match self.evaluate(&get.object)? {
                Value::Instance(instance) => instance.borrow().get(&get.name, &instance),
                _ => Err(RuntimeError {
                    token: get.name.clone(),
                    message: "only instances have properties".to_string(),
                }),
            },
            Expr::Set(set) => match self.evaluate(&set.object)? {
                Value::Instance(instance) => {
                    let value = self.evaluate(&set.value)?;
                    instance.borrow_mut().set(&set.name, value.clone());
                    Ok(value)
                }
                _ => Err(RuntimeError {
                    token: set.name.clone(),
                    message: "only instances have fields".to_string(),
                }),
            },
            Expr::This(this_expr) => {
                let distance = *self
                    .locals
                    .get(&this_expr.id)
                    .expect("resolver always resolves a 'this' that reaches the evaluator");
                Ok(self.environment.borrow().get_at(distance, &this_expr.keyword))
            }
            Expr::Super(super_expr) => self.evaluate_super(super_expr),
        }
    }

    fn evaluate_binary(&self, operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match operator.kind {
            TokenType::Greater | TokenType::GreaterEqual | TokenType::Less | TokenType::LessEqual => {
                match (&left, &right) {
                    (Value::Number(l), Value::Number(r)) => Ok(Value::Bool(match operator.kind {
                        TokenType::Greater => l > r,
                        TokenType::GreaterEqual => l >= r,
                        TokenType::Less => l < r,
                        TokenType::LessEqual => l <= r,
                        _ => unreachable!(),
                    })),
                    _ => Err(RuntimeError { token: operator.clone(), message: "operands must be numbers".to_string() }),
                }
            }
            TokenType::Minus => (left - right)
                .ok_or_else(|| RuntimeError { token: operator.clone(), message: "operands must be numbers".to_string() }),
            TokenType::Slash => (left / right)
                .ok_or_else(|| RuntimeError { token: operator.clone(), message: "operands must be numbers".to_string() }),
            TokenType::Star => (left * right)
                .ok_or_else(|| RuntimeError { token: operator.clone(), message: "operands must be numbers".to_string() }),
            TokenType::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "operands must be two numbers or two strings".to_string(),
            }),
            TokenType::EqualEqual => Ok(Value::Bool(left == right)),
            TokenType::BangEqual => Ok(Value::Bool(left != right)),
            _ => unreachable!("parser only produces comparison/arithmetic/equality as binary operators"),
        }
    }

    fn evaluate_super(&mut self, super_expr: &crate::expr::SuperExpr) -> Result<Value, RuntimeError> {
        let distance = *self
            .locals
            .get(&super_expr.id)
            .expect("resolver always resolves a 'super' that reaches the evaluator");

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword);
        let Value::Class(superclass) = superclass else {
            unreachable!("resolver-bound 'super' always resolves to a class value");
        };

        let this_token = Token::new(TokenType::This, "this".to_string(), None, super_expr.keyword.line);
        let this = self.environment.borrow().get_at(distance - 1, &this_token);
        let Value::Instance(instance) = this else {
            unreachable!("'this' one scope inside 'super' always resolves to an instance");
        };

        let method = superclass.borrow().find_method(&super_expr.method.lexeme).ok_or_else(|| RuntimeError {
            token: super_expr.method.clone(),
            message: format!("undefined property '{}'", super_expr.method.lexeme),
        })?;

        Ok(Value::Function(Rc::new(method.bind(instance))))
    }

    fn lookup(&self, id: ExprId, name: &Token) -> Result<Value, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(self.environment.borrow().get_at(distance, name)),
            None => self.globals.borrow().get(name),
        }
    }

    fn call(&mut self, paren: &Token, callee: Value, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                check_arity(paren, function.arity(), arguments.len())?;
                function.call(self, arguments)
            }
            Value::NativeFunction(function) => {
                check_arity(paren, function.arity(), arguments.len())?;
                function.call(self, arguments)
            }
            Value::Class(class) => {
                let arity = class.borrow().arity();
                check_arity(paren, arity, arguments.len())?;
                Class::construct(&class, self, arguments)
            }
            _ => Err(RuntimeError {
                token: paren.clone(),
                message: "can only call functions and classes".to_string(),
            }),
        }
    }
}

fn check_arity(paren: &Token, expected: usize, got: usize) -> Result<(), RuntimeError> {
    if expected == got {
        Ok(())
    } else {
        Err(RuntimeError {
            token: paren.clone(),
            message: format!("expected {expected} arguments but got {got}"),
        })
    }
}
