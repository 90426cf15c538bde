use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::class::Instance;
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::object::{Callable, Value};
use crate::stmt::FunctionDecl;
use crate::token::{Token, TokenType};

/// A user-defined function or method. Closes over the environment active at
/// its definition site, so it keeps seeing updates to variables captured
/// from an enclosing scope even after that scope's block has exited.
#[derive(Debug, Clone)]
pub struct Function {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Returns a copy of this function whose closure has `this` bound to
    /// `instance`, used when a method is looked up off an instance.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        environment.borrow_mut().define("this", Value::Instance(instance));
        Function::new(Rc::clone(&self.declaration), environment, self.is_initializer)
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => Ok(if self.is_initializer { self.bound_this() } else { Value::Nil }),
            Err(Unwind::Return(ret)) => Ok(if self.is_initializer { self.bound_this() } else { ret.value }),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl Function {
    /// `init()` always returns the instance it was called on, even with an
    /// explicit bare `return;`, so a constructor chain like `A().B()` works.
    fn bound_this(&self) -> Value {
        let token = Token::new(TokenType::This, "this".to_string(), None, self.declaration.name.line);
        self.closure.borrow().get(&token).expect("bound method's closure to define 'this'")
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/// A function implemented in Rust rather than Lox, such as `clock`.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&mut Interpreter<'_>, Vec<Value>) -> Result<Value, RuntimeError>,
}

impl NativeFunction {
    pub fn clock() -> NativeFunction {
        NativeFunction {
            name: "clock",
            arity: 0,
            function: |_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock to be after the unix epoch")
                    .as_secs_f64();
                Ok(Value::Number(now))
            },
        }
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
