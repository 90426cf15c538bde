use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Value};
use crate::token::Token;

/// A class: a name, an optional superclass to fall back to for method
/// lookup, and its own methods. Constructing one (`Class()`) allocates an
/// `Instance` and, if an `init` method exists anywhere in the chain, runs it.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    methods: HashMap<String, Rc<Function>>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<RefCell<Class>>>, methods: HashMap<String, Rc<Function>>) -> Self {
        Class { name, superclass, methods }
    }

    /// Looks up a method by name, walking the superclass chain if it's not
    /// declared directly on this class.
    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass.as_ref().and_then(|superclass| superclass.borrow().find_method(name))
    }

    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    /// Constructing a class allocates an instance and, if it (or an
    /// ancestor) defines `init`, runs it bound to that instance. Handled as
    /// a free function rather than through `Callable` since construction
    /// needs the class's own `Rc` handle to hand to the new instance, which
    /// `Callable::call`'s `&self` can't recover on its own.
    pub fn construct(
        class: &Rc<RefCell<Class>>,
        interpreter: &mut Interpreter<'_>,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));

        if let Some(initializer) = class.borrow().find_method("init") {
            initializer.bind(Rc::clone(&instance)).call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A runtime instance of a class: the fields assigned to it, plus a handle
/// back to its class for method lookup.
#[derive(Debug)]
pub struct Instance {
    class: Rc<RefCell<Class>>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn class_name(&self) -> String {
        self.class.borrow().name.clone()
    }

    /// Fields shadow methods: a field assigned over a method name always
    /// wins on subsequent lookups.
    pub fn get(&self, name: &Token, this: &Rc<RefCell<Instance>>) -> Result<Value, RuntimeError> {
        if let Some(value) = self.fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = self.class.borrow().find_method(&name.lexeme) {
            return Ok(Value::Function(Rc::new(method.bind(Rc::clone(this)))));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("undefined property '{}'", name.lexeme),
        })
    }

    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class_name())
    }
}
