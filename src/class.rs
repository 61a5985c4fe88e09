use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::token::Token;

/// A user-defined class. Every ordinary class's `superclass` chain
/// ultimately reaches the built-in root class, whose own `superclass` is
/// `None`. `fields` holds static members: a class is conceptually an
/// instance of [`meta_class`](Class::meta_class), so static storage lives on
/// the class value itself rather than in a separate table.
#[derive(Clone)]
pub struct Class {
    pub name: String,
    pub methods: HashMap<String, Function>,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub meta_class: Option<Rc<RefCell<Class>>>,
    pub fields: HashMap<String, Object>,
}

impl Class {
    pub fn new(
        name: String,
        methods: HashMap<String, Function>,
        superclass: Option<Rc<RefCell<Class>>>,
        meta_class: Option<Rc<RefCell<Class>>>,
    ) -> Self {
        Class { name, methods, superclass, meta_class, fields: HashMap::new() }
    }

    /// Looks up a method by name, walking the superclass chain on miss.
    pub fn get_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass.as_ref().and_then(|sup| sup.borrow().get_method(name))
    }

    /// Arity of the class's constructor: the arity of `init` if it declares
    /// one (walking the superclass chain), otherwise 0.
    pub fn arity(&self) -> usize {
        self.get_method("init").map(|init| init.arity()).unwrap_or(0)
    }

    pub fn get_static(&self, name: &str) -> Option<Object> {
        self.fields.get(name).cloned()
    }

    pub fn set_static(&mut self, name: &str, value: Object) {
        self.fields.insert(name.to_string(), value);
    }

    /// Constructs a fresh instance and, if the class declares (or inherits)
    /// an `init`, binds and calls it with `arguments`.
    pub fn construct(
        class: &Rc<RefCell<Class>>,
        interpreter: &mut Interpreter,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));
        let instance_obj = Object::Instance(Rc::clone(&instance));

        if let Some(init) = class.borrow().get_method("init") {
            init.bind(instance_obj.clone()).call(interpreter, arguments)?;
        }

        Ok(instance_obj)
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

/// An instance of a user-defined class.
#[derive(Clone)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(&self, name: &Token, this: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.class.borrow().get_method(&name.lexeme) {
            return Ok(Object::from(method.bind(this.clone())));
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'.", name.lexeme)))
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}
