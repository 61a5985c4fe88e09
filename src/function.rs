use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::token::Token;

/// A user-defined function or method: parameters and body are shared via
/// `Rc` so binding a method or calling a closure never re-copies the AST.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Rc<[Token]>,
    pub body: Rc<[crate::stmt::Stmt]>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        name: String,
        params: Rc<[Token]>,
        body: Rc<[crate::stmt::Stmt]>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Identity comparison grounded in the pointer equality of the shared
    /// body and closure, since two `Function` values are "the same function"
    /// exactly when they were produced from the same declaration/closure pair.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.closure, &other.closure)
    }

    /// Returns a new `Function` whose closure is a child of this one's,
    /// with `this` bound to `instance`.
    pub fn bind(&self, instance: Object) -> Function {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));
        let environment = Rc::new(RefCell::new(environment));
        environment.borrow_mut().raw_define("this", instance);

        Function {
            name: self.name.clone(),
            params: Rc::clone(&self.params),
            body: Rc::clone(&self.body),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.params.iter().zip(arguments.into_iter()) {
            environment.raw_define(&param.lexeme, arg);
        }

        let environment = Rc::new(RefCell::new(environment));

        match interpreter.execute_block(&self.body, environment) {
            Ok(()) => {}
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    return self.closure.borrow().get_at(0, &this_token());
                }
                return Ok(value);
            }
            Err(Unwind::Error(err)) => return Err(err),
            Err(Unwind::Break(keyword) | Unwind::Continue(keyword)) => {
                return Err(RuntimeError::new(keyword, "Can't jump from outside loop.".to_string()));
            }
        }

        if self.is_initializer {
            return self.closure.borrow().get_at(0, &this_token());
        }

        Ok(Object::from(Literal::Nil))
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

fn this_token() -> Token {
    Token::new(crate::token::Type::This, "this".to_string(), None, 0)
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

/// A builtin function implemented in Rust rather than Lox.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The natives installed on the global environment at interpreter
    /// construction: wall-clock time and an environment-chain dump.
    pub fn globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: "clock".to_string(),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock predates the unix epoch")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: "environment".to_string(),
                arity: 0,
                function: |interpreter, _| Ok(Object::from(interpreter.current_scope.borrow().dump())),
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
