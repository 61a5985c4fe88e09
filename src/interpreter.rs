use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{LoxError, RuntimeError};
use crate::expr::{Expr, ExprId, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::Object;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// A non-local control transfer out of statement execution: a `return`, a
/// `break`/`continue`, or a runtime error unwinding the call stack.
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Break(Token),
    Continue(Token),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

/// Tree-walking evaluator. Owns the global environment, the currently active
/// scope (swapped in and out as blocks/calls push and pop lexical frames),
/// and the resolver's side table mapping an expression to the number of
/// enclosing scopes to walk to find its binding.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    pub current_scope: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    object_class: Rc<RefCell<Class>>,
    meta_class: Rc<RefCell<Class>>,
}

impl Interpreter {
    pub fn new() -> Self {
        // The metaclass is its own metaclass: built first with none, then
        // patched to point at itself.
        let meta_class = Rc::new(RefCell::new(Class::new("lang.Class".to_string(), HashMap::new(), None, None)));
        meta_class.borrow_mut().meta_class = Some(Rc::clone(&meta_class));

        let object_class = Rc::new(RefCell::new(Class::new(
            "Object".to_string(),
            HashMap::new(),
            None,
            Some(Rc::clone(&meta_class)),
        )));

        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().raw_define("Object", Object::from(Rc::clone(&object_class)));
        for native in NativeFunction::globals() {
            globals.borrow_mut().raw_define(&native.name.clone(), Object::from(native));
        }

        Interpreter { current_scope: Rc::clone(&globals), globals, locals: HashMap::new(), object_class, meta_class }
    }

    /// Records the resolver's finding for `id`: its binding lives `depth`
    /// enclosing scopes up from wherever it's evaluated.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Whether `name` is bound directly in the global environment. Used by
    /// the resolver to allow references to natives/the root class it never
    /// saw declared.
    pub fn has_global(&self, name: &str) -> bool {
        self.globals.borrow().variables.contains_key(name)
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => self.current_scope.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    /// Runs `statements` with `environment` as the active scope, always
    /// restoring the previous scope before returning - including when a
    /// statement unwinds with an error, break, continue, or return.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.current_scope, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.current_scope = previous;
        result
    }

    /// Runs one top-level program (a single `Block` statement, per the
    /// parser's contract). Catches and reports a runtime error. A `break`/
    /// `continue` escaping all the way to the top is reported the same way,
    /// as defense in depth against a resolver bug; an escaping `return`
    /// would be an actual resolver bug since `"return"` at top level is a
    /// static error.
    pub fn interpret(&mut self, statement: &Stmt) {
        match self.execute(statement) {
            Ok(()) => {}
            Err(Unwind::Error(error)) => error.report(),
            Err(Unwind::Break(keyword) | Unwind::Continue(keyword)) => {
                RuntimeError::new(keyword, "Can't jump from outside loop.".to_string()).report();
            }
            Err(Unwind::Return(_)) => {
                unreachable!("resolver guarantees no return escapes the top-level program")
            }
        }
    }

    /// Shared by a named class declaration and a class expression: evaluates
    /// the superclass, builds the method closures, constructs the `Class`,
    /// binds it to `name_token` (with an early nil self-reference so the
    /// class can refer to itself), then evaluates static members in their own
    /// scope and installs the results as fields on the class.
    fn declare_class(&mut self, literal: &crate::expr::ClassLiteralData, name_token: Option<&Token>) -> Result<Rc<RefCell<Class>>, RuntimeError> {
        let class_name = name_token.map(|t| t.lexeme.clone()).unwrap_or_else(|| "anonymous".to_string());

        if let Some(token) = name_token {
            self.current_scope.borrow_mut().raw_define(&token.lexeme, Object::from(Literal::Nil));
        }

        let superclass_obj = match &literal.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(class) => class,
                _ => return Err(RuntimeError::new(superclass_token(expr), "Superclass must be a class.".to_string())),
            },
            None => Rc::clone(&self.object_class),
        };

        let methods_scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.current_scope)))));
        methods_scope.borrow_mut().raw_define("super", Object::from(Rc::clone(&superclass_obj)));

        let mut methods = HashMap::new();
        for method_stmt in &literal.methods {
            let Stmt::FunctionDef(function_def) = method_stmt else { unreachable!("class body only contains FunctionDef methods") };
            let is_initializer = function_def.name.lexeme == "init";
            let qualified_name = format!("{class_name}::{}", function_def.name.lexeme);
            methods.insert(
                function_def.name.lexeme.clone(),
                Function::new(
                    qualified_name,
                    Rc::clone(&function_def.callable.params),
                    Rc::clone(&function_def.callable.body),
                    Rc::clone(&methods_scope),
                    is_initializer,
                ),
            );
        }

        let class = Rc::new(RefCell::new(Class::new(class_name, methods, Some(superclass_obj), Some(Rc::clone(&self.meta_class)))));

        if let Some(token) = name_token {
            self.current_scope.borrow_mut().raw_define(&token.lexeme, Object::from(Rc::clone(&class)));
        }

        // Static initializers run in a fresh child scope so a later static
        // can reach an earlier one by plain name; methods never see into it.
        let statics_scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.current_scope)))));
        let previous = mem::replace(&mut self.current_scope, statics_scope);

        let mut result = Ok(());
        for member in &literal.static_members {
            let Stmt::Var(var_data) = member else { unreachable!("static members are always Var statements") };
            result = (|| -> Result<(), RuntimeError> {
                let value = match &var_data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };
                self.current_scope.borrow_mut().raw_define(&var_data.name.lexeme, value.clone());
                class.borrow_mut().set_static(&var_data.name.lexeme, value);
                Ok(())
            })();

            if result.is_err() {
                break;
            }
        }

        self.current_scope = previous;
        result?;

        Ok(class)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn as_number(value: &Object, token: &Token, message: &str) -> Result<f64, RuntimeError> {
    match value {
        Object::Literal(Literal::Number(n)) => Ok(*n),
        _ => Err(RuntimeError::new(token.clone(), message.to_string())),
    }
}

/// The expression carried by a superclass clause is always the parser's own
/// `Expr::Variable`; anything else would mean the grammar itself changed out
/// from under this function.
fn superclass_token(expr: &Expr) -> Token {
    match expr {
        Expr::Variable(variable) => variable.name.clone(),
        _ => unreachable!("a superclass clause is always parsed as a Variable expression"),
    }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(data) = expr else { unreachable!() };
        Ok(Object::from(data.value.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(data) = expr else { unreachable!() };
        let right = self.evaluate(&data.expr)?;

        match data.operator.kind {
            Type::Minus => Ok(Object::from(-as_number(&right, &data.operator, "Operand must be a number.")?)),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("unary expressions only carry '-' or '!'"),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.kind {
            Type::Minus | Type::Star | Type::Slash | Type::StarStar | Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let l = as_number(&left, &data.operator, "Operands must be numbers.")?;
                let r = as_number(&right, &data.operator, "Operands must be numbers.")?;

                match data.operator.kind {
                    Type::Minus => Ok(Object::from(l - r)),
                    Type::Star => Ok(Object::from(l * r)),
                    Type::Slash => {
                        if r == 0.0 {
                            Err(RuntimeError::new(data.operator.clone(), "Right operand must not be zero.".to_string()))
                        } else {
                            Ok(Object::from(l / r))
                        }
                    }
                    Type::StarStar => Ok(Object::from(l.powf(r))),
                    Type::Greater => Ok(Object::from(l > r)),
                    Type::GreaterEqual => Ok(Object::from(l >= r)),
                    Type::Less => Ok(Object::from(l < r)),
                    Type::LessEqual => Ok(Object::from(l <= r)),
                    _ => unreachable!(),
                }
            }
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => Ok(Object::from(format!("{l}{r}"))),
                _ => Err(RuntimeError::new(data.operator.clone(), "Operands must be two numbers or two strings.".to_string())),
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!("binary expressions only carry arithmetic/comparison/equality operators"),
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(data) = expr else { unreachable!() };
        self.look_up_variable(&data.name, data.id)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(data) = expr else { unreachable!() };
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&distance) => self.current_scope.borrow_mut().assign_at(distance, &data.name, value.clone())?,
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;

        match data.operator.kind {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            Type::Or | Type::And => self.evaluate(&data.right),
            _ => unreachable!("logical expressions only carry 'and'/'or'"),
        }
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(data) = expr else { unreachable!() };
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        callee.call(self, &data.paren, arguments)
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Get(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&data.name, &object),
            Object::Class(class) => class
                .borrow()
                .get_static(&data.name.lexeme)
                .ok_or_else(|| RuntimeError::new(data.name.clone(), format!("Undefined property '{}'.", data.name.lexeme))),
            _ => Err(RuntimeError::new(data.name.clone(), "Only instances have properties.".to_string())),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Set(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => {
                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            }
            Object::Class(class) => {
                let value = self.evaluate(&data.value)?;
                class.borrow_mut().set_static(&data.name.lexeme, value.clone());
                Ok(value)
            }
            _ => Err(RuntimeError::new(data.name.clone(), "Only instances have fields.".to_string())),
        }
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::This(data) = expr else { unreachable!() };
        self.look_up_variable(&data.keyword, data.id)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Super(data) = expr else { unreachable!() };

        let distance = *self
            .locals
            .get(&data.id)
            .ok_or_else(|| RuntimeError::new(data.keyword.clone(), "Used 'super' outside a method.".to_string()))?;

        let superclass = match self.current_scope.borrow().get_at(distance, &data.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("'super' always resolves to a Class"),
        };

        let this_token = Token::new(Type::This, "this".to_string(), None, data.keyword.line);
        let instance = self.current_scope.borrow().get_at(distance - 1, &this_token)?;

        let method = superclass
            .borrow()
            .get_method(&data.method.lexeme)
            .ok_or_else(|| RuntimeError::new(data.method.clone(), format!("Undefined property '{}'.", data.method.lexeme)))?;

        Ok(Object::from(method.bind(instance)))
    }

    fn visit_function_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::FunctionLiteral(data) = expr else { unreachable!() };
        Ok(Object::from(Function::new(
            "anonymous".to_string(),
            Rc::clone(&data.params),
            Rc::clone(&data.body),
            Rc::clone(&self.current_scope),
            false,
        )))
    }

    fn visit_class_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::ClassLiteral(data) = expr else { unreachable!() };
        Ok(Object::from(self.declare_class(data, None)?))
    }
}

impl StmtVisitor<Result<(), Unwind>> for Interpreter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        println!("{value}");
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };
        self.current_scope.borrow_mut().define(&data.name, value)?;
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.current_scope)))));
        self.execute_block(&data.statements, environment)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body) {
                Ok(()) => {}
                Err(Unwind::Continue(_)) => continue,
                Err(Unwind::Break(_)) => break,
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }

    fn visit_throwable_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Throwable(data) = stmt else { unreachable!() };
        match data.kind {
            crate::stmt::ThrowableKind::Break => Err(Unwind::Break(data.keyword.clone())),
            crate::stmt::ThrowableKind::Continue => Err(Unwind::Continue(data.keyword.clone())),
        }
    }

    fn visit_function_def_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::FunctionDef(data) = stmt else { unreachable!() };
        let function = Function::new(
            data.name.lexeme.clone(),
            Rc::clone(&data.callable.params),
            Rc::clone(&data.callable.body),
            Rc::clone(&self.current_scope),
            false,
        );
        self.current_scope.borrow_mut().define(&data.name, Object::from(function))?;
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };
        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };
        self.declare_class(&data.callable, Some(&data.name))?;
        Ok(())
    }
}
