use std::collections::HashMap;
use std::mem;

use crate::error::{LoxError, ResolveError};
use crate::expr::{ClassLiteralData, Expr, ExprVisitor, FunctionLiteralData};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{Stmt, StmtVisitor};
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

/// A single lexical scope on the resolver's stack. Tracks not just whether a
/// name is bound, but whether it's been declared by source (`declared`, for
/// the unused-variable check) and whether it's been read (`used`). Synthetic
/// bindings (`this`, `super`) go in `bindings` only, bypassing both.
#[derive(Default)]
struct Scope {
    bindings: HashMap<String, bool>,
    declared: HashMap<String, Token>,
    used: std::collections::HashSet<String>,
}

/// Static pass between parsing and evaluation: computes, for every variable
/// reference, how many enclosing scopes to walk to find its binding, and
/// rejects a handful of semantically-invalid-but-syntactically-fine programs
/// (`return` outside a function, `this`/`super` outside a class, jumping out
/// of a loop, unreachable code after a jump, unused locals, ...).
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    scopes: Vec<Scope>,
    current_function: FunctionType,
    current_class: ClassType,
    current_loop_depth: usize,
    /// Set to the token of a `return`/`break`/`continue` once it has been
    /// validly resolved; the next statement resolved while this is still set
    /// is unreachable. Checked (and cleared) at the top of `resolve_stmt`.
    active_jump: Option<Token>,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter) -> Self {
        Resolver {
            interpreter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            current_loop_depth: 0,
            active_jump: None,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        if let Some(jump) = self.active_jump.take() {
            ResolveError { token: jump, message: "Jump causes unreachable code.".to_string() }.report();
        }

        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    /// Resolves the single top-level `Block` statement the parser produces.
    pub fn resolve_program(&mut self, statement: &Stmt) {
        self.resolve_stmt(statement);
    }

    fn resolve_function_literal(&mut self, literal: &FunctionLiteralData, kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);
        // A function literal is its own jump boundary: a `break`/`continue`
        // lexically inside it never refers to a loop in the enclosing code.
        let enclosing_loop_depth = mem::replace(&mut self.current_loop_depth, 0);

        self.begin_scope();
        for param in literal.params.iter() {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&literal.body);
        self.end_scope();
        self.active_jump = None;

        self.current_function = enclosing_function;
        self.current_loop_depth = enclosing_loop_depth;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Reports an `"Unused local variable."` diagnostic for every name this
    /// scope declared (via source, not a synthetic binding) but never read.
    fn end_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for (name, token) in scope.declared {
                if !scope.used.contains(&name) {
                    ResolveError { token, message: "Unused local variable.".to_string() }.report();
                }
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.bindings.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: format!("A variable is already defined with name '{}' in this scope.", name.lexeme),
            }
            .report();
        }

        scope.bindings.insert(name.lexeme.clone(), false);
        scope.declared.insert(name.lexeme.clone(), name.clone());
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        scope.bindings.insert(name.lexeme.clone(), true);
    }

    /// Binds a name without going through source-level declaration tracking:
    /// `this` and `super` are never reported as unused.
    fn declare_synthetic(&mut self, name: &str) {
        let Some(scope) = self.scopes.last_mut() else { return };

        scope.bindings.insert(name.to_string(), true);
        scope.used.insert(name.to_string());
    }

    fn resolve_local(&mut self, expr: &Expr, name: &Token) {
        for (i, scope) in self.scopes.iter_mut().rev().enumerate() {
            if scope.bindings.contains_key(&name.lexeme) {
                scope.used.insert(name.lexeme.clone());
                self.interpreter.resolve(expr.id(), i);
                return;
            }
        }

        if !self.interpreter.has_global(&name.lexeme) {
            ResolveError { token: name.clone(), message: "Cannot access undeclared variable.".to_string() }.report();
        }
    }

    /// Shared by a named class declaration and an anonymous class expression:
    /// opens the `super`/`this` scopes, resolves methods, then resolves the
    /// static members in their own sibling scope so statics see each other by
    /// plain name while methods only reach them through `ClassName.field`.
    fn resolve_class_literal(&mut self, literal: &ClassLiteralData, class_name: &str) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        if let Some(superclass) = &literal.superclass {
            if let Expr::Variable(variable) = superclass.as_ref() {
                if variable.name.lexeme == class_name {
                    ResolveError { token: variable.name.clone(), message: "A class can't inherit from itself.".to_string() }.report();
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);
        }

        // The interpreter always builds a `methods_scope` holding `super`
        // (defaulting to the root `Object` class when there is no explicit
        // superclass), so the resolver must always open a matching scope
        // here or every enclosing-scope variable a method captures resolves
        // one level too shallow.
        self.begin_scope();
        self.declare_synthetic("super");

        self.begin_scope();
        self.declare_synthetic("this");

        for method in &literal.methods {
            let Stmt::FunctionDef(function) = method else { unreachable!("class body only contains FunctionDef methods") };
            let kind = if function.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function_literal(&function.callable, kind);
        }

        self.end_scope();
        self.end_scope();

        self.current_class = enclosing_class;

        // Static members are resolved in a scope of their own: earlier
        // statics are visible to later ones by plain name, but methods
        // (resolved above, in a sibling scope) never see into it.
        self.begin_scope();
        self.resolve(&literal.static_members);
        self.end_scope();
    }
}

impl ExprVisitor<()> for Resolver<'_> {
    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(variable) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if scope.bindings.get(&variable.name.lexeme) == Some(&false) {
                ResolveError { token: variable.name.clone(), message: "Can't read local variable in its own initializer.".to_string() }.report();
            }
        }

        self.resolve_local(expr, &variable.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(assign) = expr else { unreachable!() };

        self.resolve_expr(&assign.value);
        self.resolve_local(expr, &assign.name);
    }

    fn visit_literal_expr(&mut self, _expr: &Expr) {}

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(logical) = expr else { unreachable!() };

        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(unary) = expr else { unreachable!() };

        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(binary) = expr else { unreachable!() };

        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.resolve_expr(&grouping.expr);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(call) = expr else { unreachable!() };

        self.resolve_expr(&call.callee);
        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) {
        let Expr::Get(get) = expr else { unreachable!() };

        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, expr: &Expr) {
        let Expr::Set(set) = expr else { unreachable!() };

        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, expr: &Expr) {
        let Expr::This(this) = expr else { unreachable!() };

        if self.current_class == ClassType::None {
            ResolveError { token: this.keyword.clone(), message: "Can't use 'this' outside of a class.".to_string() }.report();
            return;
        }

        self.resolve_local(expr, &this.keyword);
    }

    fn visit_super_expr(&mut self, expr: &Expr) {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        match self.current_class {
            ClassType::Subclass => {}
            ClassType::None => {
                ResolveError { token: super_expr.keyword.clone(), message: "Can't use 'super' outside of a class.".to_string() }.report();
            }
            ClassType::Class => {
                ResolveError { token: super_expr.keyword.clone(), message: "Can't use 'super' in a class with no superclass.".to_string() }.report();
            }
        }

        self.resolve_local(expr, &super_expr.keyword);
    }

    fn visit_function_literal_expr(&mut self, expr: &Expr) {
        let Expr::FunctionLiteral(literal) = expr else { unreachable!() };

        self.resolve_function_literal(literal, FunctionType::Function);
    }

    fn visit_class_literal_expr(&mut self, expr: &Expr) {
        let Expr::ClassLiteral(literal) = expr else { unreachable!() };

        self.resolve_class_literal(literal, "");
    }
}

impl StmtVisitor<()> for Resolver<'_> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(block) = stmt else { unreachable!() };

        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(var) = stmt else { unreachable!() };

        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_def_stmt(&mut self, stmt: &Stmt) {
        let Stmt::FunctionDef(function) = stmt else { unreachable!() };

        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function_literal(&function.callable, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(expr) = stmt else { unreachable!() };

        self.resolve_expr(&expr.expr);
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(if_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&if_stmt.condition);

        self.resolve_stmt(&if_stmt.then_branch);
        let then_jump = self.active_jump.take();

        let else_jump = if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
            self.active_jump.take()
        } else {
            None
        };

        // A jump only makes what follows unreachable if it's unconditional:
        // both branches must jump, or neither counts.
        self.active_jump = if then_jump.is_some() && else_jump.is_some() { then_jump } else { None };
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(print) = stmt else { unreachable!() };

        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(return_stmt) = stmt else { unreachable!() };

        let returns_nil = match &return_stmt.value {
            None => true,
            Some(Expr::Literal(literal)) => literal.value == Literal::Nil,
            Some(_) => false,
        };

        if self.current_function == FunctionType::None {
            ResolveError { token: return_stmt.keyword.clone(), message: "Can't return from top-level code.".to_string() }.report();
        } else if self.current_function == FunctionType::Initializer && !returns_nil {
            ResolveError { token: return_stmt.keyword.clone(), message: "Can't return a value from an initializer.".to_string() }.report();
        } else {
            self.active_jump = Some(return_stmt.keyword.clone());
        }

        if let Some(value) = &return_stmt.value {
            self.resolve_expr(value);
        }
    }

    fn visit_throwable_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Throwable(throwable) = stmt else { unreachable!() };

        if self.current_loop_depth == 0 {
            ResolveError { token: throwable.keyword.clone(), message: "Can't jump from outside loop.".to_string() }.report();
            return;
        }

        self.active_jump = Some(throwable.keyword.clone());
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(while_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&while_stmt.condition);

        self.current_loop_depth += 1;
        self.resolve_stmt(&while_stmt.body);
        self.current_loop_depth -= 1;

        self.active_jump = None;
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Class(class_stmt) = stmt else { unreachable!() };

        self.declare(&class_stmt.name);
        self.define(&class_stmt.name);

        self.resolve_class_literal(&class_stmt.callable, &class_stmt.name.lexeme);
    }
}
