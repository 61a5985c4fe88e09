use crate::expr::{Expr, ExprVisitor};
use crate::stmt::{Stmt, StmtVisitor};

/// Returns a parenthesized, Lisp-like string: `(name child1 child2 ...)`.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {{
        let mut string = String::new();
        string += "(";
        string += $name;
        $(
            string += " ";
            string += &$x.accept($self);
        )*
        string += ")";
        string
    }};
}

/// Pretty-prints an AST back into parenthesized Lox-like text. Debug tool
/// only, not part of the evaluator.
pub struct Printer;

impl Printer {
    pub fn print(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }
}

impl ExprVisitor<String> for Printer {
    fn visit_literal_expr(&mut self, expr: &Expr) -> String {
        let Expr::Literal(data) = expr else { unreachable!() };
        data.value.to_string()
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> String {
        let Expr::Grouping(data) = expr else { unreachable!() };
        parenthesize!(self, "group", data.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Unary(data) = expr else { unreachable!() };
        parenthesize!(self, &data.operator.lexeme, data.expr)
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Binary(data) = expr else { unreachable!() };
        parenthesize!(self, &data.operator.lexeme, data.left, data.right)
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> String {
        let Expr::Logical(data) = expr else { unreachable!() };
        parenthesize!(self, &data.operator.lexeme, data.left, data.right)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> String {
        let Expr::Variable(data) = expr else { unreachable!() };
        data.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> String {
        let Expr::Assign(data) = expr else { unreachable!() };
        parenthesize!(self, &format!("= {}", data.name.lexeme), data.value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> String {
        let Expr::Call(data) = expr else { unreachable!() };
        let mut string = data.callee.accept(self);
        string += "(";
        let args: Vec<String> = data.arguments.iter().map(|arg| arg.accept(self)).collect();
        string += &args.join(" ");
        string += ")";
        string
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> String {
        let Expr::Get(data) = expr else { unreachable!() };
        format!("(. {} {})", data.object.accept(self), data.name.lexeme)
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> String {
        let Expr::Set(data) = expr else { unreachable!() };
        format!("(= (. {} {}) {})", data.object.accept(self), data.name.lexeme, data.value.accept(self))
    }

    fn visit_this_expr(&mut self, _expr: &Expr) -> String {
        "this".to_string()
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> String {
        let Expr::Super(data) = expr else { unreachable!() };
        format!("(super {})", data.method.lexeme)
    }

    fn visit_function_literal_expr(&mut self, expr: &Expr) -> String {
        let Expr::FunctionLiteral(data) = expr else { unreachable!() };
        let params: Vec<&str> = data.params.iter().map(|p| p.lexeme.as_str()).collect();
        let body: Vec<String> = data.body.iter().map(|stmt| stmt.accept(self)).collect();
        format!("(fun ({}) {{ {} }})", params.join(" "), body.join(" "))
    }

    fn visit_class_literal_expr(&mut self, expr: &Expr) -> String {
        let Expr::ClassLiteral(data) = expr else { unreachable!() };
        let methods: Vec<String> = data.methods.iter().map(|m| m.accept(self)).collect();
        format!("(class {})", methods.join(" "))
    }
}

impl StmtVisitor<String> for Printer {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        parenthesize!(self, "expr", data.expr)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Print(data) = stmt else { unreachable!() };
        parenthesize!(self, "print", data.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Var(data) = stmt else { unreachable!() };
        match &data.initializer {
            Some(initializer) => format!("(var {} = {})", data.name.lexeme, initializer.accept(self)),
            None => format!("(var {})", data.name.lexeme),
        }
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let body: Vec<String> = data.statements.iter().map(|stmt| stmt.accept(self)).collect();
        format!("{{ {} }}", body.join(" "))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::If(data) = stmt else { unreachable!() };
        let mut string = format!("(if {} {}", data.condition.accept(self), data.then_branch.accept(self));
        if let Some(else_branch) = &data.else_branch {
            string += &format!(" else {}", else_branch.accept(self));
        }
        string += ")";
        string
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::While(data) = stmt else { unreachable!() };
        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_throwable_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Throwable(data) = stmt else { unreachable!() };
        match data.kind {
            crate::stmt::ThrowableKind::Break => "(break)".to_string(),
            crate::stmt::ThrowableKind::Continue => "(continue)".to_string(),
        }
    }

    fn visit_function_def_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::FunctionDef(data) = stmt else { unreachable!() };
        let params: Vec<&str> = data.callable.params.iter().map(|p| p.lexeme.as_str()).collect();
        let body: Vec<String> = data.callable.body.iter().map(|stmt| stmt.accept(self)).collect();
        format!("(fun {} ({}) {{ {} }})", data.name.lexeme, params.join(" "), body.join(" "))
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Return(data) = stmt else { unreachable!() };
        match &data.value {
            Some(value) => format!("(return {})", value.accept(self)),
            None => "(return)".to_string(),
        }
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Class(data) = stmt else { unreachable!() };
        let methods: Vec<String> = data.callable.methods.iter().map(|m| m.accept(self)).collect();
        format!("(class {} {})", data.name.lexeme, methods.join(" "))
    }
}
