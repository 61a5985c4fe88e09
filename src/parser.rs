use std::rc::Rc;

use crate::error::{LoxError, ParseError};
use crate::expr::{
    AssignData, BinaryData, CallData, ClassLiteralData, Expr, ExprId, FunctionLiteralData, GetData,
    GroupingData, LiteralData, LogicalData, SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionDefData, IfData, PrintData, ReturnData, Stmt,
    ThrowableData, ThrowableKind, VarData, WhileData,
};
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

const MAX_ARGS: usize = 255;

/// Returns whether the next token is any of the given types, consuming it if so.
macro_rules! matches {
    ( $self:ident, $( $kind:expr ),+ ) => {{
        if $( $self.check($kind) )||+ {
            $self.advance();
            true
        } else {
            false
        }
    }};
}

/// Recursive-descent parser producing a single top-level `Block` statement.
///
/// - Program     -> Declaration* EOF ;
/// - Declaration -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl   -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" ClassBody "}" ;
/// - ClassBody   -> ( StaticMember | Method )* ;
/// - Method      -> "fun"? IDENTIFIER "(" Parameters? ")" Block ;
/// - StaticMember -> "static" ( VarDecl | FunDecl | ClassDecl ) ;
/// - FunDecl     -> "fun" Function ;
/// - VarDecl     -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement   -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt
///                | BreakStmt | ContinueStmt | WhileStmt | Block ;
/// - ExprStmt    -> Expression ";" ;
/// - ForStmt     -> "for" "(" ( Decleration | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt      -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt   -> "print" Expression ";" ;
/// - ReturnStmt  -> "return" Expression? ";" ;
/// - BreakStmt   -> "break" ";" ;
/// - ContinueStmt -> "continue" ";" ;
/// - WhileStmt   -> "while" "(" Expression ")" Statement ;
/// - Expression  -> Assignment ;
/// - Assignment  -> ( Call "." )? IDENTIFIER "=" Assignment | LogicOr ;
/// - LogicOr     -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd    -> Equality ( "and" Equality )* ;
/// - Equality    -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison  -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term        -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor      -> Exponent ( ( "*" | "/" ) Exponent )* ;
/// - Exponent    -> Unary ( "**" Exponent )? ;
/// - Unary       -> ( "!" | "-" ) Unary | Call ;
/// - Arguments   -> Expression ( "," Expression )* ;
/// - Call        -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Primary     -> NUMBER | STRING | "false" | "true" | "nil" | "this" | "(" Expression ")"
///                | IDENTIFIER | "super" "." IDENTIFIER | "fun" "(" Parameters? ")" Block ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    id_counter: ExprId,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, id_counter: 0 }
    }

    fn next_id(&mut self) -> ExprId {
        let id = self.id_counter;
        self.id_counter += 1;
        id
    }

    /// Parses the whole token stream into a single top-level `Block`, so the
    /// evaluator always runs one `Stmt` regardless of how many declarations
    /// the source holds.
    pub fn parse(&mut self) -> Stmt {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        Stmt::Block(BlockData { statements })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == Type::EOF
    }

    fn check(&self, kind: Type) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, kind: Type, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(ParseError { token: self.peek().clone(), message: message.to_string() })
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let statement = if matches!(self, Type::Class) {
            self.class_declaration()
        } else if matches!(self, Type::Fun) {
            self.function_declaration("function")
        } else if matches!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                error.report();
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?.clone();

        let superclass = if matches!(self, Type::Less) {
            self.consume(Type::Identifier, "Expect superclass name.")?;
            Some(Box::new(Expr::Variable(VariableData { id: self.next_id(), name: self.previous().clone() })))
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        let mut static_members = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if matches!(self, Type::Static) {
                static_members.push(self.static_member()?);
            } else {
                methods.push(self.method()?);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData {
            name,
            callable: ClassLiteralData { id: self.next_id(), superclass, methods, static_members },
        }))
    }

    /// A `static` member is always emitted as a `Var` statement: a static
    /// method or nested class is just a function/class literal bound to a
    /// name, the same way an ordinary variable binds any other value.
    fn static_member(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::Var) {
            return self.var_declaration();
        }

        if matches!(self, Type::Fun) {
            let name = self.consume(Type::Identifier, "Expect static method name.")?.clone();
            let callable = self.function_literal("method")?;
            return Ok(Stmt::Var(VarData { name, initializer: Some(Expr::FunctionLiteral(callable)) }));
        }

        if matches!(self, Type::Class) {
            let Stmt::Class(ClassData { name, callable }) = self.class_declaration()? else {
                unreachable!("class_declaration always returns Stmt::Class")
            };
            return Ok(Stmt::Var(VarData { name, initializer: Some(Expr::ClassLiteral(callable)) }));
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect 'var', 'fun', or 'class' after 'static'.".to_string() })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?.clone();

        let initializer = if matches!(self, Type::Equal) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::For) {
            return self.for_statement();
        }
        if matches!(self, Type::If) {
            return self.if_statement();
        }
        if matches!(self, Type::Print) {
            return self.print_statement();
        }
        if matches!(self, Type::Return) {
            return self.return_statement();
        }
        if matches!(self, Type::Break) {
            let keyword = self.previous().clone();
            self.consume(Type::Semicolon, "Expect ';' after 'break'.")?;
            return Ok(Stmt::Throwable(ThrowableData { kind: ThrowableKind::Break, keyword }));
        }
        if matches!(self, Type::Continue) {
            let keyword = self.previous().clone();
            self.consume(Type::Semicolon, "Expect ';' after 'continue'.")?;
            return Ok(Stmt::Throwable(ThrowableData { kind: ThrowableKind::Continue, keyword }));
        }
        if matches!(self, Type::While) {
            return self.while_statement();
        }
        if matches!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches!(self, Type::Semicolon) {
            None
        } else if matches!(self, Type::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after loop clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData { statements: vec![body, Stmt::Expression(ExpressionData { expr: increment })] });
        }

        let condition = condition.unwrap_or(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) }));
        body = Stmt::While(WhileData { condition, body: Box::new(body) });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if matches!(self, Type::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = self.statement()?;

        Ok(Stmt::While(WhileData { condition, body: Box::new(body) }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// A named function declaration: `fun name(params) { body }`. Built from
    /// the same literal shape an anonymous function expression uses.
    fn function_declaration(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?.clone();
        let callable = self.function_literal(kind)?;
        Ok(Stmt::FunctionDef(FunctionDefData { name, callable }))
    }

    /// A class method: the leading `fun` keyword is optional.
    fn method(&mut self) -> ParseResult<Stmt> {
        matches!(self, Type::Fun);
        self.function_declaration("method")
    }

    /// Parses `(params) { body }`, used for named functions, methods, and
    /// anonymous function expressions alike.
    fn function_literal(&mut self, kind: &str) -> ParseResult<FunctionLiteralData> {
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    ParseError { token: self.peek().clone(), message: format!("Can't have more than {MAX_ARGS} parameters.") }.report();
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?.clone());

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;

        let body = self.block()?;

        Ok(FunctionLiteralData { id: self.next_id(), params: Rc::from(params), body: Rc::from(body) })
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// `(Call ".")? IDENTIFIER "=" Assignment | LogicOr`. An invalid target
    /// (e.g. `1 = 2`) is reported but doesn't abort parsing of the rest of
    /// the expression.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches!(self, Type::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(VariableData { name, .. }) => {
                    Ok(Expr::Assign(AssignData { id: self.next_id(), name, value: Box::new(value) }))
                }
                Expr::Get(GetData { object, name, .. }) => {
                    Ok(Expr::Set(SetData { id: self.next_id(), object, name, value: Box::new(value) }))
                }
                other => {
                    ParseError { token: equals, message: "Invalid assignment target.".to_string() }.report();
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while matches!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.exponent()?;

        while matches!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.exponent()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    /// Right-associative: `2 ** 3 ** 2` parses as `2 ** (3 ** 2)`.
    fn exponent(&mut self) -> ParseResult<Expr> {
        let expr = self.unary()?;

        if matches!(self, Type::StarStar) {
            let operator = self.previous().clone();
            let right = self.exponent()?;
            return Ok(Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) }));
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { id: self.next_id(), operator, expr: Box::new(right) }));
        }

        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    ParseError { token: self.peek().clone(), message: format!("Can't have more than {MAX_ARGS} arguments.") }.report();
                }

                arguments.push(self.expression()?);

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?.clone();

        Ok(Expr::Call(CallData { id: self.next_id(), callee: Box::new(callee), paren, arguments }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?.clone();
                expr = Expr::Get(GetData { id: self.next_id(), object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::False) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(false) }));
        }
        if matches!(self, Type::True) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) }));
        }
        if matches!(self, Type::Nil) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }
        if matches!(self, Type::Number, Type::String) {
            let value = self.previous().literal.clone().expect("number or string token to carry a literal");
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value }));
        }
        if matches!(self, Type::Super) {
            let keyword = self.previous().clone();
            self.consume(Type::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(Type::Identifier, "Expect superclass method name.")?.clone();
            return Ok(Expr::Super(SuperData { id: self.next_id(), keyword, method }));
        }
        if matches!(self, Type::This) {
            return Ok(Expr::This(ThisData { id: self.next_id(), keyword: self.previous().clone() }));
        }
        if matches!(self, Type::Identifier) {
            return Ok(Expr::Variable(VariableData { id: self.next_id(), name: self.previous().clone() }));
        }
        if matches!(self, Type::Fun) {
            let callable = self.function_literal("function")?;
            return Ok(Expr::FunctionLiteral(callable));
        }
        if matches!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { id: self.next_id(), expr: Box::new(expr) }));
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect expression.".to_string() })
    }

    /// Skips tokens until the next statement boundary, so one syntax error
    /// doesn't cascade into spurious errors for the rest of the file.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == Type::Semicolon {
                return;
            }

            match self.peek().kind {
                Type::Class | Type::Fun | Type::Var | Type::For | Type::If | Type::While | Type::Print | Type::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
