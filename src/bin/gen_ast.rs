//! Regenerates the `Expr`/`Stmt` enum and data-struct boilerplate from a
//! table, the way *Crafting Interpreters*' own tool does. `expr.rs`/`stmt.rs`
//! are hand-maintained; run this and diff against them after changing a node
//! shape, rather than letting the two drift apart silently.
use std::env;

struct NodeSpec {
    name: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

const EXPR_NODES: &[NodeSpec] = &[
    NodeSpec { name: "Binary", fields: &[("left", "Box<Expr>"), ("operator", "Token"), ("right", "Box<Expr>")] },
    NodeSpec { name: "Grouping", fields: &[("expr", "Box<Expr>")] },
    NodeSpec { name: "Literal", fields: &[("value", "Literal")] },
    NodeSpec { name: "Unary", fields: &[("operator", "Token"), ("expr", "Box<Expr>")] },
    NodeSpec { name: "Variable", fields: &[("name", "Token")] },
    NodeSpec { name: "Assign", fields: &[("name", "Token"), ("value", "Box<Expr>")] },
    NodeSpec { name: "Logical", fields: &[("left", "Box<Expr>"), ("operator", "Token"), ("right", "Box<Expr>")] },
    NodeSpec { name: "Call", fields: &[("callee", "Box<Expr>"), ("paren", "Token"), ("arguments", "Vec<Expr>")] },
    NodeSpec { name: "Get", fields: &[("object", "Box<Expr>"), ("name", "Token")] },
    NodeSpec { name: "Set", fields: &[("object", "Box<Expr>"), ("name", "Token"), ("value", "Box<Expr>")] },
    NodeSpec { name: "This", fields: &[("keyword", "Token")] },
    NodeSpec { name: "Super", fields: &[("keyword", "Token"), ("method", "Token")] },
    NodeSpec { name: "FunctionLiteral", fields: &[("params", "Rc<[Token]>"), ("body", "Rc<[Stmt]>")] },
    NodeSpec { name: "ClassLiteral", fields: &[("superclass", "Option<Box<Expr>>"), ("methods", "Vec<Stmt>"), ("static_members", "Vec<Stmt>")] },
];

const STMT_NODES: &[NodeSpec] = &[
    NodeSpec { name: "Expression", fields: &[("expr", "Expr")] },
    NodeSpec { name: "Print", fields: &[("expr", "Expr")] },
    NodeSpec { name: "Var", fields: &[("name", "Token"), ("initializer", "Option<Expr>")] },
    NodeSpec { name: "Block", fields: &[("statements", "Vec<Stmt>")] },
    NodeSpec { name: "If", fields: &[("condition", "Expr"), ("then_branch", "Box<Stmt>"), ("else_branch", "Option<Box<Stmt>>")] },
    NodeSpec { name: "While", fields: &[("condition", "Expr"), ("body", "Box<Stmt>")] },
    NodeSpec { name: "Throwable", fields: &[("kind", "ThrowableKind"), ("keyword", "Token")] },
    NodeSpec { name: "FunctionDef", fields: &[("name", "Token"), ("callable", "FunctionLiteralData")] },
    NodeSpec { name: "Return", fields: &[("keyword", "Token"), ("value", "Option<Expr>")] },
    NodeSpec { name: "Class", fields: &[("name", "Token"), ("callable", "ClassLiteralData")] },
];

fn emit(base: &str, nodes: &[NodeSpec], has_id: bool) -> String {
    let mut out = String::new();

    for node in nodes {
        out += &format!("#[derive(Debug, Clone, PartialEq)]\npub struct {}Data {{\n", node.name);
        if has_id {
            out += "    pub id: ExprId,\n";
        }
        for (field_name, field_type) in node.fields {
            out += &format!("    pub {field_name}: {field_type},\n");
        }
        out += "}\n\n";
    }

    out += &format!("#[derive(Debug, Clone, PartialEq)]\npub enum {base} {{\n");
    for node in nodes {
        out += &format!("    {}({}Data),\n", node.name, node.name);
    }
    out += "}\n\n";

    out += &format!("pub trait {base}Visitor<T> {{\n");
    for node in nodes {
        out += &format!("    fn visit_{}_{}(&mut self, node: &{base}) -> T;\n", to_snake_case(node.name), base.to_lowercase());
    }
    out += "}\n";

    out
}

fn to_snake_case(name: &str) -> String {
    let mut snake = String::new();
    for (i, ch) in name.char_indices() {
        if ch.is_uppercase() && i != 0 {
            snake.push('_');
        }
        snake.extend(ch.to_lowercase());
    }
    snake
}

fn main() {
    let target = env::args().nth(1).unwrap_or_else(|| "expr".to_string());

    let generated = match target.as_str() {
        "expr" => emit("Expr", EXPR_NODES, true),
        "stmt" => emit("Stmt", STMT_NODES, false),
        other => {
            eprintln!("Usage: gen_ast [expr|stmt] (got '{other}')");
            std::process::exit(64);
        }
    };

    println!("{generated}");
}
