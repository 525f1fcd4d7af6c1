//! Graphviz DOT export of the parse tree, for debugging and teaching.

use crate::parser::{Block, Condition, Expr, IncDecOp, Program, ReadMode, Stmt, Target, Type};

/// Render a program's parse tree as a Graphviz DOT digraph
pub fn render(program: &Program) -> String {
    let mut builder = DotBuilder::new();
    let root = builder.node("program");
    builder.block(root, &program.body);
    builder.finish()
}

struct DotBuilder {
    out: String,
    next_id: usize,
}

impl DotBuilder {
    fn new() -> Self {
        let mut out = String::from("digraph ParseTree {\n");
        out.push_str("    node [shape=box, fontname=\"monospace\"];\n");
        Self { out, next_id: 0 }
    }

    fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }

    fn node(&mut self, label: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.out
            .push_str(&format!("    n{} [label=\"{}\"];\n", id, escape(label)));
        id
    }

    fn edge(&mut self, parent: usize, child: usize) {
        self.out.push_str(&format!("    n{} -> n{};\n", parent, child));
    }

    fn child(&mut self, parent: usize, label: &str) -> usize {
        let id = self.node(label);
        self.edge(parent, id);
        id
    }

    fn block(&mut self, parent: usize, block: &Block) {
        for stmt in &block.statements {
            self.stmt(parent, stmt);
        }
    }

    fn stmt(&mut self, parent: usize, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => {
                let node = self.child(parent, &format!("decl {}", decl.ty));
                for (name, _) in &decl.names {
                    self.child(node, name);
                }
                if let Some(init) = &decl.initializer {
                    self.expr(node, init);
                }
            }

            Stmt::Assign(assign) => {
                let node = self.child(parent, "=");
                self.target(node, &assign.target);
                self.expr(node, &assign.value);
            }

            Stmt::Print { expr, newline } => {
                let label = if *newline { "println" } else { "print" };
                let node = self.child(parent, label);
                self.expr(node, expr);
            }

            Stmt::Read { name, mode, .. } => {
                let method = match mode {
                    ReadMode::Int => "nextInt",
                    ReadMode::Float => "nextFloat",
                    ReadMode::Line => "nextLine",
                };
                let node = self.child(parent, &format!("read {}", method));
                self.child(node, name);
            }

            Stmt::IncDec { name, op, .. } => {
                let label = match op {
                    IncDecOp::Inc => format!("{}++", name),
                    IncDecOp::Dec => format!("{}--", name),
                };
                self.child(parent, &label);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let node = self.child(parent, "if");
                self.condition(node, condition);
                let then_node = self.child(node, "then");
                self.stmt(then_node, then_branch);
                if let Some(else_branch) = else_branch {
                    let else_node = self.child(node, "else");
                    self.stmt(else_node, else_branch);
                }
            }

            Stmt::While { condition, body } => {
                let node = self.child(parent, "while");
                self.condition(node, condition);
                let body_node = self.child(node, "body");
                self.stmt(body_node, body);
            }

            Stmt::For {
                init,
                condition,
                update,
                body,
            } => {
                let node = self.child(parent, "for");
                let init_node = self.child(node, "init");
                self.stmt(init_node, init);
                self.condition(node, condition);
                let update_node = self.child(node, "update");
                self.stmt(update_node, update);
                let body_node = self.child(node, "body");
                self.stmt(body_node, body);
            }

            Stmt::Block(block) => {
                let node = self.child(parent, "block");
                self.block(node, block);
            }
        }
    }

    fn condition(&mut self, parent: usize, condition: &Condition) {
        let node = self.child(parent, "cond");
        self.expr(node, &condition.first);
        for (op, operand) in &condition.rest {
            let op_node = self.child(node, op.as_str());
            self.expr(op_node, operand);
        }
    }

    fn expr(&mut self, parent: usize, expr: &Expr) {
        match expr {
            Expr::IntLiteral(value, _) => {
                self.child(parent, &value.to_string());
            }
            Expr::FloatLiteral(value, _) => {
                self.child(parent, &format!("{:?}", value));
            }
            Expr::StringLiteral(value, _) => {
                self.child(parent, &format!("\"{}\"", value));
            }
            Expr::Variable(target) => {
                self.target(parent, target);
            }
            Expr::Paren(inner, _) => {
                let node = self.child(parent, "( )");
                self.expr(node, inner);
            }
            Expr::NewArray { elem, size, .. } => {
                let node = self.child(parent, &format!("new {}", Type::Array(*elem)));
                self.expr(node, size);
            }
            Expr::Binary {
                left, op, right, ..
            } => {
                let node = self.child(parent, op.as_str());
                self.expr(node, left);
                self.expr(node, right);
            }
        }
    }

    fn target(&mut self, parent: usize, target: &Target) {
        match &target.index {
            Some(index) => {
                let node = self.child(parent, &format!("{}[ ]", target.name));
                self.expr(node, index);
            }
            None => {
                self.child(parent, &target.name);
            }
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Block, Span, Stmt, Target};

    #[test]
    fn renders_a_closed_digraph() {
        let program = Program {
            body: Block {
                statements: vec![Stmt::Print {
                    expr: Expr::Variable(Target {
                        name: "x".to_string(),
                        span: Span::default(),
                        index: None,
                    }),
                    newline: true,
                }],
            },
        };

        let dot = render(&program);
        assert!(dot.starts_with("digraph ParseTree {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("println"));
        assert!(dot.contains("n1 -> n2"));
    }

    #[test]
    fn escapes_string_literal_quotes() {
        let program = Program {
            body: Block {
                statements: vec![Stmt::Print {
                    expr: Expr::StringLiteral("hi".to_string(), Span::default()),
                    newline: true,
                }],
            },
        };

        let dot = render(&program);
        assert!(dot.contains("\\\"hi\\\""));
    }
}
