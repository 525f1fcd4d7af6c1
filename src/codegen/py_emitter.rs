//! Python emitter: structure-preserving translation of the checked parse tree.
//!
//! The output mirrors the source statement for statement. The only structural
//! rewrite is the for loop, which has no Python counterpart and is flattened
//! into an initializer followed by a while loop.

use super::TranslationFailure;
use crate::parser::{Expr, IncDecOp, Program, ReadMode, Stmt, Target};

const INDENT: &str = "    ";

/// Builds the translated Python program one line at a time
pub struct PyEmitter {
    lines: Vec<String>,
    indent: usize,
}

impl PyEmitter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
        }
    }

    /// Translate a program into Python source. The whole body is wrapped in
    /// the conventional `if __name__ == "__main__":` guard.
    pub fn emit(&mut self, program: &Program) -> Result<String, TranslationFailure> {
        self.lines.clear();
        self.indent = 0;

        self.push_line("if __name__ == \"__main__\":");
        self.indent += 1;

        let before = self.lines.len();
        for stmt in &program.body.statements {
            self.emit_stmt(stmt)?;
        }
        if self.lines.len() == before {
            self.push_line("pass");
        }

        self.indent -= 1;

        let mut output = self.lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Result<(), TranslationFailure> {
        match stmt {
            Stmt::VarDecl(decl) => {
                match &decl.initializer {
                    Some(init) => {
                        let [(name, _)] = decl.names.as_slice() else {
                            return Err(TranslationFailure(
                                "initialized declaration with multiple names".to_string(),
                            ));
                        };
                        let value = self.expr_text(init)?;
                        self.push_line(&format!("{} = {}", name, value));
                    }
                    // Uninitialized names each become a None binding so the
                    // name exists before first use
                    None => {
                        for (name, _) in &decl.names {
                            self.push_line(&format!("{} = None", name));
                        }
                    }
                }
                Ok(())
            }

            Stmt::Assign(assign) => {
                let target = self.target_text(&assign.target)?;
                let value = self.expr_text(&assign.value)?;
                self.push_line(&format!("{} = {}", target, value));
                Ok(())
            }

            Stmt::Print { expr, newline } => {
                let arg = self.expr_text(expr)?;
                if *newline {
                    self.push_line(&format!("print({})", arg));
                } else {
                    self.push_line(&format!("print({}, end=\"\")", arg));
                }
                Ok(())
            }

            Stmt::Read { name, mode, .. } => {
                let line = match mode {
                    ReadMode::Int => format!("{} = int(input())", name),
                    ReadMode::Float => format!("{} = float(input())", name),
                    ReadMode::Line => format!("{} = input()", name),
                };
                self.push_line(&line);
                Ok(())
            }

            Stmt::IncDec { name, op, .. } => {
                let operator = match op {
                    IncDecOp::Inc => "+",
                    IncDecOp::Dec => "-",
                };
                self.push_line(&format!("{} = {} {} 1", name, name, operator));
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let cond = self.condition_text(condition)?;
                self.push_line(&format!("if {}:", cond));
                self.emit_body(then_branch)?;

                if let Some(else_branch) = else_branch {
                    self.push_line("else:");
                    self.emit_body(else_branch)?;
                }
                Ok(())
            }

            Stmt::While { condition, body } => {
                let cond = self.condition_text(condition)?;
                self.push_line(&format!("while {}:", cond));
                self.emit_body(body)
            }

            // for (init; cond; update) body
            //   =>  init
            //       while cond:
            //           body
            //           update
            Stmt::For {
                init,
                condition,
                update,
                body,
            } => {
                self.emit_stmt(init)?;

                let cond = self.condition_text(condition)?;
                self.push_line(&format!("while {}:", cond));

                self.indent += 1;
                self.emit_flat(body)?;
                self.emit_stmt(update)?;
                self.indent -= 1;
                Ok(())
            }

            // Python has no block scoping; the statements are inlined
            Stmt::Block(block) => {
                for stmt in &block.statements {
                    self.emit_stmt(stmt)?;
                }
                Ok(())
            }
        }
    }

    /// Emit a control-flow body one level deeper, filling in `pass` if the
    /// body produced no lines
    fn emit_body(&mut self, stmt: &Stmt) -> Result<(), TranslationFailure> {
        self.indent += 1;
        let before = self.lines.len();
        self.emit_flat(stmt)?;
        if self.lines.len() == before {
            self.push_line("pass");
        }
        self.indent -= 1;
        Ok(())
    }

    /// Emit a statement, flattening a block into its statements
    fn emit_flat(&mut self, stmt: &Stmt) -> Result<(), TranslationFailure> {
        match stmt {
            Stmt::Block(block) => {
                for stmt in &block.statements {
                    self.emit_stmt(stmt)?;
                }
                Ok(())
            }
            other => self.emit_stmt(other),
        }
    }

    fn push_line(&mut self, text: &str) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.indent), text));
    }

    /// Render an expression as Python text. Operands keep their source
    /// order and parenthesization.
    fn expr_text(&self, expr: &Expr) -> Result<String, TranslationFailure> {
        match expr {
            Expr::IntLiteral(value, _) => Ok(value.to_string()),

            // {:?} keeps a trailing .0 so the literal stays a float in Python
            Expr::FloatLiteral(value, _) => Ok(format!("{:?}", value)),

            Expr::StringLiteral(value, _) => Ok(quote_string(value)),

            Expr::Variable(target) => self.target_text(target),

            Expr::Paren(inner, _) => Ok(format!("({})", self.expr_text(inner)?)),

            // A compound size must be parenthesized so '*' binds to the
            // whole expression
            Expr::NewArray { size, .. } => {
                let size_text = self.expr_text(size)?;
                match size.as_ref() {
                    Expr::Binary { .. } => Ok(format!("[None] * ({})", size_text)),
                    _ => Ok(format!("[None] * {}", size_text)),
                }
            }

            Expr::Binary {
                left, op, right, ..
            } => Ok(format!(
                "{} {} {}",
                self.expr_text(left)?,
                op.to_py_str(),
                self.expr_text(right)?
            )),
        }
    }

    /// Render a condition chain. '&&' and '||' are rewritten to 'and'/'or';
    /// every other operator passes through with its source spelling.
    fn condition_text(
        &self,
        condition: &crate::parser::Condition,
    ) -> Result<String, TranslationFailure> {
        let mut text = self.expr_text(&condition.first)?;
        for (op, operand) in &condition.rest {
            text.push(' ');
            text.push_str(op.to_py_str());
            text.push(' ');
            text.push_str(&self.expr_text(operand)?);
        }
        Ok(text)
    }

    fn target_text(&self, target: &Target) -> Result<String, TranslationFailure> {
        match &target.index {
            Some(index) => Ok(format!("{}[{}]", target.name, self.expr_text(index)?)),
            None => Ok(target.name.clone()),
        }
    }
}

impl Default for PyEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a string value as a Python double-quoted literal
fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{
        Assign, BinaryOp, Block, CondOp, Condition, Program, Scalar, Span, Type, VarDecl,
    };

    fn program(statements: Vec<Stmt>) -> Program {
        Program {
            body: Block { statements },
        }
    }

    fn int_lit(value: i64) -> Expr {
        Expr::IntLiteral(value, Span::default())
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(Target {
            name: name.to_string(),
            span: Span::default(),
            index: None,
        })
    }

    fn decl(ty: Type, name: &str, initializer: Option<Expr>) -> Stmt {
        Stmt::VarDecl(VarDecl {
            ty,
            names: vec![(name.to_string(), Span::default())],
            initializer,
        })
    }

    #[test]
    fn empty_program_emits_guard_and_pass() {
        let mut emitter = PyEmitter::new();
        let output = emitter.emit(&program(vec![])).unwrap();
        assert_eq!(output, "if __name__ == \"__main__\":\n    pass\n");
    }

    #[test]
    fn initialized_declaration_becomes_assignment() {
        let mut emitter = PyEmitter::new();
        let output = emitter
            .emit(&program(vec![decl(Type::Int, "x", Some(int_lit(3)))]))
            .unwrap();
        assert!(output.contains("    x = 3\n"));
    }

    #[test]
    fn uninitialized_names_become_none_bindings() {
        let mut emitter = PyEmitter::new();
        let stmt = Stmt::VarDecl(VarDecl {
            ty: Type::Float,
            names: vec![
                ("a".to_string(), Span::default()),
                ("b".to_string(), Span::default()),
            ],
            initializer: None,
        });
        let output = emitter.emit(&program(vec![stmt])).unwrap();
        assert!(output.contains("    a = None\n    b = None\n"));
    }

    #[test]
    fn float_literal_keeps_fractional_part() {
        let mut emitter = PyEmitter::new();
        let output = emitter
            .emit(&program(vec![decl(
                Type::Float,
                "f",
                Some(Expr::FloatLiteral(2.0, Span::default())),
            )]))
            .unwrap();
        assert!(output.contains("f = 2.0"));
    }

    #[test]
    fn array_creation_becomes_none_repetition() {
        let mut emitter = PyEmitter::new();
        let init = Expr::NewArray {
            elem: Scalar::Int,
            size: Box::new(int_lit(5)),
            span: Span::default(),
        };
        let output = emitter
            .emit(&program(vec![decl(Type::Array(Scalar::Int), "a", Some(init))]))
            .unwrap();
        assert!(output.contains("a = [None] * 5"));
    }

    #[test]
    fn print_without_newline_suppresses_end() {
        let mut emitter = PyEmitter::new();
        let output = emitter
            .emit(&program(vec![Stmt::Print {
                expr: var("x"),
                newline: false,
            }]))
            .unwrap();
        assert!(output.contains("print(x, end=\"\")"));
    }

    #[test]
    fn reads_wrap_input_by_mode() {
        let mut emitter = PyEmitter::new();
        let stmts = vec![
            Stmt::Read {
                name: "i".to_string(),
                name_span: Span::default(),
                mode: ReadMode::Int,
            },
            Stmt::Read {
                name: "f".to_string(),
                name_span: Span::default(),
                mode: ReadMode::Float,
            },
            Stmt::Read {
                name: "s".to_string(),
                name_span: Span::default(),
                mode: ReadMode::Line,
            },
        ];
        let output = emitter.emit(&program(stmts)).unwrap();
        assert!(output.contains("i = int(input())"));
        assert!(output.contains("f = float(input())"));
        assert!(output.contains("s = input()"));
    }

    #[test]
    fn increment_expands_to_explicit_addition() {
        let mut emitter = PyEmitter::new();
        let output = emitter
            .emit(&program(vec![Stmt::IncDec {
                name: "i".to_string(),
                name_span: Span::default(),
                op: IncDecOp::Inc,
            }]))
            .unwrap();
        assert!(output.contains("i = i + 1"));
    }

    #[test]
    fn logical_operators_are_rewritten_in_conditions() {
        let mut emitter = PyEmitter::new();
        let condition = Condition {
            first: var("a"),
            rest: vec![
                (CondOp::Lt, var("b")),
                (CondOp::And, var("c")),
                (CondOp::Or, var("d")),
            ],
        };
        let output = emitter
            .emit(&program(vec![Stmt::While {
                condition,
                body: Box::new(Stmt::Block(Block { statements: vec![] })),
            }]))
            .unwrap();
        assert!(output.contains("while a < b and c or d:"));
        assert!(output.contains("        pass"));
    }

    #[test]
    fn for_loop_flattens_to_init_while_update() {
        let mut emitter = PyEmitter::new();
        let stmt = Stmt::For {
            init: Box::new(decl(Type::Int, "i", Some(int_lit(0)))),
            condition: Condition {
                first: var("i"),
                rest: vec![(CondOp::Lt, int_lit(10))],
            },
            update: Box::new(Stmt::IncDec {
                name: "i".to_string(),
                name_span: Span::default(),
                op: IncDecOp::Inc,
            }),
            body: Box::new(Stmt::Print {
                expr: var("i"),
                newline: true,
            }),
        };
        let output = emitter.emit(&program(vec![stmt])).unwrap();
        let expected = "\
if __name__ == \"__main__\":
    i = 0
    while i < 10:
        print(i)
        i = i + 1
";
        assert_eq!(output, expected);
    }

    #[test]
    fn parentheses_survive_translation() {
        let mut emitter = PyEmitter::new();
        let expr = Expr::Binary {
            left: Box::new(Expr::Paren(
                Box::new(Expr::Binary {
                    left: Box::new(var("a")),
                    op: BinaryOp::Add,
                    right: Box::new(var("b")),
                    span: Span::default(),
                }),
                Span::default(),
            )),
            op: BinaryOp::Mul,
            right: Box::new(int_lit(2)),
            span: Span::default(),
        };
        let output = emitter
            .emit(&program(vec![Stmt::Assign(Assign {
                target: Target {
                    name: "c".to_string(),
                    span: Span::default(),
                    index: None,
                },
                value: expr,
            })]))
            .unwrap();
        assert!(output.contains("c = (a + b) * 2"));
    }

    #[test]
    fn multi_name_initializer_is_a_translation_failure() {
        let mut emitter = PyEmitter::new();
        let stmt = Stmt::VarDecl(VarDecl {
            ty: Type::Int,
            names: vec![
                ("a".to_string(), Span::default()),
                ("b".to_string(), Span::default()),
            ],
            initializer: Some(int_lit(1)),
        });
        assert!(emitter.emit(&program(vec![stmt])).is_err());
    }
}
