//! Compilation driver: orchestrates scanning, parsing, semantic analysis
//! and Python emission over a single source file.

use crate::codegen::PyEmitter;
use crate::diagnostics::{codes, Diagnostic, DiagnosticReporter};
use crate::dot;
use crate::lexer::Scanner;
use crate::parser::Parser;
use crate::semantic::SemanticAnalyzer;

/// Everything a compilation run can produce
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// The translated Python program
    pub python: String,
    /// One line per token, when requested
    pub token_dump: Option<String>,
    /// Debug rendering of the parse tree, when requested
    pub tree_dump: Option<String>,
    /// Graphviz DOT rendering of the parse tree, when requested
    pub dot: Option<String>,
}

/// Drives a full compilation of one source file
pub struct Driver {
    file: String,
    source: String,
    dump_tokens: bool,
    dump_tree: bool,
    emit_dot: bool,
}

impl Driver {
    pub fn new(file: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source: source.into(),
            dump_tokens: false,
            dump_tree: false,
            emit_dot: false,
        }
    }

    pub fn dump_tokens(mut self, enabled: bool) -> Self {
        self.dump_tokens = enabled;
        self
    }

    pub fn dump_tree(mut self, enabled: bool) -> Self {
        self.dump_tree = enabled;
        self
    }

    pub fn emit_dot(mut self, enabled: bool) -> Self {
        self.emit_dot = enabled;
        self
    }

    /// Run the pipeline to completion, stopping at the first stage that
    /// produced errors
    pub fn compile(&self) -> Result<Artifacts, Vec<Diagnostic>> {
        let mut reporter = DiagnosticReporter::new(&self.file, &self.source);

        log::debug!("scanning {}", self.file);
        let tokens = Scanner::new(&self.source, &mut reporter).scan_tokens();
        if reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        let token_dump = self.dump_tokens.then(|| {
            let mut dump = String::new();
            for token in &tokens {
                dump.push_str(&format!("{:>5}  {}\n", token.offset, token));
            }
            dump
        });
        log::debug!("scanned {} tokens", tokens.len());

        log::debug!("parsing {}", self.file);
        let program = Parser::new(tokens, &mut reporter).parse();
        if reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        let tree_dump = self.dump_tree.then(|| format!("{:#?}", program));
        let dot = self.emit_dot.then(|| dot::render(&program));

        log::debug!("analyzing {}", self.file);
        let mut analyzer = SemanticAnalyzer::new();
        if let Err(err) = analyzer.analyze(&program) {
            reporter.report_with_label(
                Diagnostic::error(err.code(), err.to_string()),
                err.span.offset,
                err.span.length,
                "",
            );
            return Err(reporter.take_diagnostics());
        }

        log::debug!("emitting Python for {}", self.file);
        let mut emitter = PyEmitter::new();
        let python = match emitter.emit(&program) {
            Ok(python) => python,
            Err(failure) => {
                reporter.add(Diagnostic::error(
                    codes::TRANSLATION_FAILURE,
                    failure.to_string(),
                ));
                return Err(reporter.take_diagnostics());
            }
        };

        Ok(Artifacts {
            python,
            token_dump,
            tree_dump,
            dot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_small_program() {
        let source = "int x = 1;\nSystem.out.println(x);\n";
        let artifacts = Driver::new("test.java", source).compile().unwrap();
        assert!(artifacts.python.contains("x = 1"));
        assert!(artifacts.python.contains("print(x)"));
        assert!(artifacts.token_dump.is_none());
    }

    #[test]
    fn optional_artifacts_are_produced_on_request() {
        let source = "int x = 1;";
        let artifacts = Driver::new("test.java", source)
            .dump_tokens(true)
            .dump_tree(true)
            .emit_dot(true)
            .compile()
            .unwrap();
        assert!(artifacts.token_dump.unwrap().contains("Identifier"));
        assert!(artifacts.tree_dump.unwrap().contains("VarDecl"));
        assert!(artifacts.dot.unwrap().starts_with("digraph"));
    }

    #[test]
    fn semantic_errors_carry_their_code() {
        let diagnostics = Driver::new("test.java", "x = 1;")
            .compile()
            .unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "E201");
    }

    #[test]
    fn parser_errors_stop_the_pipeline() {
        let diagnostics = Driver::new("test.java", "int = 5;")
            .compile()
            .unwrap_err();
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().all(|d| d.is_error()));
    }
}
