//! Diagnostic reporter that collects diagnostics and resolves source positions.

use super::{Diagnostic, SourceLocation};

/// Collects diagnostics during compilation and maps byte offsets back to
/// line/column positions in the original source.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    source: String,
    file: String,
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl DiagnosticReporter {
    pub fn new(file: &str, source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            diagnostics: Vec::new(),
            source: source.to_string(),
            file: file.to_string(),
            line_starts,
        }
    }

    /// Resolve a byte offset to a source location plus the line's content
    pub fn location_from_offset(&self, offset: usize) -> (SourceLocation, String) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };

        let line_start = self.line_starts[line_idx];
        let column = offset - line_start + 1;
        let line_content = self.get_line(line_idx + 1);

        (
            SourceLocation::new(&self.file, line_idx + 1, column, 1),
            line_content,
        )
    }

    /// Get a specific line's content (1-based)
    pub fn get_line(&self, line_num: usize) -> String {
        if line_num == 0 || line_num > self.line_starts.len() {
            return String::new();
        }

        let start = self.line_starts[line_num - 1];
        let end = self
            .line_starts
            .get(line_num)
            .map(|&next| next.saturating_sub(1))
            .unwrap_or(self.source.len());

        self.source[start..end].trim_end_matches('\r').to_string()
    }

    /// Report a diagnostic with automatic source line lookup
    pub fn report(&mut self, diagnostic: Diagnostic, offset: usize, length: usize) {
        self.report_with_label(diagnostic, offset, length, "");
    }

    /// Report a diagnostic with a custom label under the underline
    pub fn report_with_label(
        &mut self,
        mut diagnostic: Diagnostic,
        offset: usize,
        length: usize,
        label: &str,
    ) {
        let (mut loc, line_content) = self.location_from_offset(offset);
        loc.length = length;

        diagnostic = diagnostic
            .with_location(loc.clone())
            .with_source_line(line_content)
            .with_label(loc.column, length, label);

        self.diagnostics.push(diagnostic);
    }

    /// Add a raw diagnostic (already formatted)
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
