use crate::error::{Error, Result};

/// Spaces per indentation level.
pub const DEFAULT_INDENTATION: usize = 2;

const LINE_DIRECTIVE: &str = "#line";

/// Append-only text buffer used by every generator.
///
/// Tracks the logical line of the next character written. With line
/// directives enabled, `sync_line_number` re-bases that counter onto the
/// Java source line, so the counter then follows the original file.
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    buffer: String,
    indentation: usize,
    current_line: usize,
    emit_line_directives: bool,
    source_file: Option<String>,
    context: String,
}

impl SourceBuilder {
    pub fn new(emit_line_directives: bool) -> Self {
        Self {
            buffer: String::new(),
            indentation: 0,
            current_line: 1,
            emit_line_directives,
            source_file: None,
            context: String::new(),
        }
    }

    /// Names what is being generated, for unbalanced-indent diagnostics.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    pub fn set_context(&mut self, context: &str) {
        self.context = context.to_string();
    }

    /// Line baseline for a block that will be spliced into another builder.
    pub fn with_start_line(mut self, line: usize) -> Self {
        self.current_line = line;
        self
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.current_line += text.bytes().filter(|b| *b == b'\n').count();
        self.buffer.push_str(text);
        self
    }

    pub fn append_char(&mut self, c: char) -> &mut Self {
        if c == '\n' {
            self.current_line += 1;
        }
        self.buffer.push(c);
        self
    }

    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self.newline()
    }

    pub fn newline(&mut self) -> &mut Self {
        self.append_char('\n')
    }

    pub fn print_indent(&mut self) -> &mut Self {
        let pad = pad(self.indentation * DEFAULT_INDENTATION);
        self.append(&pad)
    }

    /// Indented text followed by a newline.
    pub fn indented_line(&mut self, text: &str) -> &mut Self {
        self.print_indent();
        self.append_line(text)
    }

    pub fn indent(&mut self) {
        self.indentation += 1;
    }

    pub fn unindent(&mut self) -> Result<()> {
        if self.indentation == 0 {
            return Err(Error::UnbalancedIndent {
                context: if self.context.is_empty() {
                    "source".to_string()
                } else {
                    self.context.clone()
                },
            });
        }
        self.indentation -= 1;
        Ok(())
    }

    pub fn indentation(&self) -> usize {
        self.indentation
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn emits_line_directives(&self) -> bool {
        self.emit_line_directives
    }

    /// Returns the accumulated text, leaving the builder empty for reuse.
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.buffer);
        self.reset();
        text
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Clears text and counters but keeps the allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.indentation = 0;
        self.current_line = 1;
        self.source_file = None;
    }

    /// Emits `#line N` when the tracked line differs from `line`.
    pub fn sync_line_number(&mut self, line: Option<usize>) {
        let Some(line) = line else {
            return;
        };
        if self.emit_line_directives && line != self.current_line {
            self.append(&format!("{} {}\n", LINE_DIRECTIVE, line));
            self.current_line = line;
        }
    }

    /// Emits `#line N "file"` when the source file changes.
    pub fn sync_filename(&mut self, file_name: &str) {
        if self.emit_line_directives && self.source_file.as_deref() != Some(file_name) {
            let line = self.current_line;
            self.append(&format!("{} {} \"{}\"\n", LINE_DIRECTIVE, line, file_name));
            self.current_line = line;
            self.source_file = Some(file_name.to_string());
        }
    }

    /// Re-indents independently generated code to this builder's depth.
    ///
    /// Leading whitespace is stripped from every line and depth is recomputed
    /// from lines that start with `}` or end with `{`. `#line` directives are
    /// never indented. The result has no trailing newline.
    pub fn reindent(&self, code: &str) -> String {
        let mut indent = self.indentation * DEFAULT_INDENTATION;
        let mut lines = Vec::new();
        for raw in code.lines() {
            let line = raw.trim();
            if line.starts_with('}') {
                indent = indent.saturating_sub(DEFAULT_INDENTATION);
            }
            if line.is_empty() || line.starts_with(LINE_DIRECTIVE) {
                lines.push(line.to_string());
            } else {
                lines.push(format!("{}{}", pad(indent), line));
            }
            if line.ends_with('{') {
                indent += DEFAULT_INDENTATION;
            }
        }
        lines.join("\n")
    }
}

pub fn pad(width: usize) -> String {
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod line_tracking {
        use super::*;

        #[test]
        fn test_block_append_counts_newlines() {
            let mut builder = SourceBuilder::new(false);
            builder.append("a\nb\nc\n");
            assert_eq!(builder.current_line(), 4);

            let mut per_line = SourceBuilder::new(false);
            per_line.append_line("a").append_line("b").append_line("c");
            assert_eq!(per_line.current_line(), builder.current_line());
        }

        #[test]
        fn test_sync_line_number_is_idempotent() {
            let mut builder = SourceBuilder::new(true);
            builder.sync_line_number(Some(10));
            builder.sync_line_number(Some(10));
            assert_eq!(builder.as_str(), "#line 10\n");
            assert_eq!(builder.current_line(), 10);

            builder.append_line("x = 1;");
            builder.sync_line_number(Some(11));
            assert_eq!(builder.as_str(), "#line 10\nx = 1;\n");
        }

        #[test]
        fn test_sync_without_directives_emits_nothing() {
            let mut builder = SourceBuilder::new(false);
            builder.sync_line_number(Some(42));
            builder.sync_filename("Test.java");
            assert!(builder.is_empty());
        }

        #[test]
        fn test_sync_filename_is_idempotent() {
            let mut builder = SourceBuilder::new(true);
            builder.sync_filename("Test.java");
            builder.sync_filename("Test.java");
            assert_eq!(builder.as_str(), "#line 1 \"Test.java\"\n");
        }
    }

    mod indentation {
        use super::*;

        #[test]
        fn test_indented_line() {
            let mut builder = SourceBuilder::new(false);
            builder.indent();
            builder.indented_line("int x;");
            builder.unindent().unwrap();
            assert_eq!(builder.as_str(), "  int x;\n");
        }

        #[test]
        fn test_unindent_below_zero_is_error() {
            let mut builder = SourceBuilder::new(false).with_context("ComFooBar");
            builder.indent();
            assert!(builder.unindent().is_ok());
            let err = builder.unindent().unwrap_err();
            assert!(matches!(err, Error::UnbalancedIndent { .. }));
            assert!(err.to_string().contains("ComFooBar"));
        }
    }

    mod reindent {
        use super::*;

        #[test]
        fn test_reindent_by_braces() {
            let builder = SourceBuilder::new(false);
            let code = "{\nif (x) {\ny();\n}\n}\n";
            assert_eq!(
                builder.reindent(code),
                "{\n  if (x) {\n    y();\n  }\n}"
            );
        }

        #[test]
        fn test_reindent_strips_existing_whitespace_and_uses_depth() {
            let mut builder = SourceBuilder::new(false);
            builder.indent();
            let code = "      {\n        foo();\n   }";
            assert_eq!(builder.reindent(code), "  {\n    foo();\n  }");
        }

        #[test]
        fn test_reindent_skips_line_directives() {
            let builder = SourceBuilder::new(true);
            let code = "{\n#line 5\nfoo();\n}";
            assert_eq!(builder.reindent(code), "{\n#line 5\n  foo();\n}");
        }
    }

    mod reuse {
        use super::*;

        #[test]
        fn test_take_resets_state() {
            let mut builder = SourceBuilder::new(false);
            builder.indent();
            builder.append_line("one");
            let text = builder.take();
            assert_eq!(text, "one\n");
            assert!(builder.is_empty());
            assert_eq!(builder.indentation(), 0);
            assert_eq!(builder.current_line(), 1);
        }
    }
}
