//! Line-oriented text document.
//!
//! Manifests and build files are edited as plain lines, never re-serialised
//! through a parser. Untouched lines are kept byte-for-byte, including any
//! `\r` before the newline and whether the file ends with a newline.

use std::fmt;

/// A text file held as an ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    // Each line excludes its `\n` but keeps a trailing `\r`, if any.
    lines: Vec<String>,
    trailing_newline: bool,
    crlf: bool,
}

impl TextDocument {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self {
                lines: Vec::new(),
                trailing_newline: false,
                crlf: false,
            };
        }

        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };

        Self {
            lines: body.split('\n').map(str::to_owned).collect(),
            trailing_newline,
            crlf: text.contains("\r\n"),
        }
    }

    /// Reassemble the document. `parse(s).render() == s` for every input.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line content without surrounding whitespace (and without `\r`).
    pub fn trimmed(&self, index: usize) -> &str {
        self.lines[index].trim()
    }

    /// `true` if some line equals `line` once both are whitespace-trimmed.
    pub fn contains_line(&self, line: &str) -> bool {
        let wanted = line.trim();
        self.lines.iter().any(|existing| existing.trim() == wanted)
    }

    /// Leading whitespace of the line at `index`.
    pub fn indentation(&self, index: usize) -> &str {
        let line = &self.lines[index];
        &line[..line.len() - line.trim_start().len()]
    }

    /// Insert lines before `index`, in order. New lines use the document's
    /// line ending.
    pub fn insert_lines<I>(&mut self, index: usize, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let decorated: Vec<String> = lines.into_iter().map(|l| self.decorate(l)).collect();
        self.lines.splice(index..index, decorated);
    }

    /// Append a line at the end of the document.
    pub fn push_line(&mut self, line: impl Into<String>) {
        let line = self.decorate(line.into());
        self.lines.push(line);
    }

    /// Split the line at `index` into `[..at]` and `[at..]`, keeping every
    /// character. The second half goes on a new line with `indent` prepended.
    pub fn split_line(&mut self, index: usize, at: usize, indent: &str) {
        let line = std::mem::take(&mut self.lines[index]);
        let (head, tail) = line.split_at(at);
        let head = head.trim_end();

        self.lines[index] = self.decorate(head.to_owned());
        // `tail` still carries the original `\r`, if any.
        self.lines.insert(index + 1, format!("{indent}{tail}"));
    }

    fn decorate(&self, mut line: String) -> String {
        if self.crlf && !line.ends_with('\r') {
            line.push('\r');
        }
        line
    }
}

impl fmt::Display for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_verbatim() {
        for text in [
            "",
            "\n",
            "single",
            "a\nb\n",
            "a\nb",
            "a\r\nb\r\n",
            "mixed\r\nendings\nhere\n",
            "\n\n  indented\t\n",
        ] {
            assert_eq!(TextDocument::parse(text).render(), text, "input {text:?}");
        }
    }

    #[test]
    fn contains_line_ignores_indentation_and_cr() {
        let doc = TextDocument::parse("    <uses-permission />\r\n");
        assert!(doc.contains_line("<uses-permission />"));
        assert!(!doc.contains_line("<uses-permission/>"));
    }

    #[test]
    fn inserted_lines_follow_crlf() {
        let mut doc = TextDocument::parse("a\r\nb\r\n");
        doc.insert_lines(1, ["x".to_string()]);
        assert_eq!(doc.render(), "a\r\nx\r\nb\r\n");
    }

    #[test]
    fn push_line_keeps_missing_final_newline() {
        let mut doc = TextDocument::parse("a");
        doc.push_line("b");
        assert_eq!(doc.render(), "a\nb");
    }

    #[test]
    fn split_line_moves_tail_to_new_line() {
        let mut doc = TextDocument::parse("  <a/></manifest>\n");
        doc.split_line(0, 6, "");
        assert_eq!(doc.render(), "  <a/>\n</manifest>\n");
    }

    #[test]
    fn indentation_of_line() {
        let doc = TextDocument::parse("\t  x\ny");
        assert_eq!(doc.indentation(0), "\t  ");
        assert_eq!(doc.indentation(1), "");
    }
}
