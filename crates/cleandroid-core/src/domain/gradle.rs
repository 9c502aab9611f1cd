//! Module build script patching (`build.gradle` / `build.gradle.kts`).

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{DependencyEntry, DomainError, PatchReport, TextDocument};

const DOCUMENT: &str = "module build script";
const BLOCK: &str = "dependencies {";
const DEFAULT_INDENT: &str = "    ";

/// Build script language, which decides the declaration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradleDialect {
    /// `build.gradle.kts`
    Kotlin,
    /// `build.gradle`
    Groovy,
}

impl GradleDialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("kts") => Self::Kotlin,
            _ => Self::Groovy,
        }
    }
}

/// Append declaration lines for `entries` inside the top-level
/// `dependencies { … }` block, skipping lines already present anywhere in the
/// script.
///
/// Fails with [`DomainError::MissingAnchor`] when there is no top-level
/// dependencies block; the document is then left untouched.
#[instrument(skip_all, fields(entries = entries.len(), dialect = ?dialect))]
pub fn add_dependencies(
    document: &mut TextDocument,
    entries: &[&DependencyEntry],
    dialect: GradleDialect,
) -> Result<PatchReport, DomainError> {
    let block = find_dependencies_block(document)?;

    let mut report = PatchReport::default();
    let mut pending: Vec<String> = Vec::new();
    for entry in entries {
        let line = entry.gradle_line(dialect);
        let present = document.contains_line(&line) || pending.contains(&line);
        if !present {
            pending.push(line.clone());
        }
        report.record(line, present);
    }

    if pending.is_empty() {
        debug!("all dependencies already declared");
        return Ok(report);
    }

    let indent = block_indent(document, &block);
    let (row, col) = block.close;
    let insert_at = if document.lines()[row][..col].trim().is_empty() {
        row
    } else {
        // Closing brace shares its line with the opening or a declaration.
        let outer = document.indentation(block.open).to_owned();
        document.split_line(row, col, &outer);
        row + 1
    };

    document.insert_lines(
        insert_at,
        pending.into_iter().map(|line| format!("{indent}{line}")),
    );

    debug!(added = report.added.len(), "dependencies inserted");
    Ok(report)
}

/// Location of the top-level dependencies block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    /// Line holding `dependencies {`.
    open: usize,
    /// Line and byte column of the matching `}`.
    close: (usize, usize),
}

/// Find `dependencies {` at brace depth zero and its matching `}`.
///
/// Braces inside string literals and comments are ignored, so
/// `buildscript { dependencies { … } }` and `"${x}"` do not confuse the
/// search.
fn find_dependencies_block(document: &TextDocument) -> Result<Block, DomainError> {
    let mut scanner = BraceScanner::default();
    let mut depth: usize = 0;
    let mut open: Option<(usize, usize)> = None; // (line, depth inside block)

    for (row, line) in document.lines().iter().enumerate() {
        let starts_block = open.is_none() && depth == 0 && opens_dependencies(line);

        for (col, brace) in scanner.scan(line) {
            match brace {
                '{' => {
                    depth += 1;
                    if starts_block && open.is_none() {
                        open = Some((row, depth));
                    }
                }
                _ => {
                    if let Some((open_row, inner)) = open {
                        if depth == inner {
                            return Ok(Block {
                                open: open_row,
                                close: (row, col),
                            });
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
            }
        }
    }

    Err(DomainError::MissingAnchor {
        document: DOCUMENT,
        anchor: BLOCK,
    })
}

fn opens_dependencies(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("dependencies")
        .is_some_and(|rest| rest.trim_start().starts_with('{'))
}

/// Indentation of the first declaration inside the block, else one level
/// deeper than the `dependencies` line.
fn block_indent(document: &TextDocument, block: &Block) -> String {
    let first_inner = (block.open + 1..block.close.0).find(|&i| !document.trimmed(i).is_empty());
    match first_inner {
        Some(i) => document.indentation(i).to_owned(),
        None => format!("{}{DEFAULT_INDENT}", document.indentation(block.open)),
    }
}

/// Finds structural braces line by line, skipping strings and comments.
#[derive(Debug, Default)]
struct BraceScanner {
    in_block_comment: bool,
    in_triple_string: bool,
}

impl BraceScanner {
    fn scan(&mut self, line: &str) -> Vec<(usize, char)> {
        let bytes = line.as_bytes();
        let mut braces = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let rest = &bytes[i..];

            if self.in_block_comment {
                if rest.starts_with(b"*/") {
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            if self.in_triple_string {
                if rest.starts_with(b"\"\"\"") {
                    self.in_triple_string = false;
                    i += 3;
                } else {
                    i += 1;
                }
                continue;
            }

            match bytes[i] {
                b'/' if rest.starts_with(b"//") => break,
                b'/' if rest.starts_with(b"/*") => {
                    self.in_block_comment = true;
                    i += 2;
                }
                b'"' if rest.starts_with(b"\"\"\"") => {
                    self.in_triple_string = true;
                    i += 3;
                }
                quote @ (b'"' | b'\'') => {
                    i = skip_string(bytes, i + 1, quote);
                }
                b'{' => {
                    braces.push((i, '{'));
                    i += 1;
                }
                b'}' => {
                    braces.push((i, '}'));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        braces
    }
}

/// Index just past the closing `quote`, honouring backslash escapes.
/// Unterminated strings run to the end of the line.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
