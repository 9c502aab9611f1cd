//! `gradle/libs.versions.toml` patching.
//!
//! The catalog is parsed with `toml` only to validate it and to see which
//! keys already exist. Edits are line insertions into the original text so
//! comments and formatting survive.

use tracing::{debug, instrument, warn};

use crate::domain::{DependencyEntry, DomainError, PatchReport, TextDocument};

const DOCUMENT: &str = "version catalog";

/// Catalog tables the patcher writes to, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Versions,
    Libraries,
    Plugins,
}

impl Section {
    const ALL: [Section; 3] = [Section::Versions, Section::Libraries, Section::Plugins];

    const fn name(self) -> &'static str {
        match self {
            Self::Versions => "versions",
            Self::Libraries => "libraries",
            Self::Plugins => "plugins",
        }
    }

    fn line_for(self, entry: &DependencyEntry) -> Option<String> {
        match self {
            Self::Versions => Some(entry.catalog_version_line()),
            Self::Libraries => Some(entry.catalog_declaration_line()),
            Self::Plugins => entry.catalog_plugin_line(),
        }
    }

    fn key_for(self, entry: &DependencyEntry) -> Option<&'static str> {
        match self {
            Self::Versions => Some(entry.version_key),
            Self::Libraries => Some(entry.library),
            Self::Plugins => entry.plugin.as_ref().map(|p| p.alias),
        }
    }
}

/// Add version, library and plugin lines for `entries`.
///
/// Each line is checked independently: it is skipped when the exact line is
/// already in the file or when its key is already defined in the target
/// table. Missing tables are appended at the end of the file.
///
/// Fails with [`DomainError::MalformedDocument`] when the catalog is not
/// valid TOML; the document is then left untouched.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn add_dependencies(
    document: &mut TextDocument,
    entries: &[&DependencyEntry],
) -> Result<PatchReport, DomainError> {
    let parsed: toml::Table =
        toml::from_str(&document.render()).map_err(|e| DomainError::MalformedDocument {
            document: DOCUMENT,
            reason: e.to_string(),
        })?;

    let mut report = PatchReport::default();

    for section in Section::ALL {
        let existing = parsed.get(section.name()).and_then(|v| v.as_table());
        let mut pending: Vec<String> = Vec::new();
        let mut pending_keys: Vec<&str> = Vec::new();

        for entry in entries {
            let (Some(line), Some(key)) = (section.line_for(entry), section.key_for(entry)) else {
                continue;
            };

            let exact = document.contains_line(&line) || pending.contains(&line);
            let key_taken = existing.is_some_and(|t| t.contains_key(key)) || pending_keys.contains(&key);

            if key_taken && !exact {
                warn!(
                    table = section.name(),
                    key,
                    "key already defined with a different value, leaving it untouched"
                );
            }

            let present = exact || key_taken;
            if !present {
                pending.push(line.clone());
                pending_keys.push(key);
            }
            report.record(line, present);
        }

        if !pending.is_empty() {
            debug!(table = section.name(), count = pending.len(), "appending to table");
            append_to_section(document, section, pending);
        }
    }

    Ok(report)
}

/// Insert `lines` after the last non-blank line of `[section]`, creating the
/// table at the end of the file if it does not exist.
fn append_to_section(document: &mut TextDocument, section: Section, lines: Vec<String>) {
    let header = format!("[{}]", section.name());

    let Some(start) =
        (0..document.len()).find(|&i| table_name(document.trimmed(i)).as_deref() == Some(section.name()))
    else {
        if !document.is_empty() && !document.trimmed(document.len() - 1).is_empty() {
            document.push_line("");
        }
        document.push_line(header);
        for line in lines {
            document.push_line(line);
        }
        return;
    };

    let end = (start + 1..document.len())
        .find(|&i| document.trimmed(i).starts_with('['))
        .unwrap_or(document.len());

    let insert_at = (start + 1..end)
        .rev()
        .find(|&i| !document.trimmed(i).is_empty())
        .map_or(start + 1, |last| last + 1);

    document.insert_lines(insert_at, lines);
}

/// Name of the table opened by a `[name]` header line, accepting the
/// spellings TOML allows: `[ versions ]`, `["versions"]`, `['versions']`,
/// optionally followed by a comment. Array-of-tables headers yield `None`;
/// dotted names come back verbatim and never equal a plain table name.
fn table_name(trimmed: &str) -> Option<String> {
    let inner = trimmed.strip_prefix('[')?;
    if inner.starts_with('[') {
        return None;
    }

    let mut quote = None;
    let mut close = None;
    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ']') => {
                close = Some(i);
                break;
            }
            _ => {}
        }
    }

    let close = close?;
    let rest = inner[close + 1..].trim_start();
    if !(rest.is_empty() || rest.starts_with('#')) {
        return None;
    }

    let key = inner[..close].trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&q| key.strip_prefix(q).and_then(|k| k.strip_suffix(q)))
        .unwrap_or(key);
    Some(unquoted.to_owned())
}
