//! `AndroidManifest.xml` permission patching.

use std::{collections::HashSet, sync::OnceLock};

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::{DomainError, PatchReport, PermissionCategory, TextDocument};

const DOCUMENT: &str = "AndroidManifest.xml";

/// Root closing tag; new declarations go immediately before it.
pub const MANIFEST_CLOSING_TAG: &str = "</manifest>";

const DEFAULT_INDENT: &str = "    ";

/// Canonical declaration line for a permission identifier.
///
/// Short identifiers (`INTERNET`) are qualified with `android.permission.`;
/// anything containing a dot is used as-is.
pub fn permission_line(permission: &str) -> String {
    format!("<uses-permission android:name=\"{}\" />", qualified_name(permission))
}

fn qualified_name(permission: &str) -> String {
    if permission.contains('.') {
        permission.to_owned()
    } else {
        format!("android.permission.{permission}")
    }
}

fn declared_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<uses-permission\s[^>]*?android:name\s*=\s*["']([^"']+)["']"#)
            .expect("uses-permission pattern is valid")
    })
}

/// `android:name` values of every `<uses-permission>` already in the file.
fn declared_permissions(document: &TextDocument) -> HashSet<String> {
    document
        .lines()
        .iter()
        .flat_map(|line| declared_name_pattern().captures_iter(line))
        .map(|caps| caps[1].to_owned())
        .collect()
}

/// Union of the categories' permissions, in catalog order, first occurrence
/// wins.
pub fn union_permissions<'a>(categories: &[&'a PermissionCategory]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .flat_map(|category| category.permissions.iter().copied())
        .filter(|permission| seen.insert(*permission))
        .collect()
}

/// Insert `<uses-permission>` lines for every selected permission not
/// already declared.
///
/// Fails with [`DomainError::MissingAnchor`] when the document has no
/// `</manifest>` tag, in which case the document is left untouched.
#[instrument(skip_all, fields(categories = categories.len()))]
pub fn add_permissions(
    document: &mut TextDocument,
    categories: &[&PermissionCategory],
) -> Result<PatchReport, DomainError> {
    let anchor = find_closing_tag(document)?;

    let mut report = PatchReport::default();
    let mut pending = Vec::new();
    let declared = declared_permissions(document);
    for permission in union_permissions(categories) {
        let line = permission_line(permission);
        let present = document.contains_line(&line) || declared.contains(&qualified_name(permission));
        if !present {
            pending.push(line.clone());
        }
        report.record(line, present);
    }

    if pending.is_empty() {
        debug!("all permissions already declared");
        return Ok(report);
    }

    let indent = permission_indent(document, anchor);
    let (row, col) = anchor;
    let insert_at = if document.lines()[row][..col].trim().is_empty() {
        row
    } else {
        // `</manifest>` shares its line with other content.
        document.split_line(row, col, "");
        row + 1
    };

    document.insert_lines(
        insert_at,
        pending.into_iter().map(|line| format!("{indent}{line}")),
    );

    debug!(added = report.added.len(), "permissions inserted");
    Ok(report)
}

/// Position (line, byte column) of the last `</manifest>`.
fn find_closing_tag(document: &TextDocument) -> Result<(usize, usize), DomainError> {
    document
        .lines()
        .iter()
        .enumerate()
        .rev()
        .find_map(|(row, line)| line.rfind(MANIFEST_CLOSING_TAG).map(|col| (row, col)))
        .ok_or(DomainError::MissingAnchor {
            document: DOCUMENT,
            anchor: MANIFEST_CLOSING_TAG,
        })
}

/// Match existing `<uses-permission>` indentation, else one level under the
/// root tag.
fn permission_indent(document: &TextDocument, (row, _): (usize, usize)) -> String {
    let existing = (0..document.len()).find(|&i| document.trimmed(i).starts_with("<uses-permission"));
    match existing {
        Some(i) => document.indentation(i).to_owned(),
        None => format!("{}{DEFAULT_INDENT}", document.indentation(row)),
    }
}
