//! Flat `KEY=value` configuration file support.
//!
//! # Design
//! - `upsert` and `parse` are pure functions over file content; `EnvFile`
//!   owns the IO boundary.
//! - Comments and blank lines are never matched and always round-trip verbatim.
//! - Updated values are always written double-quoted. Existing unquoted values
//!   become quoted the first time they are touched; this is intentional and
//!   must not be "fixed" without checking operators' hand-edited files.
//! - Write-back goes through a temporary file in the same directory followed by
//!   a rename, so readers never observe a partially written file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

const COMMENT_MARKER: char = '#';
const EXPORT_PREFIX: &str = "export ";

/// A single `key=value` pair read from an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Variable name.
    pub key: String,
    /// Unquoted value.
    pub value: String,
}

/// Rewrite `content` so that `key` holds `value`.
///
/// Lines are matched with the same key grammar `parse` uses: an optional
/// `export ` prefix and whitespace around `=` are accepted. Every matching
/// line is replaced by `key="value"`, keeping an `export ` prefix. When no
/// line matches, the entry is appended; a newline is inserted first if the
/// existing content is non-empty and lacks a trailing newline.
#[must_use]
pub fn upsert(content: &str, key: &str, value: &str) -> String {
    let replacement = format!("{key}=\"{value}\"");
    let exported = format!("{EXPORT_PREFIX}{replacement}");
    let mut found = false;
    let mut lines: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        match split_assignment(line.trim()) {
            Some(assignment) if assignment.key == key => {
                lines.push(if assignment.exported {
                    &exported
                } else {
                    &replacement
                });
                found = true;
            }
            _ => lines.push(line),
        }
    }

    if !found {
        if content.is_empty() {
            // Splitting "" yields a single empty line; drop it so the entry
            // is not preceded by a blank line.
            lines.clear();
        } else if !content.ends_with('\n') {
            lines.push("");
        }
        lines.push(&replacement);
    }

    lines.join("\n")
}

/// Parse env-file content into entries, in file order.
///
/// Malformed lines (no `=`, empty or invalid key) are skipped.
#[must_use]
pub fn parse(content: &str) -> Vec<ConfigEntry> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let entry = parse_line(line);
            if entry.is_none() && !is_passthrough(line.trim()) {
                debug!(line = index + 1, "skipping malformed env file line");
            }
            entry
        })
        .collect()
}

fn is_passthrough(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

struct Assignment<'a> {
    key: &'a str,
    raw_value: &'a str,
    exported: bool,
}

fn split_assignment(trimmed: &str) -> Option<Assignment<'_>> {
    if is_passthrough(trimmed) {
        return None;
    }
    let (body, exported) = trimmed
        .strip_prefix(EXPORT_PREFIX)
        .map_or((trimmed, false), |rest| (rest.trim_start(), true));
    let (key, raw_value) = body.split_once('=')?;
    let key = key.trim();
    is_valid_key(key).then_some(Assignment {
        key,
        raw_value,
        exported,
    })
}

fn parse_line(line: &str) -> Option<ConfigEntry> {
    let assignment = split_assignment(line.trim())?;
    Some(ConfigEntry {
        key: assignment.key.to_string(),
        value: unquote(assignment.raw_value.trim()),
    })
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 {
        if let Some(inner) = raw.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            return unescape_double_quoted(inner);
        }
        if let Some(inner) = raw
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            return inner.to_string();
        }
    }
    match raw.find(" #") {
        Some(index) => raw[..index].trim_end().to_string(),
        None => raw.to_string(),
    }
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut output = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('"') => output.push('"'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

/// Handle to an env file on disk.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    /// Reference the env file at `path`; the file does not need to exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file content, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for IO failures other than a missing file.
    pub fn read(&self) -> ConfigResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::io("env_file.read", &self.path, err)),
        }
    }

    /// Parse the file into entries; a missing file yields no entries.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn entries(&self) -> ConfigResult<Vec<ConfigEntry>> {
        Ok(self.read()?.as_deref().map(parse).unwrap_or_default())
    }

    /// Replace the whole file with `content` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary file cannot be written or renamed
    /// over the target.
    pub fn write_atomic(&self, content: &str) -> ConfigResult<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut staged = NamedTempFile::new_in(&parent)
            .map_err(|err| ConfigError::io("env_file.stage", &parent, err))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| ConfigError::io("env_file.write", staged.path(), err))?;
        staged
            .persist(&self.path)
            .map_err(|err| ConfigError::io("env_file.persist", &self.path, err.error))?;
        Ok(())
    }

    /// Set `key` to `value`, creating the file when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when reading or writing the file fails.
    pub fn upsert(&self, key: &str, value: &str) -> ConfigResult<()> {
        let current = self.read()?.unwrap_or_default();
        let updated = upsert(&current, key, value);
        self.write_atomic(&updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_into_empty_content_has_no_leading_newline() {
        assert_eq!(upsert("", "JWT_SECRET", "abc"), "JWT_SECRET=\"abc\"");
    }

    #[test]
    fn upsert_is_idempotent() {
        let content = "# app\nAPP_PORT=8000\n\nJWT_SECRET=old\n";
        let once = upsert(content, "JWT_SECRET", "fresh");
        let twice = upsert(&once, "JWT_SECRET", "fresh");
        assert_eq!(once, twice);
        assert_eq!(once, "# app\nAPP_PORT=8000\n\nJWT_SECRET=\"fresh\"\n");
    }

    #[test]
    fn upsert_appends_after_missing_trailing_newline() {
        assert_eq!(
            upsert("APP_PORT=8000", "JWT_SECRET", "abc"),
            "APP_PORT=8000\n\nJWT_SECRET=\"abc\""
        );
    }

    #[test]
    fn upsert_appends_after_trailing_newline() {
        assert_eq!(
            upsert("APP_PORT=8000\n", "JWT_SECRET", "abc"),
            "APP_PORT=8000\n\nJWT_SECRET=\"abc\""
        );
    }

    #[test]
    fn upsert_never_touches_comments_or_similar_keys() {
        let content = "# JWT_SECRET=commented\nJWT_SECRET_OLD=keep\n  JWT_SECRET=\"x\"";
        assert_eq!(
            upsert(content, "JWT_SECRET", "y"),
            "# JWT_SECRET=commented\nJWT_SECRET_OLD=keep\nJWT_SECRET=\"y\""
        );
    }

    #[test]
    fn upsert_matches_keys_the_way_parse_reads_them() {
        let content = "export JWT_SECRET=old\nAPP_PORT = 8000\n  JWT_SECRET = \"older\"\n";
        let updated = upsert(content, "JWT_SECRET", "fresh");
        assert_eq!(
            updated,
            "export JWT_SECRET=\"fresh\"\nAPP_PORT = 8000\nJWT_SECRET=\"fresh\"\n"
        );
        assert_eq!(upsert(&updated, "JWT_SECRET", "fresh"), updated);

        let secrets: Vec<ConfigEntry> = parse(&updated)
            .into_iter()
            .filter(|entry| entry.key == "JWT_SECRET")
            .collect();
        assert_eq!(secrets.len(), 2);
        assert!(secrets.iter().all(|entry| entry.value == "fresh"));
    }

    #[test]
    fn upsert_normalizes_existing_unquoted_value() {
        assert_eq!(upsert("KEY=value", "KEY", "value"), "KEY=\"value\"");
    }

    #[test]
    fn parse_handles_quotes_comments_and_exports() {
        let content = "\
# comment
export DB_DRIVER=postgres
DB_HOST = db.internal # primary
DB_PASSWORD=\"p@ss \\\"word\\\"\"
DB_SSLMODE='require'
not a line
=orphan
EMPTY=
";
        let entries = parse(content);
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("DB_DRIVER", "postgres"),
                ("DB_HOST", "db.internal"),
                ("DB_PASSWORD", "p@ss \"word\""),
                ("DB_SSLMODE", "require"),
                ("EMPTY", ""),
            ]
        );
    }

    #[test]
    fn parse_reads_back_upserted_value() {
        let content = upsert("APP=1\n", "JWT_SECRET", "c2VjcmV0LXZhbHVl");
        let entries = parse(&content);
        assert!(entries.contains(&ConfigEntry {
            key: "JWT_SECRET".to_string(),
            value: "c2VjcmV0LXZhbHVl".to_string(),
        }));
    }
}
