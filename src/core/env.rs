//! Loading the secret set from a `.env`-style file.
//!
//! Values are taken literally. There is no `$VAR` expansion, and the only
//! escapes decoded are `\n` and `\r` inside double quotes.
//!
//! - `KEY=value`, optionally prefixed with `export`
//! - `#` starts a comment at the beginning of a line, or after whitespace
//!   in an unquoted value
//! - `"..."`, `'...'` and `` `...` `` may span several lines

use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;
use tracing::debug;

use crate::core::domain::SecretSet;
use crate::error::{Result, SourceError};

/// Load a secret set from a `KEY=VALUE` file.
///
/// Later duplicates of a key replace earlier ones.
///
/// # Errors
///
/// Returns `SourceError::Read` if the file cannot be read,
/// `SourceError::Syntax` for a malformed line, and `SourceError::Invalid`
/// if a key is empty.
pub fn load(path: &Path) -> Result<SecretSet> {
    let shown = path.display().to_string();
    debug!(path = %shown, "loading secret set");

    let contents = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: shown.clone(),
        source,
    })?;

    let set = parse_named(&contents, &shown)?;
    debug!(count = set.len(), "secret set loaded");
    Ok(set)
}

/// Parse a secret set from in-memory `KEY=VALUE` content.
///
/// # Errors
///
/// Same as [`load`], with `<input>` as the reported path.
pub fn parse(contents: &str) -> Result<SecretSet> {
    parse_named(contents, "<input>")
}

fn parse_named(contents: &str, path: &str) -> Result<SecretSet> {
    let syntax = |line: usize, reason: &'static str| SourceError::Syntax {
        path: path.to_string(),
        line,
        reason,
    };

    let mut set = SecretSet::new();
    let mut lines = contents.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let (key, rest) = line
            .split_once('=')
            .ok_or_else(|| syntax(line_no, "expected KEY=VALUE"))?;
        let key = key.trim();
        if !key.chars().all(is_key_char) {
            return Err(syntax(line_no, "invalid character in key").into());
        }

        let rest = rest.trim_start();
        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'' | '`')) => {
                quoted(quote, &rest[1..], &mut lines).map_err(|reason| syntax(line_no, reason))?
            }
            _ => unquoted(rest),
        };

        set.insert(key, value).map_err(|source| SourceError::Invalid {
            path: path.to_string(),
            source,
        })?;
    }
    Ok(set)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Value up to a whitespace-preceded `#`, trailing whitespace removed.
fn unquoted(rest: &str) -> String {
    let end = rest
        .char_indices()
        .find(|&(i, c)| c == '#' && rest[..i].ends_with(char::is_whitespace))
        .map_or(rest.len(), |(i, _)| i);
    rest[..end].trim_end().to_string()
}

/// Body of a quoted value starting after the opening `quote`, reading
/// further lines until the closing one.
fn quoted(
    quote: char,
    first: &str,
    lines: &mut Enumerate<Lines<'_>>,
) -> std::result::Result<String, &'static str> {
    let mut body = String::new();
    let mut current = first;

    loop {
        if let Some(end) = closing(quote, current) {
            body.push_str(&current[..end]);
            let tail = current[end + quote.len_utf8()..].trim();
            if !(tail.is_empty() || tail.starts_with('#')) {
                return Err("unexpected text after closing quote");
            }
            break;
        }
        body.push_str(current);
        body.push('\n');
        current = match lines.next() {
            Some((_, next)) => next,
            None => return Err("unterminated quoted value"),
        };
    }

    if quote == '"' {
        body = body.replace("\\n", "\n").replace("\\r", "\r");
    }
    Ok(body)
}

/// Byte offset of the first unescaped `quote` in `s`.
fn closing(quote: char, s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(i);
        }
    }
    None
}
