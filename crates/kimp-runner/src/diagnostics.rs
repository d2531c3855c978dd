//! Diagnostic formatting: raw error entries to display-ready text.

use crate::{PrettyPrinter, RunError, RunResult};

/// Marker prefix of an error entry that embeds a serialized term instead
/// of plain text.
pub const KORE_MARKER: &str = "::kore::";

/// Format one raw error entry for display.
///
/// Entries starting with [`KORE_MARKER`] wrap a serialized sub-term that
/// was string-escaped when the semantics embedded it as a list element:
/// strip the marker, undo that one layer of escaping, decode the term
/// through the pretty-printer and render it, trimming surrounding
/// whitespace. Anything else is returned unchanged.
///
/// A marker entry whose payload fails to decode is a defect in the
/// semantics, not in the program under test, so it aborts the run rather
/// than degrading.
pub fn format_error<P: PrettyPrinter>(entry: &str, printer: &P) -> RunResult<String> {
    let Some(embedded) = entry.strip_prefix(KORE_MARKER) else {
        return Ok(entry.to_string());
    };

    let text = dequote(embedded).map_err(|reason| RunError::MalformedDiagnostic {
        entry: entry.to_string(),
        reason,
    })?;
    let term = printer
        .parse_term(&text)
        .map_err(|err| RunError::MalformedDiagnostic {
            entry: entry.to_string(),
            reason: err.to_string(),
        })?;
    Ok(printer.render(&term)?.trim().to_string())
}

/// Undo one layer of K string escaping: the simple escapes
/// `\" \\ \n \t \r \f` and the hex forms `\xHH`, `\uHHHH`, `\UHHHHHHHH`.
fn dequote(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('x') => out.push(hex_escape(&mut chars, 2)?),
            Some('u') => out.push(hex_escape(&mut chars, 4)?),
            Some('U') => out.push(hex_escape(&mut chars, 8)?),
            Some(other) => return Err(format!("unknown escape sequence \\{other}")),
            None => return Err("trailing backslash".to_string()),
        }
    }
    Ok(out)
}

/// Read exactly `digits` hex digits and convert them to a character.
fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, String> {
    let mut code = 0u32;
    for _ in 0..digits {
        let c = chars
            .next()
            .ok_or_else(|| "truncated hex escape".to_string())?;
        let digit = c
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit {c:?}"))?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or_else(|| format!("invalid code point U+{code:X}"))
}
