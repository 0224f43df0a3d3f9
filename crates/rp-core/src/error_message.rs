//! Unwrapping of serialized `ErrorDetail` lists.
//!
//! Some endpoints (team join requests in particular) return error strings that
//! are the backend's repr of a validation list, e.g.
//! `[ErrorDetail(string='Team is full', code='invalid')]`.

use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_DETAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"ErrorDetail\(string=(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"),\s*code=(?:'[^']*'|"[^"]*")\)"#,
    )
    .expect("ERROR_DETAIL pattern is valid")
});

/// Strip `ErrorDetail(string='...', code='...')` wrappers down to their messages.
///
/// Only strings made up entirely of details (plus list brackets, commas and
/// whitespace) are rewritten; several details are joined with a space. Every
/// other input is returned unchanged. Unwrapping repeats until nothing is left
/// to strip, so the function is idempotent.
pub fn extract_error_message(raw: &str) -> String {
    let mut current = raw.to_string();
    while let Some(next) = unwrap_once(&current) {
        current = next;
    }
    current
}

fn unwrap_once(raw: &str) -> Option<String> {
    let mut messages = Vec::new();
    let mut residue = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in ERROR_DETAIL.captures_iter(raw) {
        let whole = caps.get(0)?;
        residue.push_str(&raw[last..whole.start()]);
        last = whole.end();

        let message = caps.get(1).or_else(|| caps.get(2))?.as_str();
        messages.push(unescape(message));
    }
    residue.push_str(&raw[last..]);

    if messages.is_empty() {
        return None;
    }

    let only_list_syntax = residue
        .chars()
        .all(|c| c == '[' || c == ']' || c == ',' || c.is_whitespace());
    if !only_list_syntax {
        return None;
    }

    Some(messages.join(" "))
}

fn unescape(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_single_detail_list() {
        let raw = "[ErrorDetail(string='You are already a member of an active team for this event', code='invalid')]";
        assert_eq!(
            extract_error_message(raw),
            "You are already a member of an active team for this event"
        );
    }

    #[test]
    fn passes_plain_strings_through() {
        assert_eq!(extract_error_message("Team is full"), "Team is full");
        assert_eq!(extract_error_message(""), "");
        assert_eq!(
            extract_error_message("error: ErrorDetail(string='x', code='y') happened"),
            "error: ErrorDetail(string='x', code='y') happened"
        );
    }

    #[test]
    fn joins_multiple_details() {
        let raw = "[ErrorDetail(string='Team is full.', code='invalid'), ErrorDetail(string='Join requests are closed.', code='closed')]";
        assert_eq!(
            extract_error_message(raw),
            "Team is full. Join requests are closed."
        );
    }

    #[test]
    fn handles_double_quoted_repr_with_apostrophe() {
        let raw = r#"[ErrorDetail(string="You're not invited", code='permission_denied')]"#;
        assert_eq!(extract_error_message(raw), "You're not invited");
    }

    #[test]
    fn unwraps_nested_details_to_a_fixpoint() {
        let raw = r#"[ErrorDetail(string="[ErrorDetail(string='inner', code='a')]", code='b')]"#;
        assert_eq!(extract_error_message(raw), "inner");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "[ErrorDetail(string='You are already a member of an active team for this event', code='invalid')]",
            r#"[ErrorDetail(string="[ErrorDetail(string='inner', code='a')]", code='b')]"#,
            "ErrorDetail(string='bare', code='x')",
            "[ErrorDetail(string='escaped \\' quote', code='x')]",
            "plain message",
            "[]",
            "[ErrorDetail(string='', code='blank')]",
            "prefix [ErrorDetail(string='x', code='y')]",
        ];

        for sample in samples {
            let once = extract_error_message(sample);
            assert_eq!(extract_error_message(&once), once, "input: {sample}");
        }
    }
}
