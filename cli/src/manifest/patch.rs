//! In-place string field patching for JSON manifests.
//!
//! [`patch_string_field`] rewrites the value of one `"key": "value"` pair and
//! leaves every other byte of the document untouched, so a user's formatting,
//! key order and indentation survive. The document is never parsed as a
//! whole; only the local pattern has to hold.
//!
//! A section is the text from the root object's `"section": {` up to the
//! *first* closing brace after it. A target section that itself contains a
//! nested object is cut short at the nested object's `}`; fields after it
//! are not found. This is a known limitation of the brace span, not
//! something callers should rely on being fixed.

use std::ops::Range;

use regex::Regex;
use tracing::warn;

/// Replaces the string value of `field` and returns the patched document.
///
/// Without `section`, the first occurrence of the field directly inside the
/// root object is patched. With `section`, only the first occurrence inside
/// the brace span of the root object's `section` is patched.
///
/// If the field (or section) is not found the document is returned
/// unchanged. Callers that need to know compare the output with the input.
#[must_use]
pub fn patch_string_field(
    document: &str,
    field: &str,
    new_value: &str,
    section: Option<&str>,
) -> String {
    let Some(field_re) = build(&field_pattern(field)) else {
        return document.to_string();
    };

    let value = match section {
        None => top_level_value(document, &field_re),
        Some(section) => build(&section_pattern(section)).and_then(|section_re| {
            let span = section_re
                .find_iter(document)
                .find(|m| nesting_at(document, m.start()) <= 1)?;
            let caps = field_re.captures(span.as_str())?;
            let value = caps.get(1)?;
            Some(span.start() + value.start()..span.start() + value.end())
        }),
    };

    match value {
        Some(range) => splice(document, range, new_value),
        None => document.to_string(),
    }
}

/// `"field" : "value"` with the value (anything except a quote) in group 1.
fn field_pattern(field: &str) -> String {
    format!(r#""{}"\s*:\s*"([^"]*)""#, regex::escape(field))
}

/// `"section" : { ... }` up to the first closing brace.
fn section_pattern(section: &str) -> String {
    format!(r#"(?s)"{}"\s*:\s*\{{.*?\}}"#, regex::escape(section))
}

fn build(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(%pattern, error = %e, "cannot build manifest pattern");
            None
        }
    }
}

/// Byte range of the value of the first match that sits in the root object.
fn top_level_value(document: &str, field_re: &Regex) -> Option<Range<usize>> {
    field_re.captures_iter(document).find_map(|caps| {
        let whole = caps.get(0)?;
        if nesting_at(document, whole.start()) > 1 {
            return None;
        }
        caps.get(1).map(|value| value.range())
    })
}

/// Number of objects/arrays open at byte `offset`, ignoring string contents.
fn nesting_at(document: &str, offset: usize) -> usize {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in document.as_bytes()[..offset].iter().copied() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    depth
}

fn splice(document: &str, range: Range<usize>, new_value: &str) -> String {
    let mut patched = String::with_capacity(document.len() + new_value.len());
    patched.push_str(&document[..range.start]);
    patched.push_str(new_value);
    patched.push_str(&document[range.end..]);
    patched
}
