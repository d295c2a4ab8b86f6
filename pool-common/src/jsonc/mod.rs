//! Comment-tolerant JSON handling.
//!
//! Pool operators edit their configuration by hand, so every on-disk
//! document accepts `//` line comments, `/* */` block comments and trailing
//! commas on top of plain JSON. This module converts that dialect into
//! strict JSON for `serde_json`; it never fails itself, so malformed input
//! surfaces from the strict parser with its usual diagnostics.
//!
//! # Example
//!
//! ```
//! use serde_json::Value;
//!
//! let doc = r#"{
//!     // stratum ports
//!     "ports": { "4042": { "diff": 0.25 }, },
//! }"#;
//! let parsed: Value = pool_common::jsonc::from_str(doc).unwrap();
//! assert_eq!(parsed["ports"]["4042"]["diff"], 0.25);
//! ```

use serde::de::DeserializeOwned;

/// Scanner state for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    LineComment,
    BlockComment,
}

/// Strip comments and trailing commas from `text`.
///
/// String literals pass through byte-for-byte: comment openers inside a
/// string are inert, and a backslash always carries the following character
/// with it, so escaped quotes never terminate a string early. On input that
/// is already strict JSON this is the identity function.
///
/// A comma is withheld together with any whitespace and comments after it
/// until the next significant character decides its fate: it is dropped
/// only when that character closes an object or array. Folding the
/// trailing-comma rule into the scanner keeps it string-aware, so a string
/// value that happens to contain `", }"` is never altered.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    let mut pending_comma = false;
    let mut pending_ws = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '"' => {
                    flush_pending(&mut out, &mut pending_comma, &mut pending_ws);
                    out.push(c);
                    state = State::InString;
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                ',' => {
                    flush_pending(&mut out, &mut pending_comma, &mut pending_ws);
                    pending_comma = true;
                }
                '}' | ']' => {
                    // A withheld comma was trailing: drop it, keep the
                    // whitespace that followed it.
                    pending_comma = false;
                    out.push_str(&pending_ws);
                    pending_ws.clear();
                    out.push(c);
                }
                c if c.is_whitespace() => {
                    if pending_comma {
                        pending_ws.push(c);
                    } else {
                        out.push(c);
                    }
                }
                _ => {
                    flush_pending(&mut out, &mut pending_comma, &mut pending_ws);
                    out.push(c);
                }
            },
            State::InString => match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => {
                    out.push(c);
                    state = State::Normal;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                // Comment text is dropped; the newline survives so line
                // numbers in parse errors stay meaningful.
                if c == '\n' {
                    state = State::Normal;
                    if pending_comma {
                        pending_ws.push(c);
                    } else {
                        out.push(c);
                    }
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Normal;
                }
            }
        }
    }

    // Unterminated constructs at EOF: emit what was withheld and let the
    // strict parser report the damage.
    flush_pending(&mut out, &mut pending_comma, &mut pending_ws);
    out
}

fn flush_pending(out: &mut String, pending_comma: &mut bool, pending_ws: &mut String) {
    if *pending_comma {
        out.push(',');
        *pending_comma = false;
    }
    out.push_str(pending_ws);
    pending_ws.clear();
}

/// Normalize `text` and strict-parse the result.
pub fn from_str<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    serde_json::from_str(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_strict_json_is_identity() {
        let inputs = [
            r#"{"a":1,"b":[2,3],"c":{"d":"e"}}"#,
            "{\n  \"a\": 1,\n  \"b\": \"two\"\n}\n",
            r#"[1, 2, 3]"#,
            r#""just a string""#,
        ];
        for input in inputs {
            assert_eq!(normalize(input), input);
        }
    }

    #[test]
    fn test_line_comments_are_stripped() {
        let input = "// header\n{\"a\": 1 // trailing note\n}";
        assert_eq!(normalize(input), "\n{\"a\": 1 \n}");
    }

    #[test]
    fn test_block_comments_are_stripped() {
        let input = "{\"a\": /* the answer */ 42}";
        assert_eq!(normalize(input), "{\"a\":  42}");

        let multiline = "{\"a\": 1 /* spans\nlines */, \"b\": 2}";
        assert_eq!(normalize(multiline), "{\"a\": 1 , \"b\": 2}");
    }

    #[test]
    fn test_trailing_commas_are_removed() {
        assert_eq!(normalize(r#"{"a":1,}"#), r#"{"a":1}"#);
        assert_eq!(normalize("[1, 2,\n]"), "[1, 2\n]");
        assert_eq!(normalize(r#"{"a":[1,],}"#), r#"{"a":[1]}"#);
    }

    #[test]
    fn test_interior_commas_are_kept() {
        assert_eq!(normalize(r#"{"a": 1, "b": 2}"#), r#"{"a": 1, "b": 2}"#);
        assert_eq!(normalize("[1,\n 2]"), "[1,\n 2]");
    }

    #[test]
    fn test_trailing_comma_with_interleaved_comment() {
        // Comments between the comma and the closing brace do not hide it.
        let parsed: Value = from_str(r#"{"a":1, /* c */ "b":"x",}"#).unwrap();
        assert_eq!(parsed, json!({"a": 1, "b": "x"}));

        let parsed: Value = from_str("[1, 2, // done\n]").unwrap();
        assert_eq!(parsed, json!([1, 2]));
    }

    #[test]
    fn test_comment_openers_inside_strings_are_inert() {
        let input = r#"{"s":"not // a comment"}"#;
        assert_eq!(normalize(input), input);

        let input = r#"{"s":"nor /* this */"}"#;
        assert_eq!(normalize(input), input);

        let parsed: Value = from_str(r#"{"url":"stratum+tcp://pool.example"}"#).unwrap();
        assert_eq!(parsed["url"], "stratum+tcp://pool.example");
    }

    #[test]
    fn test_escaped_quote_does_not_terminate_string() {
        let input = r#"{"s":"say \"hi\" // still inside"}"#;
        assert_eq!(normalize(input), input);

        // A literal backslash right before the closing quote.
        let input = r#"{"path":"C:\\"}"#;
        assert_eq!(normalize(input), input);
        let parsed: Value = from_str(input).unwrap();
        assert_eq!(parsed["path"], "C:\\");
    }

    #[test]
    fn test_string_containing_trailing_comma_pattern_is_preserved() {
        // The scanner stays string-aware, so content that looks like a
        // trailing comma is untouched.
        let input = r#"{"s":", }"}"#;
        assert_eq!(normalize(input), input);

        let input = r#"{"s":"a, ]"}"#;
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_unterminated_input_still_returns() {
        // normalize never fails; the strict parser reports the error.
        let out = normalize("{\"a\": 1, // no close");
        assert_eq!(out, "{\"a\": 1, ");
        assert!(from_str::<Value>("{\"a\": 1, // no close").is_err());

        let out = normalize("{\"a\": /* never closed");
        assert_eq!(out, "{\"a\": ");
    }

    #[test]
    fn test_lone_slash_is_copied_through() {
        assert_eq!(normalize(r#"{"a": 1} /"#), r#"{"a": 1} /"#);
    }

    #[test]
    fn test_from_str_on_operator_edited_document() {
        let doc = r#"{
            /* pool for verus */
            "coin": "vrsc",
            "ports": {
                "4042": { "diff": 0.25 }, // low difficulty
                "4043": { "diff": 8 },
            },
        }"#;
        let parsed: Value = from_str(doc).unwrap();
        assert_eq!(parsed["coin"], "vrsc");
        assert_eq!(parsed["ports"]["4043"]["diff"], 8);
    }
}
